//! Business Services
//!
//! - `EditorSession` - load, edit and submit one course or tutorial
//! - `RemoteDocument` - endpoint dispatch for each leveled document type
//! - `TestService` - load, validate and save single quiz tests
//!
//! Services sit between the editor and the backend client; neither of those
//! layers knows about the other.

pub mod editor_session;
pub mod error;
pub mod remote;
pub mod test_service;

pub use editor_session::{
    CourseSession, EditorSession, SubmitMode, SubmitOutcome, SubmitStatus, SubmitTicket,
    TutorialSession,
};
pub use error::SessionError;
pub use remote::RemoteDocument;
pub use test_service::TestService;
