//! Data Models
//!
//! Value types exchanged with the FunLe admin backend:
//!
//! - `Content` / `ContentType` - tutorial text and image payloads
//! - `CourseNode` - course nodes referencing infos or tests
//! - `Info`, `Course` - leveled documents in their wire shape
//! - `Test`, `TestBody`, `AllTests`, `TestDraft` - quiz tests
//! - `User`, `UserProgress` - learners and their progress lists
//!
//! None of these types carry editor state; positions and node handles live
//! in the `editor` module.

mod content;
mod course;
mod error;
mod info;
mod object_id;
mod test_item;
mod user;
mod wire;

pub use content::{Content, ContentType};
pub use course::{Course, CourseNode, CourseNodeKind};
pub use error::ValidationError;
pub use info::Info;
pub use object_id::ObjectId;
pub use test_item::{AllTests, TaggedTest, Test, TestBody, TestDraft, TestKind, TestOption};
pub use user::{ProgressChange, ProgressItem, User, UserProgress, UserRole};
pub use wire::WireLevel;
