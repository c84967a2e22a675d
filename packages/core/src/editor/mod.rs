//! Content-Tree Editor
//!
//! In-memory editing of leveled documents (tutorials and courses):
//!
//! - [`level`] - levels, positioned nodes and the ordered level sequence
//! - [`store`] - [`TreeEditorStore`], the per-session owner of one tree
//! - [`intent`] - user actions expressed as [`EditIntent`] values
//! - [`codec`] - conversion to and from the backend's `[index, [nodes]]` form
//!
//! The editor has no I/O. Loading and submitting go through
//! `services::EditorSession`.

pub mod codec;
mod error;
mod intent;
mod level;
mod store;

pub use codec::{decode_document, from_wire_levels, to_wire_levels, LeveledDocument};
pub use error::EditorError;
pub use intent::EditIntent;
pub use level::{EditorNode, Level, LevelNode, LevelSequence, NodeHandle};
pub use store::{CourseStore, DocumentMeta, SessionState, TreeEditorStore, TutorialStore};
