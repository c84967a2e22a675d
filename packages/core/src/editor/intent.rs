//! Presentation Intents
//!
//! A UI never mutates the tree itself. Each user action becomes an
//! [`EditIntent`] that is applied through
//! [`TreeEditorStore::apply`](crate::editor::TreeEditorStore::apply).

use crate::editor::NodeHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent<T> {
    AddLevel,
    DeleteLevel(usize),
    /// Move the level at display index `from` to display index `to`
    MoveLevel { from: usize, to: usize },
    AddNode(usize),
    DeleteNode(NodeHandle),
    EditNode(NodeHandle, T),
}

impl<T> EditIntent<T> {
    /// Whether applying this intent can change which levels exist
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EditIntent::AddLevel | EditIntent::DeleteLevel(_) | EditIntent::MoveLevel { .. }
        )
    }
}
