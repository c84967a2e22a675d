//! Error types for the content-tree editor
//!
//! Structural mutations never fail hard: a target that no longer exists is a
//! no-op. The `try_*` store methods surface that case as
//! [`EditorError::LevelNotFound`] / [`EditorError::NodeNotFound`] for callers
//! that want to report it. Loading a document whose shape is wrong is
//! [`EditorError::MalformedDocument`].

use crate::editor::NodeHandle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Inbound document could not be turned into a level sequence
    #[error("Malformed {document} document: {reason}")]
    MalformedDocument {
        document: &'static str,
        reason: String,
    },

    /// No level with this index
    #[error("Level {level_index} does not exist")]
    LevelNotFound { level_index: usize },

    /// No node at this handle
    #[error("Node at position {position} of level {level_index} does not exist")]
    NodeNotFound { level_index: usize, position: usize },
}

impl EditorError {
    pub fn malformed(document: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            document,
            reason: reason.into(),
        }
    }

    pub fn level_not_found(level_index: usize) -> Self {
        Self::LevelNotFound { level_index }
    }

    pub fn node_not_found(handle: NodeHandle) -> Self {
        Self::NodeNotFound {
            level_index: handle.level_index,
            position: handle.position,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EditorError::LevelNotFound { .. } | EditorError::NodeNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = EditorError::malformed("info", "duplicate level index 2");
        assert_eq!(
            err.to_string(),
            "Malformed info document: duplicate level index 2"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            EditorError::level_not_found(3).to_string(),
            "Level 3 does not exist"
        );
        let err = EditorError::node_not_found(NodeHandle::new(1, 4));
        assert_eq!(err.to_string(), "Node at position 4 of level 1 does not exist");
        assert!(err.is_not_found());
    }
}
