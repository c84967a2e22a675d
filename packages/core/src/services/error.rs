//! Service Layer Error Types
//!
//! [`SessionError`] is what editing sessions return. It wraps the lower
//! layers so callers can match on the cause without losing it.

use crate::client::ApiError;
use crate::editor::EditorError;
use crate::models::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Backend call failed
    #[error("Backend request failed: {0}")]
    Api(#[from] ApiError),

    /// Document could not be loaded into the editor
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Draft failed validation before anything was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Update requested for a document the backend has not assigned an id yet
    #[error("{document} has no id yet; create it first")]
    MissingId { document: &'static str },

    /// The editor holds no document; nothing has been loaded or edited since the last reset
    #[error("{document} is empty; nothing to submit")]
    NothingToSubmit { document: &'static str },

    /// A submit of this session is already in flight
    #[error("A submit is already in progress")]
    SubmitInProgress,
}

impl SessionError {
    pub fn missing_id(document: &'static str) -> Self {
        Self::MissingId { document }
    }

    pub fn nothing_to_submit(document: &'static str) -> Self {
        Self::NothingToSubmit { document }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            SessionError::Api(e) => e.is_not_found(),
            SessionError::Editor(e) => e.is_not_found(),
            _ => false,
        }
    }
}
