use thiserror::Error;

/// Validation errors for model payloads and drafts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid node kind: {0}")]
    InvalidNodeKind(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid test: {0}")]
    InvalidTest(String),
}
