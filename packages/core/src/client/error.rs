//! Client Error Types
//!
//! Every failure of a backend call maps to one [`ApiError`] variant. Transport
//! problems are [`ApiError::NetworkFailure`]; the backend answering with a
//! non-success status is [`ApiError::HttpStatus`], except 404 which becomes
//! [`ApiError::NotFound`] so callers can treat a missing document specially.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, timeout, or broken transport
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Backend has no document with this id
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Response body does not have the expected shape
    #[error("Malformed {resource} response: {reason}")]
    MalformedDocument {
        resource: &'static str,
        reason: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn malformed(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            resource,
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::NetworkFailure(_) => true,
            ApiError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::malformed("response", err.to_string());
        }
        if let Some(status) = err.status() {
            return ApiError::http_status(status.as_u16(), err.to_string());
        }
        ApiError::NetworkFailure(err.to_string())
    }
}
