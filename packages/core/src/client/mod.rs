//! Backend Client
//!
//! - [`AdminApi`] - async trait covering every admin endpoint
//! - [`HttpAdminClient`] - reqwest implementation
//! - [`MockAdminApi`] - in-memory implementation for tests and offline use
//! - [`AdminConfig`] - base URL, timeout and user agent

mod admin_api;
mod config;
mod error;
mod http;
mod mock;

pub use admin_api::{AdminApi, ApiResult};
pub use config::{AdminConfig, ENV_BASE_URL, ENV_TIMEOUT_SECS};
pub use error::ApiError;
pub use http::HttpAdminClient;
pub use mock::MockAdminApi;
