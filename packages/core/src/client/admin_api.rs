//! AdminApi Trait - Backend Abstraction Layer
//!
//! Every endpoint of the FunLe admin backend as one async trait. Editors and
//! sessions only ever see `&dyn AdminApi`, so the same flows run against the
//! real server ([`HttpAdminClient`](crate::client::HttpAdminClient)) and the
//! in-memory [`MockAdminApi`](crate::client::MockAdminApi).
//!
//! # Conventions
//!
//! - Ids are the unwrapped `$oid` strings.
//! - `create_*` returns the id the backend assigned, or `None` when the
//!   response did not say.
//! - A missing document is [`ApiError::NotFound`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use funle_admin_core::client::{AdminApi, AdminConfig, HttpAdminClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = HttpAdminClient::new(AdminConfig::from_env()?)?;
//!     for info in api.list_infos().await? {
//!         println!("{}", info.title);
//!     }
//!     Ok(())
//! }
//! ```

use crate::client::ApiError;
use crate::models::{
    Course, Info, ObjectId, ProgressChange, TaggedTest, Test, TestKind, User, UserProgress,
};
use async_trait::async_trait;

pub type ApiResult<T> = Result<T, ApiError>;

/// Backend operations used by the admin panel
///
/// Implementations must be `Send + Sync`; sessions hold them behind `Arc`
/// or borrow them across `.await` points.
#[async_trait]
pub trait AdminApi: Send + Sync {
    //
    // COURSES
    //

    async fn list_courses(&self) -> ApiResult<Vec<Course>>;

    async fn get_course(&self, id: &str) -> ApiResult<Course>;

    async fn create_course(&self, course: &Course) -> ApiResult<Option<ObjectId>>;

    async fn update_course(&self, id: &str, course: &Course) -> ApiResult<()>;

    async fn delete_course(&self, id: &str) -> ApiResult<()>;

    //
    // INFOS (tutorials)
    //

    async fn list_infos(&self) -> ApiResult<Vec<Info>>;

    async fn get_info(&self, id: &str) -> ApiResult<Info>;

    async fn create_info(&self, info: &Info) -> ApiResult<Option<ObjectId>>;

    async fn update_info(&self, id: &str, info: &Info) -> ApiResult<()>;

    async fn delete_info(&self, id: &str) -> ApiResult<()>;

    //
    // TESTS
    //

    /// Both collections, each item tagged with its kind
    async fn list_tests(&self) -> ApiResult<Vec<TaggedTest>>;

    async fn get_test(&self, id: &str) -> ApiResult<Test>;

    /// The endpoint is chosen by the test's kind
    async fn create_test(&self, test: &Test) -> ApiResult<Option<ObjectId>>;

    async fn update_test(&self, id: &str, test: &Test) -> ApiResult<()>;

    async fn delete_test(&self, kind: TestKind, id: &str) -> ApiResult<()>;

    //
    // USERS
    //

    async fn list_users(&self) -> ApiResult<Vec<User>>;

    async fn get_user(&self, id: &str) -> ApiResult<User>;

    async fn update_user(&self, id: &str, user: &User) -> ApiResult<()>;

    async fn delete_user(&self, id: &str) -> ApiResult<()>;

    /// Replace all three progress lists of a user
    async fn update_user_progress(&self, id: &str, progress: &UserProgress) -> ApiResult<()>;

    async fn add_progress(&self, change: &ProgressChange) -> ApiResult<()>;

    async fn remove_progress(&self, change: &ProgressChange) -> ApiResult<()>;
}
