//! Backend dispatch per leveled document type
//!
//! [`RemoteDocument`] maps a [`LeveledDocument`] onto its fetch/create/update
//! endpoints so that [`EditorSession`](crate::services::EditorSession) can
//! stay generic over courses and tutorials.

use crate::client::{AdminApi, ApiResult};
use crate::editor::LeveledDocument;
use crate::models::{Course, Info, ObjectId};
use async_trait::async_trait;

#[async_trait]
pub trait RemoteDocument: LeveledDocument {
    async fn fetch(api: &dyn AdminApi, id: &str) -> ApiResult<Self>;

    async fn create(api: &dyn AdminApi, document: &Self) -> ApiResult<Option<ObjectId>>;

    async fn update(api: &dyn AdminApi, id: &str, document: &Self) -> ApiResult<()>;
}

#[async_trait]
impl RemoteDocument for Info {
    async fn fetch(api: &dyn AdminApi, id: &str) -> ApiResult<Self> {
        api.get_info(id).await
    }

    async fn create(api: &dyn AdminApi, document: &Self) -> ApiResult<Option<ObjectId>> {
        api.create_info(document).await
    }

    async fn update(api: &dyn AdminApi, id: &str, document: &Self) -> ApiResult<()> {
        api.update_info(id, document).await
    }
}

#[async_trait]
impl RemoteDocument for Course {
    async fn fetch(api: &dyn AdminApi, id: &str) -> ApiResult<Self> {
        api.get_course(id).await
    }

    async fn create(api: &dyn AdminApi, document: &Self) -> ApiResult<Option<ObjectId>> {
        api.create_course(document).await
    }

    async fn update(api: &dyn AdminApi, id: &str, document: &Self) -> ApiResult<()> {
        api.update_course(id, document).await
    }
}
