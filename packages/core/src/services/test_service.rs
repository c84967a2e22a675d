//! Test Service
//!
//! Loads, saves and deletes single quiz tests through a [`TestDraft`]. The
//! draft is validated before any request is made.

use crate::client::AdminApi;
use crate::models::{ObjectId, TaggedTest, TestDraft, TestKind};
use crate::services::SessionError;
use std::sync::Arc;

#[derive(Clone)]
pub struct TestService {
    api: Arc<dyn AdminApi>,
}

impl TestService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// All tests of both kinds
    pub async fn list(&self) -> Result<Vec<TaggedTest>, SessionError> {
        Ok(self.api.list_tests().await?)
    }

    /// Open an existing test for editing
    pub async fn load(&self, id: &str) -> Result<TestDraft, SessionError> {
        let test = self.api.get_test(id).await?;
        let mut draft = TestDraft::from_test(test);
        if draft.id.is_none() {
            draft.id = Some(ObjectId::new(id));
        }
        Ok(draft)
    }

    /// Create the test, or update it when the draft has an id
    ///
    /// Returns the test's id when known.
    pub async fn save(&self, draft: &TestDraft) -> Result<Option<ObjectId>, SessionError> {
        let test = draft.build()?;
        match &draft.id {
            Some(id) => {
                self.api.update_test(id.as_str(), &test).await?;
                tracing::info!("Updated {} test {}", test.kind(), id);
                Ok(Some(id.clone()))
            }
            None => {
                let id = self.api.create_test(&test).await?;
                tracing::info!("Created {} test", test.kind());
                Ok(id)
            }
        }
    }

    pub async fn delete(&self, kind: TestKind, id: &str) -> Result<(), SessionError> {
        self.api.delete_test(kind, id).await?;
        Ok(())
    }
}
