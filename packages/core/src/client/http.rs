//! HTTP implementation of [`AdminApi`] on top of reqwest
//!
//! Paths are relative to [`AdminConfig::base_url`]; ids travel as the `id`
//! query parameter. Bodies are JSON in both directions.

use crate::client::{AdminApi, AdminConfig, ApiError, ApiResult};
use crate::models::{
    AllTests, Course, Info, ObjectId, ProgressChange, TaggedTest, Test, TestKind, User,
    UserProgress,
};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

const COURSE: &str = "course";
const INFO: &str = "info";
const TEST: &str = "test";
const USER: &str = "user";

/// One outgoing call: method, path, optional `?id=` and resource name for errors
struct Call<'a> {
    method: Method,
    path: String,
    id: Option<&'a str>,
    resource: &'static str,
}

impl<'a> Call<'a> {
    fn new(method: Method, path: impl Into<String>, resource: &'static str) -> Self {
        Self {
            method,
            path: path.into(),
            id: None,
            resource,
        }
    }

    fn with_id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    client: Client,
    base_url: Url,
}

impl HttpAdminClient {
    pub fn new(config: AdminConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut base_url = config.parsed_base_url()?;
        // Url::join drops the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, call: &Call<'_>) -> ApiResult<Url> {
        let mut url = self.base_url.join(call.path.trim_start_matches('/'))?;
        if let Some(id) = call.id {
            url.query_pairs_mut().append_pair("id", id);
        }
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        call: &Call<'_>,
        body: Option<&B>,
    ) -> ApiResult<String> {
        let url = self.url(call)?;
        tracing::debug!("{} {}", call.method, url);

        let mut request = self.client.request(call.method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::not_found(
                call.resource,
                call.id.unwrap_or(call.path.as_str()),
            ));
        }
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), text));
        }
        Ok(text)
    }

    async fn fetch<T: DeserializeOwned>(&self, call: Call<'_>) -> ApiResult<T> {
        let text = self.send::<()>(&call, None).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::malformed(call.resource, e.to_string()))
    }

    async fn write<B: Serialize + ?Sized + Sync>(&self, call: Call<'_>, body: &B) -> ApiResult<()> {
        self.send(&call, Some(body)).await?;
        tracing::info!("{} {} succeeded", call.method, call.path);
        Ok(())
    }

    async fn remove(&self, call: Call<'_>) -> ApiResult<()> {
        self.send::<()>(&call, None).await?;
        tracing::info!("Deleted {} {}", call.resource, call.id.unwrap_or_default());
        Ok(())
    }

    /// POST a new document and pick the assigned id out of the reply, if any
    async fn create<B: Serialize + ?Sized + Sync>(
        &self,
        call: Call<'_>,
        body: &B,
    ) -> ApiResult<Option<ObjectId>> {
        let text = self.send(&call, Some(body)).await?;
        let id = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|value| ObjectId::from_insert_response(&value));

        match &id {
            Some(id) => tracing::info!("Created {} {}", call.resource, id),
            None => tracing::info!("Created {} (id not returned)", call.resource),
        }
        Ok(id)
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list_courses(&self) -> ApiResult<Vec<Course>> {
        self.fetch(Call::new(Method::GET, "admin/get/cources/all", COURSE))
            .await
    }

    async fn get_course(&self, id: &str) -> ApiResult<Course> {
        self.fetch(Call::new(Method::GET, "admin/get/cource", COURSE).with_id(id))
            .await
    }

    async fn create_course(&self, course: &Course) -> ApiResult<Option<ObjectId>> {
        self.create(Call::new(Method::POST, "admin/add/cource", COURSE), course)
            .await
    }

    async fn update_course(&self, id: &str, course: &Course) -> ApiResult<()> {
        self.write(
            Call::new(Method::PUT, "admin/update/cource", COURSE).with_id(id),
            course,
        )
        .await
    }

    async fn delete_course(&self, id: &str) -> ApiResult<()> {
        self.remove(Call::new(Method::DELETE, "admin/delete/cource", COURSE).with_id(id))
            .await
    }

    async fn list_infos(&self) -> ApiResult<Vec<Info>> {
        self.fetch(Call::new(Method::GET, "admin/get/info/all", INFO))
            .await
    }

    async fn get_info(&self, id: &str) -> ApiResult<Info> {
        self.fetch(Call::new(Method::GET, "admin/get/info", INFO).with_id(id))
            .await
    }

    async fn create_info(&self, info: &Info) -> ApiResult<Option<ObjectId>> {
        self.create(Call::new(Method::POST, "admin/create/info", INFO), info)
            .await
    }

    // the backend exposes info update and delete as POST
    async fn update_info(&self, id: &str, info: &Info) -> ApiResult<()> {
        self.write(
            Call::new(Method::POST, "admin/update/info", INFO).with_id(id),
            info,
        )
        .await
    }

    async fn delete_info(&self, id: &str) -> ApiResult<()> {
        self.remove(Call::new(Method::POST, "admin/del/info", INFO).with_id(id))
            .await
    }

    async fn list_tests(&self) -> ApiResult<Vec<TaggedTest>> {
        let all: AllTests = self
            .fetch(Call::new(Method::GET, "admin/get/tests/all", TEST))
            .await?;
        Ok(all.into_tagged())
    }

    async fn get_test(&self, id: &str) -> ApiResult<Test> {
        self.fetch(Call::new(Method::GET, "admin/get/test", TEST).with_id(id))
            .await
    }

    async fn create_test(&self, test: &Test) -> ApiResult<Option<ObjectId>> {
        let path = format!("admin/{}/create/test", test.kind());
        self.create(Call::new(Method::POST, path, TEST), test).await
    }

    async fn update_test(&self, id: &str, test: &Test) -> ApiResult<()> {
        let path = format!("admin/{}/update/test", test.kind());
        self.write(Call::new(Method::PUT, path, TEST).with_id(id), test)
            .await
    }

    async fn delete_test(&self, kind: TestKind, id: &str) -> ApiResult<()> {
        let path = format!("admin/{}/delete/test", kind);
        self.remove(Call::new(Method::DELETE, path, TEST).with_id(id))
            .await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.fetch(Call::new(Method::GET, "admin/get/users", USER))
            .await
    }

    async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.fetch(Call::new(Method::GET, "admin/get/user", USER).with_id(id))
            .await
    }

    async fn update_user(&self, id: &str, user: &User) -> ApiResult<()> {
        self.write(
            Call::new(Method::PUT, "admin/update/user", USER).with_id(id),
            user,
        )
        .await
    }

    async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.remove(Call::new(Method::DELETE, "admin/del/user", USER).with_id(id))
            .await
    }

    async fn update_user_progress(&self, id: &str, progress: &UserProgress) -> ApiResult<()> {
        self.write(
            Call::new(Method::PUT, "admin/update/user/progress", USER).with_id(id),
            progress,
        )
        .await
    }

    async fn add_progress(&self, change: &ProgressChange) -> ApiResult<()> {
        let path = format!("admin/add/{}/user", change.item.path_segment());
        self.write(Call::new(Method::PUT, path, USER), &change.to_body())
            .await
    }

    async fn remove_progress(&self, change: &ProgressChange) -> ApiResult<()> {
        let path = format!("admin/remove/{}/user", change.item.path_segment());
        self.write(Call::new(Method::PUT, path, USER), &change.to_body())
            .await
    }
}
