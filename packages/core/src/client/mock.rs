//! In-memory [`AdminApi`] for tests and offline development
//!
//! Documents live in hash maps keyed by id. Every call is recorded, and the
//! next call can be made to fail with [`MockAdminApi::fail_next`] to exercise
//! error paths without a server.

use crate::client::{AdminApi, ApiError, ApiResult};
use crate::models::{
    AllTests, Course, Info, ObjectId, ProgressChange, ProgressItem, TaggedTest, Test, TestKind,
    User, UserProgress,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::{sleep, Duration};

#[derive(Debug, Default)]
struct MockState {
    courses: BTreeMap<String, Course>,
    infos: BTreeMap<String, Info>,
    tests: BTreeMap<String, Test>,
    users: BTreeMap<String, User>,
    calls: Vec<String>,
    failures: VecDeque<ApiError>,
}

/// Cloning shares the same backing state
#[derive(Debug, Clone, Default)]
pub struct MockAdminApi {
    state: Arc<Mutex<MockState>>,
    next_id: Arc<AtomicU64>,
    delay: Option<Duration>,
    return_ids: bool,
}

impl MockAdminApi {
    pub fn new() -> Self {
        Self {
            return_ids: true,
            ..Self::default()
        }
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Behave like a backend whose create responses carry no id
    pub fn without_returned_ids(mut self) -> Self {
        self.return_ids = false;
        self
    }

    /// Make the next call fail with `error`; queued failures fire in order
    pub fn fail_next(&self, error: ApiError) {
        self.lock().failures.push_back(error);
    }

    /// Names of the calls made so far, e.g. `"create_info"`
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn insert_course(&self, id: &str, mut course: Course) {
        course.id = Some(ObjectId::new(id));
        self.lock().courses.insert(id.to_string(), course);
    }

    pub fn insert_info(&self, id: &str, mut info: Info) {
        info.id = Some(ObjectId::new(id));
        self.lock().infos.insert(id.to_string(), info);
    }

    pub fn insert_test(&self, id: &str, test: Test) {
        let kind = test.kind();
        let mut body = test.into_body();
        body.id = Some(ObjectId::new(id));
        self.lock().tests.insert(id.to_string(), Test::new(kind, body));
    }

    pub fn insert_user(&self, id: &str, mut user: User) {
        user.id = Some(ObjectId::new(id));
        self.lock().users.insert(id.to_string(), user);
    }

    pub fn info(&self, id: &str) -> Option<Info> {
        self.lock().infos.get(id).cloned()
    }

    pub fn course(&self, id: &str) -> Option<Course> {
        self.lock().courses.get(id).cloned()
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.lock().users.get(id).cloned()
    }

    pub fn info_count(&self) -> usize {
        self.lock().infos.len()
    }

    pub fn course_count(&self) -> usize {
        self.lock().courses.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // a panicking test must not poison the mock for the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn generate_id(&self) -> String {
        format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Record the call, honour the delay, and pop a queued failure if any
    async fn enter(&self, name: &str) -> ApiResult<()> {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        let mut state = self.lock();
        state.calls.push(name.to_string());
        match state.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn assigned(&self, id: String) -> Option<ObjectId> {
        self.return_ids.then(|| ObjectId::new(id))
    }
}

fn progress_list(progress: &mut UserProgress, item: ProgressItem) -> &mut Vec<String> {
    match item {
        ProgressItem::Course => &mut progress.courses,
        ProgressItem::Test => &mut progress.tests,
        ProgressItem::Info => &mut progress.infos,
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn list_courses(&self) -> ApiResult<Vec<Course>> {
        self.enter("list_courses").await?;
        Ok(self.lock().courses.values().cloned().collect())
    }

    async fn get_course(&self, id: &str) -> ApiResult<Course> {
        self.enter("get_course").await?;
        self.lock()
            .courses
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("course", id))
    }

    async fn create_course(&self, course: &Course) -> ApiResult<Option<ObjectId>> {
        self.enter("create_course").await?;
        let id = self.generate_id();
        let mut stored = course.clone();
        stored.id = Some(ObjectId::new(id.as_str()));
        self.lock().courses.insert(id.clone(), stored);
        Ok(self.assigned(id))
    }

    async fn update_course(&self, id: &str, course: &Course) -> ApiResult<()> {
        self.enter("update_course").await?;
        let mut state = self.lock();
        let stored = state
            .courses
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("course", id))?;
        *stored = course.clone();
        stored.id = Some(ObjectId::new(id));
        Ok(())
    }

    async fn delete_course(&self, id: &str) -> ApiResult<()> {
        self.enter("delete_course").await?;
        self.lock()
            .courses
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("course", id))
    }

    async fn list_infos(&self) -> ApiResult<Vec<Info>> {
        self.enter("list_infos").await?;
        Ok(self.lock().infos.values().cloned().collect())
    }

    async fn get_info(&self, id: &str) -> ApiResult<Info> {
        self.enter("get_info").await?;
        self.lock()
            .infos
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("info", id))
    }

    async fn create_info(&self, info: &Info) -> ApiResult<Option<ObjectId>> {
        self.enter("create_info").await?;
        let id = self.generate_id();
        let mut stored = info.clone();
        stored.id = Some(ObjectId::new(id.as_str()));
        self.lock().infos.insert(id.clone(), stored);
        Ok(self.assigned(id))
    }

    async fn update_info(&self, id: &str, info: &Info) -> ApiResult<()> {
        self.enter("update_info").await?;
        let mut state = self.lock();
        let stored = state
            .infos
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("info", id))?;
        *stored = info.clone();
        stored.id = Some(ObjectId::new(id));
        Ok(())
    }

    async fn delete_info(&self, id: &str) -> ApiResult<()> {
        self.enter("delete_info").await?;
        self.lock()
            .infos
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("info", id))
    }

    async fn list_tests(&self) -> ApiResult<Vec<TaggedTest>> {
        self.enter("list_tests").await?;
        let mut all = AllTests::default();
        for test in self.lock().tests.values() {
            match test {
                Test::ChoiceTest(body) => all.tests.push(body.clone()),
                Test::ActionTest(body) => all.tests_with_actions.push(body.clone()),
            }
        }
        Ok(all.into_tagged())
    }

    async fn get_test(&self, id: &str) -> ApiResult<Test> {
        self.enter("get_test").await?;
        self.lock()
            .tests
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("test", id))
    }

    async fn create_test(&self, test: &Test) -> ApiResult<Option<ObjectId>> {
        self.enter("create_test").await?;
        let id = self.generate_id();
        let mut body = test.body().clone();
        body.id = Some(ObjectId::new(id.as_str()));
        self.lock()
            .tests
            .insert(id.clone(), Test::new(test.kind(), body));
        Ok(self.assigned(id))
    }

    async fn update_test(&self, id: &str, test: &Test) -> ApiResult<()> {
        self.enter("update_test").await?;
        let mut state = self.lock();
        let stored = state
            .tests
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("test", id))?;
        let mut body = test.body().clone();
        body.id = Some(ObjectId::new(id));
        *stored = Test::new(test.kind(), body);
        Ok(())
    }

    async fn delete_test(&self, kind: TestKind, id: &str) -> ApiResult<()> {
        self.enter("delete_test").await?;
        let mut state = self.lock();
        // each kind lives in its own collection on the backend
        let same_kind = state.tests.get(id).is_some_and(|test| test.kind() == kind);
        if !same_kind {
            return Err(ApiError::not_found("test", id));
        }
        state.tests.remove(id);
        Ok(())
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.enter("list_users").await?;
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.enter("get_user").await?;
        self.lock()
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    async fn update_user(&self, id: &str, user: &User) -> ApiResult<()> {
        self.enter("update_user").await?;
        let mut state = self.lock();
        let stored = state
            .users
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("user", id))?;
        *stored = user.clone();
        stored.id = Some(ObjectId::new(id));
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.enter("delete_user").await?;
        self.lock()
            .users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    async fn update_user_progress(&self, id: &str, progress: &UserProgress) -> ApiResult<()> {
        self.enter("update_user_progress").await?;
        let mut state = self.lock();
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("user", id))?;
        user.progress = progress.clone();
        Ok(())
    }

    async fn add_progress(&self, change: &ProgressChange) -> ApiResult<()> {
        self.enter("add_progress").await?;
        let mut state = self.lock();
        let user = state
            .users
            .get_mut(&change.user_id)
            .ok_or_else(|| ApiError::not_found("user", change.user_id.as_str()))?;
        let list = progress_list(&mut user.progress, change.item);
        if !list.contains(&change.item_id) {
            list.push(change.item_id.clone());
        }
        Ok(())
    }

    async fn remove_progress(&self, change: &ProgressChange) -> ApiResult<()> {
        self.enter("remove_progress").await?;
        let mut state = self.lock();
        let user = state
            .users
            .get_mut(&change.user_id)
            .ok_or_else(|| ApiError::not_found("user", change.user_id.as_str()))?;
        progress_list(&mut user.progress, change.item).retain(|id| id != &change.item_id);
        Ok(())
    }
}
