//! Editor Session
//!
//! Binds one [`TreeEditorStore`] to the backend for the create, fetch and
//! update flows of a course or tutorial.
//!
//! # Submitting without blocking edits
//!
//! A submit runs in three phases so the tree stays editable while the request
//! is in flight:
//!
//! 1. [`EditorSession::begin_submit`] snapshots the document and returns an
//!    owned [`SubmitTicket`].
//! 2. [`SubmitTicket::send`] performs the request; it borrows nothing from
//!    the session.
//! 3. [`EditorSession::finish_submit`] applies the [`SubmitOutcome`].
//!
//! A successful submit resets the session, unless the tree was edited while
//! the request was in flight; then the edits stay for the next submit. An
//! outcome from before a reset or reload is ignored.
//!
//! # Examples
//!
//! ```rust
//! use funle_admin_core::client::MockAdminApi;
//! use funle_admin_core::services::{SubmitStatus, TutorialSession};
//!
//! # tokio_test::block_on(async {
//! let api = MockAdminApi::new();
//! let mut session = TutorialSession::new();
//! session.store_mut().set_title("Fractions");
//! session.store_mut().add_level();
//!
//! let status = session.submit(&api).await.unwrap();
//! assert!(matches!(status, SubmitStatus::Completed { .. }));
//! assert!(session.store().is_empty());
//! # });
//! ```

use crate::client::{AdminApi, ApiError};
use crate::editor::{EditIntent, LeveledDocument, SessionState, TreeEditorStore};
use crate::models::{Course, Info, ObjectId};
use crate::services::{RemoteDocument, SessionError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Session editing a tutorial
pub type TutorialSession = EditorSession<Info>;

/// Session editing a course
pub type CourseSession = EditorSession<Course>;

/// Which endpoint a submit goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(ObjectId),
}

/// What `finish_submit` did with a successful outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Saved and the session was reset
    Completed { id: Option<ObjectId> },
    /// Saved, but edits made meanwhile were kept for the next submit
    Retained { id: Option<ObjectId> },
    /// Session was reset or reloaded since the ticket was issued
    Stale,
}

/// Owned snapshot of a document on its way to the backend
#[derive(Debug, Clone)]
pub struct SubmitTicket<D> {
    session_id: Uuid,
    document: D,
    mode: SubmitMode,
    generation: u64,
    revision: u64,
}

impl<D: RemoteDocument> SubmitTicket<D> {
    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn mode(&self) -> &SubmitMode {
        &self.mode
    }

    /// Perform the request
    pub async fn send(self, api: &dyn AdminApi) -> SubmitOutcome {
        let result = match &self.mode {
            SubmitMode::Create => D::create(api, &self.document).await,
            SubmitMode::Update(id) => D::update(api, id.as_str(), &self.document)
                .await
                .map(|_| Some(id.clone())),
        };
        SubmitOutcome {
            session_id: self.session_id,
            mode: self.mode,
            generation: self.generation,
            revision: self.revision,
            result,
        }
    }
}

/// Result of [`SubmitTicket::send`], applied with `finish_submit`
#[derive(Debug)]
pub struct SubmitOutcome {
    session_id: Uuid,
    mode: SubmitMode,
    generation: u64,
    revision: u64,
    result: Result<Option<ObjectId>, ApiError>,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct EditorSession<D: LeveledDocument> {
    id: Uuid,
    store: TreeEditorStore<D::Node>,
    last_submitted_at: Option<DateTime<Utc>>,
}

impl<D: RemoteDocument> Default for EditorSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: RemoteDocument> EditorSession<D> {
    pub fn new() -> Self {
        Self::with_store(TreeEditorStore::new())
    }

    pub fn with_store(store: TreeEditorStore<D::Node>) -> Self {
        Self {
            id: Uuid::new_v4(),
            store,
            last_submitted_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &TreeEditorStore<D::Node> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TreeEditorStore<D::Node> {
        &mut self.store
    }

    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    /// Time of the last successful submit
    pub fn last_submitted_at(&self) -> Option<DateTime<Utc>> {
        self.last_submitted_at
    }

    pub fn apply(&mut self, intent: EditIntent<D::Node>) -> bool {
        self.store.apply(intent)
    }

    /// Current tree as the wire document
    pub fn snapshot(&self) -> D {
        D::from_store(&self.store)
    }

    //
    // LOADING
    //

    /// Fetch a document and replace the tree with it
    ///
    /// The store is only touched once the whole document decoded; on error
    /// the previous tree is kept.
    pub async fn load(&mut self, api: &dyn AdminApi, id: &str) -> Result<(), SessionError> {
        tracing::debug!(session_id = %self.id, "Fetching {} {}", D::NAME, id);
        let document = D::fetch(api, id).await?;
        self.load_document(document)?;
        tracing::info!(session_id = %self.id, "Loaded {} {}", D::NAME, id);
        Ok(())
    }

    /// Replace the tree with an already fetched document
    pub fn load_document(&mut self, document: D) -> Result<(), SessionError> {
        let (meta, levels) = document.into_parts()?;
        self.store.replace(meta, levels);
        Ok(())
    }

    /// Drop everything; in-flight submits become stale
    pub fn reset(&mut self) {
        self.store.reset();
    }

    //
    // SUBMITTING
    //

    /// Update when the document has an id, create otherwise
    pub fn begin_submit(&mut self) -> Result<SubmitTicket<D>, SessionError> {
        let mode = match self.store.id() {
            Some(id) => SubmitMode::Update(id.clone()),
            None => SubmitMode::Create,
        };
        self.begin(mode)
    }

    /// Always create a new document, even if this one has an id
    pub fn begin_create(&mut self) -> Result<SubmitTicket<D>, SessionError> {
        self.begin(SubmitMode::Create)
    }

    /// Update the existing document; fails if it has no id yet
    pub fn begin_update(&mut self) -> Result<SubmitTicket<D>, SessionError> {
        let id = self
            .store
            .id()
            .cloned()
            .ok_or_else(|| SessionError::missing_id(D::NAME))?;
        self.begin(SubmitMode::Update(id))
    }

    fn begin(&mut self, mode: SubmitMode) -> Result<SubmitTicket<D>, SessionError> {
        match self.store.state() {
            SessionState::Submitting => return Err(SessionError::SubmitInProgress),
            SessionState::Empty => return Err(SessionError::nothing_to_submit(D::NAME)),
            SessionState::Populated | SessionState::Failed => {}
        }

        let ticket = SubmitTicket {
            session_id: self.id,
            document: D::from_store(&self.store),
            mode,
            generation: self.store.generation(),
            revision: self.store.revision(),
        };
        self.store.begin_submit();
        tracing::debug!(
            session_id = %self.id,
            "Submitting {} ({:?}) at revision {}",
            D::NAME,
            ticket.mode,
            ticket.revision
        );
        Ok(ticket)
    }

    /// Give up on an in-flight submit so another one can start
    pub fn abandon_submit(&mut self) {
        self.store.abandon_submit();
    }

    /// Apply the result of a sent ticket
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) -> Result<SubmitStatus, SessionError> {
        if outcome.session_id != self.id || outcome.generation != self.store.generation() {
            tracing::debug!(session_id = %self.id, "Ignoring stale {} submit", D::NAME);
            return Ok(SubmitStatus::Stale);
        }

        match outcome.result {
            Ok(id) => {
                self.last_submitted_at = Some(Utc::now());
                let id = id.or_else(|| match outcome.mode {
                    SubmitMode::Update(existing) => Some(existing),
                    SubmitMode::Create => None,
                });
                if self.store.complete_submit(outcome.revision, id.clone()) {
                    tracing::info!(session_id = %self.id, "Saved {}", D::NAME);
                    Ok(SubmitStatus::Completed { id })
                } else {
                    tracing::info!(
                        session_id = %self.id,
                        "Saved {}; keeping edits made during submit",
                        D::NAME
                    );
                    Ok(SubmitStatus::Retained { id })
                }
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, "Submitting {} failed: {}", D::NAME, e);
                self.store.fail_submit(e.to_string());
                Err(SessionError::Api(e))
            }
        }
    }

    /// All three phases back to back
    pub async fn submit(&mut self, api: &dyn AdminApi) -> Result<SubmitStatus, SessionError> {
        let ticket = self.begin_submit()?;
        let outcome = ticket.send(api).await;
        self.finish_submit(outcome)
    }

    /// Update the existing document in one go
    pub async fn update(&mut self, api: &dyn AdminApi) -> Result<SubmitStatus, SessionError> {
        let ticket = self.begin_update()?;
        let outcome = ticket.send(api).await;
        self.finish_submit(outcome)
    }
}

#[cfg(test)]
#[path = "editor_session_test.rs"]
mod editor_session_test;
