//! Tree Editor Store
//!
//! [`TreeEditorStore`] owns one document's editable tree and metadata for the
//! duration of an editing session. It is an ordinary value: one instance per
//! open editor, handed to whoever needs it, with every structural change going
//! through its methods.
//!
//! # Invariants
//!
//! - After every structural change level indices are exactly `0..n-1`.
//! - A node added to a level gets `max(position) + 1` (or 0), so it never
//!   collides with a surviving node even after deletions left gaps.
//! - A mutation whose target does not exist changes nothing.
//!
//! # Examples
//!
//! ```rust
//! use funle_admin_core::editor::TutorialStore;
//! use funle_admin_core::models::ContentType;
//!
//! let mut store = TutorialStore::new();
//! store.add_level();
//! store.add_node(0);
//! store.edit_content(0, 1, ContentType::Image, "https://cdn/x.png");
//! assert_eq!(store.levels().total_nodes(), 2);
//! ```

use crate::editor::{EditIntent, EditorError, EditorNode, Level, LevelNode, LevelSequence, NodeHandle};
use crate::models::{Content, ContentType, CourseNode, ObjectId};

/// Per-session lifecycle
///
/// `Empty -> Populated -> Submitting -> (Empty | Failed)`. Editing is allowed
/// in every state; the tree is never locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Populated,
    Submitting,
    /// Last submit failed; the tree is kept as it was
    Failed,
}

/// Document metadata shared by courses and tutorials
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentMeta {
    /// `None` until the backend has assigned an id
    pub id: Option<ObjectId>,
    pub title: String,
    /// Description for courses, theme for tutorials
    pub descriptor: String,
}

#[derive(Debug, Clone)]
pub struct TreeEditorStore<T> {
    meta: DocumentMeta,
    levels: LevelSequence<T>,
    state: SessionState,
    /// Bumped by every applied mutation
    revision: u64,
    /// Bumped by reset and load; submits started under an older generation
    /// no longer affect this store
    generation: u64,
    last_error: Option<String>,
}

impl<T: LevelNode> Default for TreeEditorStore<T> {
    fn default() -> Self {
        Self {
            meta: DocumentMeta::default(),
            levels: LevelSequence::new(),
            state: SessionState::Empty,
            revision: 0,
            generation: 0,
            last_error: None,
        }
    }
}

/// Store for tutorial ("info") content trees
pub type TutorialStore = TreeEditorStore<Content>;

/// Store for course trees
pub type CourseStore = TreeEditorStore<CourseNode>;

impl<T: LevelNode> TreeEditorStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a loaded document
    pub fn from_parts(meta: DocumentMeta, levels: LevelSequence<T>) -> Self {
        let mut store = Self::new();
        store.replace(meta, levels);
        store
    }

    //
    // ACCESSORS
    //

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    pub fn id(&self) -> Option<&ObjectId> {
        self.meta.id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn descriptor(&self) -> &str {
        &self.meta.descriptor
    }

    pub fn levels(&self) -> &LevelSequence<T> {
        &self.levels
    }

    pub fn level(&self, level_index: usize) -> Option<&Level<T>> {
        self.levels.get(level_index)
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&EditorNode<T>> {
        self.levels
            .get(handle.level_index)
            .and_then(|level| level.node(handle.position))
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Message of the last failed submit, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    //
    // METADATA
    //

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.meta.title = title.into();
        self.touch();
    }

    pub fn set_descriptor(&mut self, descriptor: impl Into<String>) {
        self.meta.descriptor = descriptor.into();
        self.touch();
    }

    pub fn set_id(&mut self, id: Option<ObjectId>) {
        self.meta.id = id;
        self.touch();
    }

    //
    // STRUCTURE
    //

    /// Append a level holding one empty node; returns its index
    pub fn add_level(&mut self) -> usize {
        let index = self.levels.len();
        self.levels.push(Level::with_default_node(index));
        self.touch();
        index
    }

    /// Remove a level and close the gap. Returns false if it did not exist.
    pub fn delete_level(&mut self, level_index: usize) -> bool {
        self.try_delete_level(level_index)
            .map_err(|e| tracing::debug!("delete_level ignored: {}", e))
            .is_ok()
    }

    pub fn try_delete_level(&mut self, level_index: usize) -> Result<(), EditorError> {
        if !self.levels.remove(level_index) {
            return Err(EditorError::level_not_found(level_index));
        }
        self.levels.reindex();
        self.touch();
        Ok(())
    }

    /// Move the level at display index `from` to display index `to` (clamped
    /// to the end), then renumber. Moving a level onto itself is not an edit.
    pub fn move_level(&mut self, from: usize, to: usize) -> bool {
        self.levels.sort_by_index();
        if !self.levels.move_level(from, to) {
            tracing::debug!("move_level ignored: level {} does not exist", from);
            return false;
        }
        self.reindex_levels();
        true
    }

    /// Renumber levels `0..n-1`, keeping their relative display order.
    /// The revision only moves when an index actually changed.
    pub fn reindex_levels(&mut self) {
        self.levels.sort_by_index();
        if self.levels.reindex() {
            self.touch();
        }
    }

    /// Sort levels ascending by index; idempotent. Call before rendering.
    pub fn sort_by_level_index(&mut self) {
        self.levels.sort_by_index();
    }

    //
    // NODES
    //

    /// Append an empty node to a level
    pub fn add_node(&mut self, level_index: usize) -> Option<NodeHandle> {
        self.try_add_node(level_index)
            .map_err(|e| tracing::debug!("add_node ignored: {}", e))
            .ok()
    }

    pub fn try_add_node(&mut self, level_index: usize) -> Result<NodeHandle, EditorError> {
        let level = self
            .levels
            .get_mut(level_index)
            .ok_or_else(|| EditorError::level_not_found(level_index))?;
        let position = level.push_default();
        self.touch();
        Ok(NodeHandle::new(level_index, position))
    }

    /// Remove the node with this position; remaining positions are kept
    pub fn delete_node(&mut self, level_index: usize, position: usize) -> bool {
        self.try_delete_node(NodeHandle::new(level_index, position))
            .map_err(|e| tracing::debug!("delete_node ignored: {}", e))
            .is_ok()
    }

    pub fn try_delete_node(&mut self, handle: NodeHandle) -> Result<(), EditorError> {
        let level = self
            .levels
            .get_mut(handle.level_index)
            .ok_or_else(|| EditorError::level_not_found(handle.level_index))?;
        if !level.remove_node(handle.position) {
            return Err(EditorError::node_not_found(handle));
        }
        self.touch();
        Ok(())
    }

    /// Overwrite a node's payload
    pub fn edit_node(&mut self, level_index: usize, position: usize, value: T) -> bool {
        self.try_edit_node(NodeHandle::new(level_index, position), value)
            .map_err(|e| tracing::debug!("edit_node ignored: {}", e))
            .is_ok()
    }

    pub fn try_edit_node(&mut self, handle: NodeHandle, value: T) -> Result<(), EditorError> {
        let node = self
            .levels
            .get_mut(handle.level_index)
            .ok_or_else(|| EditorError::level_not_found(handle.level_index))?
            .node_mut(handle.position)
            .ok_or_else(|| EditorError::node_not_found(handle))?;
        node.value = value;
        self.touch();
        Ok(())
    }

    /// Apply a user intent; returns whether anything changed
    pub fn apply(&mut self, intent: EditIntent<T>) -> bool {
        match intent {
            EditIntent::AddLevel => {
                self.add_level();
                true
            }
            EditIntent::DeleteLevel(level_index) => self.delete_level(level_index),
            EditIntent::MoveLevel { from, to } => self.move_level(from, to),
            EditIntent::AddNode(level_index) => self.add_node(level_index).is_some(),
            EditIntent::DeleteNode(handle) => self.delete_node(handle.level_index, handle.position),
            EditIntent::EditNode(handle, value) => {
                self.edit_node(handle.level_index, handle.position, value)
            }
        }
    }

    //
    // LIFECYCLE
    //

    /// Clear everything back to the initial empty state
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::new();
        self.generation = generation;
    }

    /// Swap in a freshly loaded document in one step
    pub fn replace(&mut self, meta: DocumentMeta, levels: LevelSequence<T>) {
        self.meta = meta;
        self.levels = levels;
        self.levels.sort_by_index();
        self.state = SessionState::Populated;
        self.last_error = None;
        self.revision += 1;
        self.generation += 1;
    }

    pub(crate) fn begin_submit(&mut self) {
        self.state = SessionState::Submitting;
        self.last_error = None;
    }

    /// A submit started at `revision` succeeded. If nothing was edited since,
    /// the session is done and resets; otherwise the newer edits stay for the
    /// next submit.
    pub(crate) fn complete_submit(&mut self, revision: u64, assigned_id: Option<ObjectId>) -> bool {
        if self.revision == revision {
            self.reset();
            return true;
        }
        if assigned_id.is_some() && self.meta.id.is_none() {
            self.meta.id = assigned_id;
        }
        self.state = SessionState::Populated;
        false
    }

    /// Forget an in-flight submit; its result will be treated as stale
    pub(crate) fn abandon_submit(&mut self) {
        if self.state == SessionState::Submitting {
            self.state = SessionState::Populated;
            self.generation += 1;
        }
    }

    pub(crate) fn fail_submit(&mut self, message: String) {
        self.state = SessionState::Failed;
        self.last_error = Some(message);
    }

    fn touch(&mut self) {
        self.revision += 1;
        if matches!(self.state, SessionState::Empty | SessionState::Failed) {
            self.state = SessionState::Populated;
        }
    }
}

impl TreeEditorStore<Content> {
    pub fn theme(&self) -> &str {
        self.descriptor()
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.set_descriptor(theme);
    }

    /// Overwrite both fields of a tutorial node
    pub fn edit_content(
        &mut self,
        level_index: usize,
        position: usize,
        content_type: impl Into<ContentType>,
        data: impl Into<String>,
    ) -> bool {
        self.edit_node(level_index, position, Content::new(content_type, data))
    }
}

impl TreeEditorStore<CourseNode> {
    pub fn description(&self) -> &str {
        self.descriptor()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set_descriptor(description);
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
