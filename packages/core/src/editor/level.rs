//! Levels, Nodes and Handles
//!
//! The editable tree of a course or tutorial is a [`LevelSequence`] of
//! [`Level`]s, each an ordered list of [`EditorNode`]s. A node's `position` is
//! its address inside the level for the lifetime of an editing session; it is
//! not persisted and is not necessarily equal to the node's offset (deleting a
//! node leaves a gap, see [`Level::remove_node`]).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Payload types that can live in a level.
///
/// `Default` is the empty node created by "add level" / "add node".
pub trait LevelNode:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> LevelNode for T where
    T: Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Session-local address of a node.
///
/// This is what a rendered node hands back to the store when the user clicks
/// edit or delete; it replaces per-node callbacks and is never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub level_index: usize,
    pub position: usize,
}

impl NodeHandle {
    pub fn new(level_index: usize, position: usize) -> Self {
        Self {
            level_index,
            position,
        }
    }
}

/// A payload plus its position within the owning level
#[derive(Debug, Clone, PartialEq)]
pub struct EditorNode<T> {
    pub position: usize,
    pub value: T,
}

impl<T> EditorNode<T> {
    pub fn new(position: usize, value: T) -> Self {
        Self { position, value }
    }
}

/// Ordered group of nodes at one step of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Level<T> {
    pub(crate) index: usize,
    pub(crate) nodes: Vec<EditorNode<T>>,
}

impl<T: LevelNode> Level<T> {
    /// New level holding a single empty node at position 0
    pub fn with_default_node(index: usize) -> Self {
        Self {
            index,
            nodes: vec![EditorNode::new(0, T::default())],
        }
    }

    /// Build a level from persisted payloads; positions are their offsets
    pub fn from_values(index: usize, values: Vec<T>) -> Self {
        let nodes = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| EditorNode::new(position, value))
            .collect();
        Self { index, nodes }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn nodes(&self) -> &[EditorNode<T>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of every node, in display order
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.nodes
            .iter()
            .map(move |node| NodeHandle::new(self.index, node.position))
    }

    pub fn node(&self, position: usize) -> Option<&EditorNode<T>> {
        self.nodes.iter().find(|node| node.position == position)
    }

    pub(crate) fn node_mut(&mut self, position: usize) -> Option<&mut EditorNode<T>> {
        self.nodes.iter_mut().find(|node| node.position == position)
    }

    /// Position the next appended node receives: one past the highest
    /// position in use, or 0 for an empty level.
    pub fn next_position(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.position)
            .max()
            .map_or(0, |max| max + 1)
    }

    pub(crate) fn push_default(&mut self) -> usize {
        let position = self.next_position();
        self.nodes.push(EditorNode::new(position, T::default()));
        position
    }

    /// Remove the node whose position equals `position`.
    ///
    /// Sibling positions are left untouched, so a gap may remain. Positions
    /// only address nodes; display order is the vector order.
    pub(crate) fn remove_node(&mut self, position: usize) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.position != position);
        self.nodes.len() != before
    }

    /// Payloads in display order, positions stripped
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().map(|node| &node.value)
    }
}

/// Every level of one document
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSequence<T> {
    levels: Vec<Level<T>>,
}

impl<T> Default for LevelSequence<T> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<T: LevelNode> LevelSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_levels(levels: Vec<Level<T>>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in storage order; call [`sort_by_index`](Self::sort_by_index)
    /// first when display order matters.
    pub fn iter(&self) -> impl Iterator<Item = &Level<T>> {
        self.levels.iter()
    }

    pub fn as_slice(&self) -> &[Level<T>] {
        &self.levels
    }

    pub fn get(&self, level_index: usize) -> Option<&Level<T>> {
        self.levels.iter().find(|level| level.index == level_index)
    }

    pub(crate) fn get_mut(&mut self, level_index: usize) -> Option<&mut Level<T>> {
        self.levels
            .iter_mut()
            .find(|level| level.index == level_index)
    }

    pub(crate) fn push(&mut self, level: Level<T>) {
        self.levels.push(level);
    }

    pub(crate) fn remove(&mut self, level_index: usize) -> bool {
        let before = self.levels.len();
        self.levels.retain(|level| level.index != level_index);
        self.levels.len() != before
    }

    /// Stable ascending sort by level index
    pub fn sort_by_index(&mut self) {
        self.levels.sort_by_key(|level| level.index);
    }

    /// Renumber levels `0..n-1` in their current storage order; true if any index changed
    pub(crate) fn reindex(&mut self) -> bool {
        let mut changed = false;
        for (offset, level) in self.levels.iter_mut().enumerate() {
            changed |= level.index != offset;
            level.index = offset;
        }
        changed
    }

    pub(crate) fn move_level(&mut self, from: usize, to: usize) -> bool {
        if from >= self.levels.len() {
            return false;
        }
        let level = self.levels.remove(from);
        let to = to.min(self.levels.len());
        self.levels.insert(to, level);
        true
    }

    /// True when indices are exactly `0..n-1` in some order
    pub fn is_dense(&self) -> bool {
        let mut indices: Vec<usize> = self.levels.iter().map(|level| level.index).collect();
        indices.sort_unstable();
        indices.iter().enumerate().all(|(i, index)| i == *index)
    }

    pub fn total_nodes(&self) -> usize {
        self.levels.iter().map(Level::len).sum()
    }
}
