//! Wire Codec for Leveled Documents
//!
//! Converts between the editor's [`LevelSequence`] and the backend's list of
//! `[levelIndex, [node, ...]]` pairs.
//!
//! - **Outbound** levels are emitted in ascending index order with positions
//!   stripped; payloads are serialized as-is.
//! - **Inbound** levels may arrive in any order. Each node's position is its
//!   offset in the inbound list. Duplicate indices are rejected; sparse indices
//!   are compacted so the loaded tree is dense.
//!
//! Decoding either fully succeeds or returns
//! [`EditorError::MalformedDocument`]; a store is never partially filled.

use crate::editor::{DocumentMeta, EditorError, Level, LevelNode, LevelSequence, TreeEditorStore};
use crate::models::{Content, Course, CourseNode, Info, WireLevel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

/// Outbound: sorted `[index, [payload...]]` pairs
pub fn to_wire_levels<T: LevelNode>(levels: &LevelSequence<T>) -> Vec<WireLevel<T>> {
    let mut wire: Vec<WireLevel<T>> = levels
        .iter()
        .map(|level| WireLevel(level.index(), level.values().cloned().collect()))
        .collect();
    wire.sort_by_key(|level| level.0);
    wire
}

/// Inbound: rebuild a dense, display-sorted level sequence
pub fn from_wire_levels<T: LevelNode>(
    document: &'static str,
    wire: Vec<WireLevel<T>>,
) -> Result<LevelSequence<T>, EditorError> {
    let mut seen = HashSet::with_capacity(wire.len());
    for level in &wire {
        if !seen.insert(level.0) {
            return Err(EditorError::malformed(
                document,
                format!("duplicate level index {}", level.0),
            ));
        }
    }

    let mut levels = LevelSequence::from_levels(
        wire.into_iter()
            .map(|WireLevel(index, values)| Level::from_values(index, values))
            .collect(),
    );
    levels.sort_by_index();
    if !levels.is_dense() {
        tracing::debug!("compacting sparse level indices of {} document", document);
        levels.reindex();
    }
    Ok(levels)
}

/// Decode a raw JSON body, mapping shape errors to `MalformedDocument`
pub fn decode_document<D: DeserializeOwned>(
    document: &'static str,
    value: serde_json::Value,
) -> Result<D, EditorError> {
    serde_json::from_value(value).map_err(|e| EditorError::malformed(document, e.to_string()))
}

/// A backend document whose body is a level sequence plus metadata
pub trait LeveledDocument: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Node: LevelNode;

    /// Short name used in errors and logs ("info", "course")
    const NAME: &'static str;

    /// Snapshot a store into the wire document
    fn from_store(store: &TreeEditorStore<Self::Node>) -> Self;

    /// Split into metadata and validated levels
    fn into_parts(self) -> Result<(DocumentMeta, LevelSequence<Self::Node>), EditorError>;

    /// Build a fully populated store, or fail without side effects
    fn into_store(self) -> Result<TreeEditorStore<Self::Node>, EditorError> {
        let (meta, levels) = self.into_parts()?;
        Ok(TreeEditorStore::from_parts(meta, levels))
    }
}

impl LeveledDocument for Info {
    type Node = Content;
    const NAME: &'static str = "info";

    fn from_store(store: &TreeEditorStore<Content>) -> Self {
        Info {
            id: store.id().cloned(),
            title: store.title().to_string(),
            theme: store.theme().to_string(),
            content_levels: to_wire_levels(store.levels()),
        }
    }

    fn into_parts(self) -> Result<(DocumentMeta, LevelSequence<Content>), EditorError> {
        let levels = from_wire_levels(Self::NAME, self.content_levels)?;
        let meta = DocumentMeta {
            id: self.id,
            title: self.title,
            descriptor: self.theme,
        };
        Ok((meta, levels))
    }
}

impl LeveledDocument for Course {
    type Node = CourseNode;
    const NAME: &'static str = "course";

    fn from_store(store: &TreeEditorStore<CourseNode>) -> Self {
        Course {
            id: store.id().cloned(),
            title: store.title().to_string(),
            description: store.description().to_string(),
            levels: to_wire_levels(store.levels()),
        }
    }

    fn into_parts(self) -> Result<(DocumentMeta, LevelSequence<CourseNode>), EditorError> {
        let levels = from_wire_levels(Self::NAME, self.levels)?;
        let meta = DocumentMeta {
            id: self.id,
            title: self.title,
            descriptor: self.description,
        };
        Ok((meta, levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{CourseStore, TutorialStore};
    use crate::models::{ContentType, ObjectId};
    use serde_json::json;

    #[test]
    fn test_inbound_unsorted_levels_display_sorted() {
        let value = json!({
            "_id": { "$oid": "i1" },
            "title": "T",
            "theme": "t",
            "content_levels": [
                [1, [{ "content_type": "text", "data": "A" }]],
                [0, [{ "content_type": "text", "data": "B" }]]
            ]
        });
        let info: Info = decode_document("info", value).unwrap();
        let store = info.into_store().unwrap();

        let display: Vec<_> = store
            .levels()
            .iter()
            .map(|level| (level.index(), level.nodes()[0].value.data.clone()))
            .collect();
        assert_eq!(display, vec![(0, "B".to_string()), (1, "A".to_string())]);
        assert_eq!(store.id(), Some(&ObjectId::new("i1")));
        assert_eq!(store.theme(), "t");
    }

    #[test]
    fn test_inbound_positions_are_offsets() {
        let wire = vec![WireLevel(
            0,
            vec![Content::text("a"), Content::image("b"), Content::text("c")],
        )];
        let levels = from_wire_levels("info", wire).unwrap();
        let positions: Vec<_> = levels.as_slice()[0].nodes().iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_outbound_strips_positions_and_sorts() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.add_level();
        store.add_node(0);
        store.delete_node(0, 0);
        store.edit_content(0, 1, ContentType::Image, "x.png");
        store.move_level(1, 0);

        let value = serde_json::to_value(Info::from_store(&store)).unwrap();
        assert_eq!(
            value["content_levels"],
            json!([
                [0, [{ "content_type": "text", "data": "" }]],
                [1, [{ "content_type": "image", "data": "x.png" }]]
            ])
        );
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let mut store = CourseStore::new();
        store.set_title("Course");
        store.set_description("Desc");
        store.add_level();
        store.add_level();
        store.edit_node(0, 0, CourseNode::info("Intro", "i1"));
        store.add_node(1);
        store.edit_node(1, 1, CourseNode::tests("Quiz", vec!["t1".into()], 1));

        let json = serde_json::to_value(Course::from_store(&store)).unwrap();
        let loaded = decode_document::<Course>("course", json)
            .unwrap()
            .into_store()
            .unwrap();

        assert_eq!(to_wire_levels(loaded.levels()), to_wire_levels(store.levels()));
        assert_eq!(loaded.title(), "Course");
        assert_eq!(loaded.description(), "Desc");
    }

    #[test]
    fn test_duplicate_level_index_is_malformed() {
        let wire = vec![
            WireLevel(0, vec![Content::text("a")]),
            WireLevel(0, vec![Content::text("b")]),
        ];
        let err = from_wire_levels("info", wire).unwrap_err();
        assert_eq!(err, EditorError::malformed("info", "duplicate level index 0"));
    }

    #[test]
    fn test_sparse_indices_are_compacted() {
        let wire = vec![
            WireLevel(5, vec![Content::text("late")]),
            WireLevel(2, vec![Content::text("early")]),
        ];
        let levels = from_wire_levels("info", wire).unwrap();
        let result: Vec<_> = levels
            .iter()
            .map(|level| (level.index(), level.nodes()[0].value.data.clone()))
            .collect();
        assert_eq!(
            result,
            vec![(0, "early".to_string()), (1, "late".to_string())]
        );
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        let cases = [
            json!({ "title": "T", "theme": "t", "content_levels": [[0]] }),
            json!({ "title": "T", "theme": "t", "content_levels": [["x", []]] }),
            json!({ "title": "T", "theme": "t", "content_levels": [[0, [{ "data": "x" }]]] }),
            json!({ "title": "T", "theme": "t", "content_levels": [[0, [{ "content_type": "text" }]]] }),
            json!({ "title": "T", "theme": "t", "content_levels": {} }),
        ];
        for case in cases {
            let err = decode_document::<Info>("info", case).unwrap_err();
            assert!(matches!(err, EditorError::MalformedDocument { document: "info", .. }));
        }
    }

    #[test]
    fn test_course_test_node_without_count_is_malformed() {
        let value = json!({
            "title": "C",
            "description": "D",
            "levels": [[0, [{ "title": "Quiz", "type_": "test", "n_of_tests": "None" }]]]
        });
        let err = decode_document::<Course>("course", value).unwrap_err();
        assert!(err.to_string().contains("n_of_tests"));
    }
}
