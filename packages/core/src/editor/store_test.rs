//! Tests for TreeEditorStore
//!
//! Tests cover:
//! - Level add/delete with dense reindexing
//! - Node add/delete/edit addressing by position
//! - Silent no-ops on missing targets and the explicit try_* errors
//! - Intents, metadata setters and the session state machine

#[cfg(test)]
mod tests {
    use crate::editor::{
        CourseStore, DocumentMeta, EditIntent, EditorError, Level, LevelSequence, NodeHandle,
        SessionState, TutorialStore,
    };
    use crate::models::{Content, ContentType, CourseNode, ObjectId};

    fn indices(store: &TutorialStore) -> Vec<usize> {
        store.levels().iter().map(Level::index).collect()
    }

    fn positions(store: &TutorialStore, level_index: usize) -> Vec<usize> {
        store
            .level(level_index)
            .map(|level| level.nodes().iter().map(|n| n.position).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_add_level_creates_one_empty_text_node() {
        let mut store = TutorialStore::new();
        assert_eq!(store.add_level(), 0);

        let level = store.level(0).unwrap();
        assert_eq!(level.len(), 1);
        assert_eq!(level.nodes()[0].position, 0);
        assert_eq!(level.nodes()[0].value, Content::text(""));
    }

    #[test]
    fn test_documented_editing_scenario() {
        let mut store = TutorialStore::new();
        store.add_level();
        assert_eq!(store.add_node(0), Some(NodeHandle::new(0, 1)));
        assert_eq!(positions(&store, 0), vec![0, 1]);

        assert!(store.delete_node(0, 0));
        assert_eq!(positions(&store, 0), vec![1]);

        assert_eq!(store.add_level(), 1);
        assert_eq!(indices(&store), vec![0, 1]);

        // deleting the second level keeps the gapped first level as-is
        let mut keep_first = store.clone();
        assert!(keep_first.delete_level(1));
        assert_eq!(indices(&keep_first), vec![0]);
        assert_eq!(positions(&keep_first, 0), vec![1]);

        // deleting the first level renumbers the second one to 0
        assert!(store.delete_level(0));
        assert_eq!(indices(&store), vec![0]);
        assert_eq!(positions(&store, 0), vec![0]);
        assert_eq!(store.level(0).unwrap().nodes()[0].value, Content::text(""));
    }

    #[test]
    fn test_delete_middle_level_closes_gap() {
        let mut store = TutorialStore::new();
        for _ in 0..3 {
            store.add_level();
        }
        store.edit_content(2, 0, ContentType::Text, "third");

        assert!(store.delete_level(1));
        assert_eq!(indices(&store), vec![0, 1]);
        assert_eq!(
            store.level(1).unwrap().nodes()[0].value,
            Content::text("third")
        );
        assert!(store.levels().is_dense());
    }

    #[test]
    fn test_delete_missing_level_is_noop() {
        let mut store = TutorialStore::new();
        store.add_level();
        let revision = store.revision();

        assert!(!store.delete_level(7));
        assert_eq!(store.revision(), revision);
        assert_eq!(
            store.try_delete_level(7),
            Err(EditorError::level_not_found(7))
        );
    }

    #[test]
    fn test_add_node_to_missing_level_is_noop() {
        let mut store = TutorialStore::new();
        assert_eq!(store.add_node(0), None);
        assert!(store.is_empty());
        assert!(store.try_add_node(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_node_after_emptying_level_starts_at_zero() {
        let mut store = TutorialStore::new();
        store.add_level();
        assert!(store.delete_node(0, 0));
        assert!(store.level(0).unwrap().is_empty());

        assert_eq!(store.add_node(0), Some(NodeHandle::new(0, 0)));
    }

    #[test]
    fn test_add_node_never_reuses_surviving_position() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.add_node(0);
        store.add_node(0);
        assert!(store.delete_node(0, 1));

        let handle = store.add_node(0).unwrap();
        assert_eq!(handle.position, 3);
        assert_eq!(positions(&store, 0), vec![0, 2, 3]);
    }

    #[test]
    fn test_delete_node_matches_position_not_offset() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.add_node(0);
        store.add_node(0);
        store.delete_node(0, 0);

        // offset 1 now holds position 2
        assert!(store.delete_node(0, 2));
        assert_eq!(positions(&store, 0), vec![1]);
        assert!(!store.delete_node(0, 2));
    }

    #[test]
    fn test_edit_node_overwrites_type_and_data() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.add_node(0);

        assert!(store.edit_content(0, 1, ContentType::Image, "https://cdn/a.png"));
        let node = store.node(NodeHandle::new(0, 1)).unwrap();
        assert_eq!(node.value, Content::image("https://cdn/a.png"));
    }

    #[test]
    fn test_edit_missing_node_leaves_tree_unchanged() {
        let mut store = TutorialStore::new();
        store.add_level();
        let before = store.levels().clone();
        let revision = store.revision();

        assert!(!store.edit_content(0, 9, "text", "x"));
        assert!(!store.edit_content(4, 0, "text", "x"));
        assert_eq!(store.levels(), &before);
        assert_eq!(store.revision(), revision);

        let err = store
            .try_edit_node(NodeHandle::new(0, 9), Content::text("x"))
            .unwrap_err();
        assert_eq!(err, EditorError::node_not_found(NodeHandle::new(0, 9)));
    }

    #[test]
    fn test_move_level_reorders_and_reindexes() {
        let mut store = TutorialStore::new();
        for label in ["a", "b", "c"] {
            let index = store.add_level();
            store.edit_content(index, 0, "text", label);
        }

        assert!(store.move_level(2, 0));
        let labels: Vec<_> = store
            .levels()
            .iter()
            .map(|level| level.nodes()[0].value.data.clone())
            .collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
        assert_eq!(indices(&store), vec![0, 1, 2]);

        assert!(!store.move_level(5, 0));
    }

    #[test]
    fn test_move_onto_itself_keeps_revision() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.add_level();
        store.add_level();
        let revision = store.revision();

        assert!(store.move_level(1, 1));
        assert!(store.move_level(2, 10));
        store.reindex_levels();
        assert_eq!(store.revision(), revision);
        assert_eq!(indices(&store), vec![0, 1, 2]);

        store.begin_submit();
        assert!(store.complete_submit(revision, None));
        assert_eq!(store.state(), SessionState::Empty);
    }

    #[test]
    fn test_delete_last_level_bumps_revision() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.add_level();
        let revision = store.revision();

        assert!(store.delete_level(1));
        assert!(store.revision() > revision);
    }

    #[test]
    fn test_sort_by_level_index_is_idempotent() {
        let levels = LevelSequence::from_levels(vec![
            Level::from_values(1, vec![Content::text("A")]),
            Level::from_values(0, vec![Content::text("B")]),
        ]);
        let mut store = TutorialStore::new();
        store.replace(DocumentMeta::default(), levels);
        store.sort_by_level_index();
        let once = store.levels().clone();
        store.sort_by_level_index();
        assert_eq!(store.levels(), &once);
        assert_eq!(indices(&store), vec![0, 1]);
    }

    #[test]
    fn test_apply_intents() {
        let mut store = TutorialStore::new();
        assert!(store.apply(EditIntent::AddLevel));
        assert!(store.apply(EditIntent::AddNode(0)));
        assert!(store.apply(EditIntent::EditNode(
            NodeHandle::new(0, 1),
            Content::text("hello")
        )));
        assert!(store.apply(EditIntent::DeleteNode(NodeHandle::new(0, 0))));
        assert!(!store.apply(EditIntent::DeleteLevel(3)));
        assert!(store.apply(EditIntent::AddLevel));
        assert!(store.apply(EditIntent::MoveLevel { from: 1, to: 0 }));

        assert_eq!(store.level(1).unwrap().nodes()[0].value, Content::text("hello"));
        assert!(EditIntent::<Content>::AddLevel.is_structural());
        assert!(!EditIntent::<Content>::AddNode(0).is_structural());
    }

    #[test]
    fn test_metadata_setters() {
        let mut store = TutorialStore::new();
        store.set_title("Fractions");
        store.set_theme("math");
        store.set_id(Some(ObjectId::new("abc")));

        assert_eq!(store.title(), "Fractions");
        assert_eq!(store.theme(), "math");
        assert_eq!(store.id().map(ObjectId::as_str), Some("abc"));

        let mut course = CourseStore::new();
        course.set_description("Intro");
        assert_eq!(course.description(), "Intro");
        course.add_level();
        assert_eq!(course.level(0).unwrap().nodes()[0].value, CourseNode::default());
    }

    #[test]
    fn test_state_transitions() {
        let mut store = TutorialStore::new();
        assert_eq!(store.state(), SessionState::Empty);

        store.add_level();
        assert_eq!(store.state(), SessionState::Populated);

        store.begin_submit();
        assert_eq!(store.state(), SessionState::Submitting);
        store.add_node(0);
        assert_eq!(store.state(), SessionState::Submitting);

        store.fail_submit("HTTP 500".to_string());
        assert_eq!(store.state(), SessionState::Failed);
        assert_eq!(store.last_error(), Some("HTTP 500"));
        assert_eq!(store.level_count(), 1);

        store.set_title("retry");
        assert_eq!(store.state(), SessionState::Populated);
    }

    #[test]
    fn test_complete_submit_resets_only_when_unchanged() {
        let mut store = TutorialStore::new();
        store.add_level();
        let revision = store.revision();
        store.begin_submit();
        assert!(store.complete_submit(revision, None));
        assert_eq!(store.state(), SessionState::Empty);
        assert!(store.is_empty());

        store.add_level();
        let revision = store.revision();
        store.begin_submit();
        store.add_node(0);
        assert!(!store.complete_submit(revision, Some(ObjectId::new("new"))));
        assert_eq!(store.state(), SessionState::Populated);
        assert_eq!(store.id().map(ObjectId::as_str), Some("new"));
        assert_eq!(store.level(0).unwrap().len(), 2);
    }

    #[test]
    fn test_reset_bumps_generation() {
        let mut store = TutorialStore::new();
        store.add_level();
        store.set_title("x");
        let generation = store.generation();

        store.reset();
        assert_eq!(store.generation(), generation + 1);
        assert!(store.is_empty());
        assert_eq!(store.title(), "");
        assert_eq!(store.state(), SessionState::Empty);
    }
}
