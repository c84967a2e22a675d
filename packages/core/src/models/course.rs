//! Course Documents
//!
//! A course is a level sequence whose nodes point at other entities: either a
//! single tutorial (`info`) or a group of tests. Test nodes additionally carry
//! how many tests the learner must pass.
//!
//! # Wire Shape
//!
//! ```json
//! {
//!   "_id": { "$oid": "..." },
//!   "title": "Fractions",
//!   "description": "Intro course",
//!   "levels": [
//!     [0, [{ "id": "..", "title": "..", "mini_image": "..", "ids": [],
//!            "type_": "test", "n_of_tests": 3 }]]
//!   ]
//! }
//! ```
//!
//! Info nodes send `"n_of_tests": "None"`.

use crate::models::{ObjectId, ValidationError, WireLevel};
use serde::{Deserialize, Serialize};

/// What a course node references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseNodeKind {
    /// A single tutorial
    #[default]
    Info,
    /// A group of tests, of which `n_of_tests` are presented
    Test { n_of_tests: u32 },
}

impl CourseNodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseNodeKind::Info => "info",
            CourseNodeKind::Test { .. } => "test",
        }
    }
}

/// One node of a course level
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CourseNodeWire", into = "CourseNodeWire")]
pub struct CourseNode {
    pub id: String,
    pub title: String,
    pub mini_image: String,
    /// Ids of the referenced info item or tests
    pub ids: Vec<String>,
    pub kind: CourseNodeKind,
}

impl CourseNode {
    pub fn info(title: impl Into<String>, info_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ids: vec![info_id.into()],
            ..Default::default()
        }
    }

    pub fn tests(title: impl Into<String>, test_ids: Vec<String>, n_of_tests: u32) -> Self {
        Self {
            title: title.into(),
            ids: test_ids,
            kind: CourseNodeKind::Test { n_of_tests },
            ..Default::default()
        }
    }

    pub fn n_of_tests(&self) -> Option<u32> {
        match self.kind {
            CourseNodeKind::Test { n_of_tests } => Some(n_of_tests),
            CourseNodeKind::Info => None,
        }
    }
}

/// `n_of_tests` is either a count or the literal string `"None"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TestCount {
    Count(u32),
    Absent(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CourseNodeWire {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    mini_image: String,
    #[serde(default)]
    ids: Vec<String>,
    type_: String,
    #[serde(default)]
    n_of_tests: Option<TestCount>,
}

impl TryFrom<CourseNodeWire> for CourseNode {
    type Error = ValidationError;

    fn try_from(wire: CourseNodeWire) -> Result<Self, Self::Error> {
        let kind = match wire.type_.as_str() {
            "info" => CourseNodeKind::Info,
            "test" => match wire.n_of_tests {
                Some(TestCount::Count(n_of_tests)) => CourseNodeKind::Test { n_of_tests },
                _ => {
                    return Err(ValidationError::MissingField(format!(
                        "n_of_tests for test node '{}'",
                        wire.title
                    )))
                }
            },
            other => return Err(ValidationError::InvalidNodeKind(other.to_string())),
        };

        Ok(CourseNode {
            id: wire.id,
            title: wire.title,
            mini_image: wire.mini_image,
            ids: wire.ids,
            kind,
        })
    }
}

impl From<CourseNode> for CourseNodeWire {
    fn from(node: CourseNode) -> Self {
        let n_of_tests = match node.kind {
            CourseNodeKind::Test { n_of_tests } => TestCount::Count(n_of_tests),
            CourseNodeKind::Info => TestCount::Absent("None".to_string()),
        };
        CourseNodeWire {
            id: node.id,
            title: node.title,
            mini_image: node.mini_image,
            ids: node.ids,
            type_: node.kind.as_str().to_string(),
            n_of_tests: Some(n_of_tests),
        }
    }
}

/// Course document as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Course {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub levels: Vec<WireLevel<CourseNode>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_node_serializes_none_count() {
        let node = CourseNode::info("Intro", "info-1");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type_"], "info");
        assert_eq!(value["n_of_tests"], "None");
        assert_eq!(value["ids"], json!(["info-1"]));
    }

    #[test]
    fn test_test_node_round_trips_count() {
        let node = CourseNode::tests("Quiz", vec!["t1".into(), "t2".into()], 2);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["n_of_tests"], 2);

        let back: CourseNode = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.n_of_tests(), Some(2));
    }

    #[test]
    fn test_test_node_requires_count() {
        let missing = json!({ "title": "Quiz", "type_": "test" });
        let err = serde_json::from_value::<CourseNode>(missing).unwrap_err();
        assert!(err.to_string().contains("n_of_tests"));

        let none = json!({ "title": "Quiz", "type_": "test", "n_of_tests": "None" });
        assert!(serde_json::from_value::<CourseNode>(none).is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let value = json!({ "title": "X", "type_": "video" });
        let err = serde_json::from_value::<CourseNode>(value).unwrap_err();
        assert!(err.to_string().contains("video"));
    }

    #[test]
    fn test_course_omits_missing_id() {
        let course = Course {
            title: "Fractions".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&course).unwrap();
        assert!(value.get("_id").is_none());
        assert_eq!(value["levels"], json!([]));
    }

    #[test]
    fn test_course_accepts_plain_id_alias() {
        let value = json!({
            "id": { "$oid": "c1" },
            "title": "T",
            "description": "D",
            "levels": [[0, [{ "type_": "info", "n_of_tests": "None" }]]]
        });
        let course: Course = serde_json::from_value(value).unwrap();
        assert_eq!(course.id, Some(ObjectId::new("c1")));
        assert_eq!(course.levels.len(), 1);
        assert_eq!(course.levels[0].1[0].kind, CourseNodeKind::Info);
    }
}
