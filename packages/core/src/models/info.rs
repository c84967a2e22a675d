//! Tutorial ("info") Documents
//!
//! ```json
//! {
//!   "_id": { "$oid": "..." },
//!   "title": "Adding fractions",
//!   "theme": "fractions",
//!   "content_levels": [
//!     [0, [{ "content_type": "text", "data": "..." },
//!          { "content_type": "image", "data": "https://..." }]]
//!   ]
//! }
//! ```

use crate::models::{Content, ObjectId, WireLevel};
use serde::{Deserialize, Serialize};

/// Tutorial document as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub theme: String,
    pub content_levels: Vec<WireLevel<Content>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_backend_shape() {
        let value = json!({
            "_id": { "$oid": "i1" },
            "title": "Adding fractions",
            "theme": "fractions",
            "content_levels": [
                [1, [{ "content_type": "text", "data": "A" }]],
                [0, [{ "content_type": "image", "data": "b.png" }]]
            ]
        });
        let info: Info = serde_json::from_value(value).unwrap();
        assert_eq!(info.id, Some(ObjectId::new("i1")));
        assert_eq!(info.content_levels[0].index(), 1);
        assert_eq!(info.content_levels[1].nodes()[0], Content::image("b.png"));
    }

    #[test]
    fn test_serializes_without_id_when_new() {
        let info = Info {
            title: "T".into(),
            theme: "t".into(),
            content_levels: vec![WireLevel(0, vec![Content::text("")])],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "title": "T",
                "theme": "t",
                "content_levels": [[0, [{ "content_type": "text", "data": "" }]]]
            })
        );
    }

    #[test]
    fn test_missing_content_levels_is_error() {
        let value = json!({ "title": "T", "theme": "t" });
        assert!(serde_json::from_value::<Info>(value).is_err());
    }
}
