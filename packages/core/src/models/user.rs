//! Users and Learning Progress

use crate::models::{ObjectId, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    User,
    Student,
    Teacher,
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(UserRole::User),
            "Student" => Ok(UserRole::Student),
            "Teacher" => Ok(UserRole::Teacher),
            other => Err(ValidationError::InvalidField(format!("unknown role '{}'", other))),
        }
    }
}

/// Ids of the courses, tests and infos a user has joined or passed
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProgress {
    // the backend spells the key both ways
    #[serde(default, alias = "cources")]
    pub courses: Vec<String>,
    #[serde(default)]
    pub tests: Vec<String>,
    #[serde(default)]
    pub infos: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub role: UserRole,
    #[serde(default)]
    pub progress: UserProgress,
}

/// Which progress list a membership change targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressItem {
    Course,
    Test,
    Info,
}

impl ProgressItem {
    /// Path segment used by `/admin/{add|remove}/{segment}/user`
    pub fn path_segment(&self) -> &'static str {
        match self {
            ProgressItem::Course => "cource",
            ProgressItem::Test => "test",
            ProgressItem::Info => "info",
        }
    }

    /// Name of the id field in the request body
    pub fn id_field(&self) -> &'static str {
        match self {
            ProgressItem::Course => "cource_id",
            ProgressItem::Test => "test_id",
            ProgressItem::Info => "info_id",
        }
    }
}

/// Body of the add/remove progress endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressChange {
    pub item: ProgressItem,
    pub item_id: String,
    pub user_id: String,
}

impl ProgressChange {
    pub fn new(item: ProgressItem, item_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            item,
            item_id: item_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(
            self.item.id_field().to_string(),
            serde_json::Value::String(self.item_id.clone()),
        );
        body.insert(
            "user_id".to_string(),
            serde_json::Value::String(self.user_id.clone()),
        );
        serde_json::Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_from_str() {
        assert_eq!("Teacher".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert!("Admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_progress_accepts_legacy_key() {
        let progress: UserProgress =
            serde_json::from_value(json!({ "cources": ["c1"], "tests": [], "infos": ["i1"] }))
                .unwrap();
        assert_eq!(progress.courses, vec!["c1"]);
        assert_eq!(progress.infos, vec!["i1"]);
    }

    #[test]
    fn test_user_deserializes_with_oid() {
        let user: User = serde_json::from_value(json!({
            "_id": { "$oid": "u1" },
            "username": "ann",
            "email": "ann@example.com",
            "hashed_password": "x",
            "role": "Student",
            "progress": { "courses": [], "tests": ["t1"], "infos": [] }
        }))
        .unwrap();
        assert_eq!(user.id.as_ref().map(|id| id.as_str()), Some("u1"));
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.progress.tests, vec!["t1"]);
    }

    #[test]
    fn test_progress_change_body() {
        let change = ProgressChange::new(ProgressItem::Course, "c1", "u1");
        assert_eq!(change.to_body(), json!({ "cource_id": "c1", "user_id": "u1" }));
        assert_eq!(ProgressItem::Info.path_segment(), "info");
    }
}
