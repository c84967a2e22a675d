//! Backend Identifier Wrapper
//!
//! The admin backend stores documents in MongoDB and returns identifiers in
//! extended JSON form: `{ "$oid": "65f0c0ffee..." }`. [`ObjectId`] unwraps that
//! shape on read and re-wraps it on write, so the rest of the crate only ever
//! deals with the plain hex string.
//!
//! # Examples
//!
//! ```rust
//! use funle_admin_core::models::ObjectId;
//! use serde_json::json;
//!
//! let id: ObjectId = serde_json::from_value(json!({ "$oid": "abc123" })).unwrap();
//! assert_eq!(id.as_str(), "abc123");
//! assert_eq!(serde_json::to_value(&id).unwrap(), json!({ "$oid": "abc123" }));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// MongoDB-style identifier as returned by the admin backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    #[serde(rename = "$oid")]
    oid: String,
}

impl ObjectId {
    /// Wrap a raw hex identifier
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }

    /// The unwrapped identifier, suitable for `?id=` query parameters
    pub fn as_str(&self) -> &str {
        &self.oid
    }

    pub fn into_string(self) -> String {
        self.oid
    }

    /// Extract an identifier from a create response body.
    ///
    /// The backend answers inserts with either `{ "insertedId": { "$oid": .. } }`
    /// or the stored document itself (`{ "_id": { "$oid": .. }, .. }`). Anything
    /// else yields `None`; the caller then has no id until the next fetch.
    pub fn from_insert_response(body: &serde_json::Value) -> Option<Self> {
        ["insertedId", "inserted_id", "_id"]
            .iter()
            .filter_map(|key| body.get(*key))
            .find_map(|value| match value {
                serde_json::Value::String(raw) if !raw.is_empty() => Some(Self::new(raw.clone())),
                other => serde_json::from_value::<ObjectId>(other.clone()).ok(),
            })
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.oid)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
