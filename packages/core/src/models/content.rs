//! Tutorial Content Payloads
//!
//! A tutorial ("info") is a sequence of levels, each holding text or image
//! content. [`Content`] is the persisted payload of one such node; the
//! editor's `position` lives on the surrounding `EditorNode`, never here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a tutorial content node.
///
/// Values other than `text` and `image` are preserved as
/// [`ContentType::Unsupported`] so that a document written by a newer client
/// still loads and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    #[default]
    Text,
    Image,
    /// A value other than `text` or `image`. Build through `From<String>`;
    /// a known name held here serializes as that name and decodes as the
    /// known variant.
    Unsupported(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Unsupported(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ContentType::Unsupported(_))
    }

    /// Fold an `Unsupported` value that names a known type into that type
    pub fn normalized(self) -> Self {
        match self {
            ContentType::Unsupported(raw) => ContentType::from(raw),
            known => known,
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => ContentType::Text,
            "image" => ContentType::Image,
            _ => ContentType::Unsupported(value),
        }
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        ContentType::from(value.to_string())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Text => "text".to_string(),
            ContentType::Image => "image".to_string(),
            ContentType::Unsupported(raw) => raw,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted payload of a tutorial content node
///
/// Both fields are required on the wire; a node missing either is a
/// malformed document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    pub content_type: ContentType,
    /// Raw text, or an image URL / base64 blob
    pub data: String,
}

impl Content {
    pub fn new(content_type: impl Into<ContentType>, data: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::normalized(content_type.into()),
            data: data.into(),
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        Self::new(ContentType::Text, data)
    }

    pub fn image(data: impl Into<String>) -> Self {
        Self::new(ContentType::Image, data)
    }
}
