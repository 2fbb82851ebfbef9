use serde::{Deserialize, Serialize};

/// A single record of a content type, as returned by an entity listing.
///
/// The `data` field holds the record's attributes as arbitrary JSON whose
/// structure is defined by the content type's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: String,
    pub content_type: String,
    pub data: serde_json::Value,
}

impl ContentEntry {
    pub fn new(
        id: impl Into<String>,
        content_type: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// The entry's slug. Empty slugs count as absent.
    pub fn slug(&self) -> Option<&str> {
        self.non_empty("/slug")
    }

    /// Raw `updatedAt` value, unparsed.
    pub fn updated_at(&self) -> Option<&str> {
        self.non_empty("/updatedAt")
    }

    /// Raw `publishedAt` value. `None` for drafts.
    pub fn published_at(&self) -> Option<&str> {
        self.non_empty("/publishedAt")
    }

    /// Human-readable label: `title`, then `name`, then the slug.
    pub fn display_title(&self) -> Option<&str> {
        self.non_empty("/title")
            .or_else(|| self.non_empty("/name"))
            .or_else(|| self.slug())
    }

    fn non_empty(&self, pointer: &str) -> Option<&str> {
        self.get_str(pointer).filter(|s| !s.is_empty())
    }
}
