use serde::{Deserialize, Serialize};

use crate::ContentTypeSchema;

/// Describes one discoverable content collection.
///
/// Computed from the live schema registry on every discovery call and never
/// persisted. Serialized in camelCase for the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDescriptor {
    pub uid: String,
    pub singular_name: String,
    pub plural_name: String,
    pub display_name: String,
    pub has_published_at: bool,
}

impl ContentTypeDescriptor {
    /// Derive a descriptor from schema metadata. Names missing from `info`
    /// fall back to the last segment of the uid.
    pub fn from_schema(schema: &ContentTypeSchema) -> Self {
        let fallback = schema.uid_name();
        let name_or_fallback =
            |name: &Option<String>| name.clone().unwrap_or_else(|| fallback.to_string());

        Self {
            uid: schema.uid.clone(),
            singular_name: name_or_fallback(&schema.info.singular_name),
            plural_name: name_or_fallback(&schema.info.plural_name),
            display_name: name_or_fallback(&schema.info.display_name),
            has_published_at: schema.has_published_at(),
        }
    }

    /// URL path segment used when no custom path is configured.
    pub fn default_path(&self) -> String {
        format!("/{}", self.plural_name)
    }
}

impl From<&ContentTypeSchema> for ContentTypeDescriptor {
    fn from(schema: &ContentTypeSchema) -> Self {
        Self::from_schema(schema)
    }
}
