//! Schema registry abstraction.
//!
//! The discoverer never reflects over the host directly; it filters whatever a
//! [`SchemaRegistry`] reports.

use std::collections::BTreeMap;
use std::path::Path;

use sitemapper_model::ContentTypeSchema;

use crate::GeneratorResult;

/// Read-only source of content-type schemas.
pub trait SchemaRegistry: Send + Sync {
    /// All registered schemas, in no particular order.
    fn content_types(&self) -> Vec<ContentTypeSchema>;

    /// Look up one schema by uid.
    fn get(&self, uid: &str) -> Option<ContentTypeSchema> {
        self.content_types().into_iter().find(|s| s.uid == uid)
    }
}

/// Schema registry held in memory, keyed by uid.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaRegistry {
    schemas: BTreeMap<String, ContentTypeSchema>,
}

impl InMemorySchemaRegistry {
    pub fn new(schemas: impl IntoIterator<Item = ContentTypeSchema>) -> Self {
        let mut registry = Self::default();
        for schema in schemas {
            registry.register(schema);
        }
        registry
    }

    /// Adds or replaces a schema.
    pub fn register(&mut self, schema: ContentTypeSchema) {
        self.schemas.insert(schema.uid.clone(), schema);
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Parses a JSON object mapping uid to schema, the shape the CMS exposes
    /// its registry in. A schema's own `uid` field wins over the key.
    pub fn from_json_str(json: &str) -> GeneratorResult<Self> {
        let raw: BTreeMap<String, ContentTypeSchema> = serde_json::from_str(json)?;
        Ok(Self::new(raw.into_iter().map(|(uid, mut schema)| {
            if schema.uid.is_empty() {
                schema.uid = uid;
            }
            schema
        })))
    }

    /// Loads a registry file written in the [`from_json_str`](Self::from_json_str) format.
    pub fn load(path: &Path) -> GeneratorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl SchemaRegistry for InMemorySchemaRegistry {
    fn content_types(&self) -> Vec<ContentTypeSchema> {
        self.schemas.values().cloned().collect()
    }

    fn get(&self, uid: &str) -> Option<ContentTypeSchema> {
        self.schemas.get(uid).cloned()
    }
}
