//! Content-type discovery.

use std::sync::Arc;

use sitemapper_model::{ContentTypeDescriptor, ContentTypeSchema};

use crate::registry::SchemaRegistry;
use crate::{GeneratorError, GeneratorResult};

/// The attribute a content type must declare to be publicly addressable.
pub const SLUG_ATTRIBUTE: &str = "slug";

/// Whether a schema can contribute URLs: a user-defined `api::` type with a
/// `slug` attribute.
pub fn is_sitemap_eligible(schema: &ContentTypeSchema) -> bool {
    schema.is_api() && schema.has_attribute(SLUG_ATTRIBUTE)
}

/// Thin filter over a [`SchemaRegistry`].
#[derive(Clone)]
pub struct ContentTypeDiscoverer {
    registry: Arc<dyn SchemaRegistry>,
}

impl ContentTypeDiscoverer {
    pub fn new(registry: Arc<dyn SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Descriptors of every sitemap-eligible content type, unordered.
    pub fn discover_content_types(&self) -> Vec<ContentTypeDescriptor> {
        self.registry
            .content_types()
            .iter()
            .filter(|schema| is_sitemap_eligible(schema))
            .map(ContentTypeDescriptor::from_schema)
            .collect()
    }

    /// Descriptor for any registered content type, eligible or not.
    pub fn content_type_info(&self, uid: &str) -> GeneratorResult<ContentTypeDescriptor> {
        self.registry
            .get(uid)
            .map(|schema| ContentTypeDescriptor::from_schema(&schema))
            .ok_or_else(|| GeneratorError::UnknownContentType(uid.to_string()))
    }

    /// Descriptor for a content type that may appear in the sitemap.
    pub fn resolve_eligible(&self, uid: &str) -> GeneratorResult<ContentTypeDescriptor> {
        let schema = self
            .registry
            .get(uid)
            .ok_or_else(|| GeneratorError::UnknownContentType(uid.to_string()))?;
        if !is_sitemap_eligible(&schema) {
            return Err(GeneratorError::NotEligible(uid.to_string()));
        }
        Ok(ContentTypeDescriptor::from_schema(&schema))
    }
}
