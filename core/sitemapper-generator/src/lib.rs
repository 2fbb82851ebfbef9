//! Sitemap generation for a headless CMS.
//!
//! - [`ContentTypeDiscoverer`] — filters a [`SchemaRegistry`] down to the
//!   content types that have public URLs (`api::` namespace, `slug` attribute)
//! - [`ConfigStore`] — durable get/replace of the [`SitemapConfig`]
//! - [`SitemapService`] — renders the XML sitemap or a JSON preview from the
//!   current config and live entries of a [`ContentSource`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sitemapper_generator::{ConfigStore, InMemorySchemaRegistry, SitemapService};
//! use sitemapper_storage::{EntryStore, PluginStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(InMemorySchemaRegistry::default());
//! let entries = Arc::new(EntryStore::open_in_memory()?);
//! let config = ConfigStore::new(PluginStore::open_in_memory()?);
//!
//! let service = SitemapService::new(registry, entries, config);
//! assert!(service.discover_content_types().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
mod error;
pub mod preview;
pub mod registry;
mod service;
pub mod source;
pub mod xml;

pub use config::{
    ChangeFrequency, ConfigStore, DEFAULT_BASE_URL, DEFAULT_PRIORITY, SitemapConfig, TypeSettings,
};
pub use discovery::{ContentTypeDiscoverer, is_sitemap_eligible};
pub use error::{GeneratorError, GeneratorResult};
pub use preview::{ContentTypeSummary, PreviewEntry, SitemapData, SitemapMeta};
pub use registry::{InMemorySchemaRegistry, SchemaRegistry};
pub use service::SitemapService;
pub use source::ContentSource;
pub use xml::{UrlEntry, escape_xml, is_xml_safe, render_url_entry, render_urlset};
