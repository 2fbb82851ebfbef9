//! Shared fixtures for generator tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde_json::json;
use sitemapper_generator::config::{CONFIG_KEY, PLUGIN_NAME};
use sitemapper_generator::{
    ConfigStore, ContentSource, GeneratorError, GeneratorResult, InMemorySchemaRegistry,
    SitemapConfig, SitemapService,
};
use sitemapper_model::{ContentEntry, ContentTypeSchema};
use sitemapper_storage::PluginStore;

pub const PRODUCT: &str = "api::product.product";
pub const BLOG: &str = "api::blog-post.blog-post";
pub const CAREER: &str = "api::career.career";

pub fn product_schema() -> ContentTypeSchema {
    ContentTypeSchema::new(PRODUCT)
        .with_info("product", "products", "Product")
        .with_attribute("title", "string")
        .with_attribute("slug", "uid")
}

pub fn blog_schema() -> ContentTypeSchema {
    ContentTypeSchema::new(BLOG)
        .with_info("blog-post", "blog", "Blog Post")
        .with_attribute("title", "string")
        .with_attribute("slug", "uid")
        .with_draft_and_publish(true)
}

pub fn career_schema() -> ContentTypeSchema {
    ContentTypeSchema::new(CAREER)
        .with_info("career", "careers", "Career")
        .with_attribute("name", "string")
        .with_attribute("slug", "uid")
}

/// A registry resembling a marketing site: three addressable types, one
/// type without slugs, and internal schemas.
pub fn site_registry() -> InMemorySchemaRegistry {
    InMemorySchemaRegistry::new([
        product_schema(),
        blog_schema(),
        career_schema(),
        ContentTypeSchema::new("api::global.global").with_attribute("siteName", "string"),
        ContentTypeSchema::new("plugin::users-permissions.user")
            .with_attribute("username", "string")
            .with_attribute("slug", "uid"),
        ContentTypeSchema::new("admin::user").with_attribute("email", "email"),
    ])
}

pub fn entry(content_type: &str, id: &str, data: serde_json::Value) -> ContentEntry {
    ContentEntry::new(id, content_type, data)
}

pub fn widget() -> ContentEntry {
    entry(PRODUCT, "1", json!({"slug": "widget", "updatedAt": "2024-01-15T00:00:00Z"}))
}

/// In-memory content source with per-type failure injection.
#[derive(Default)]
pub struct FixtureSource {
    entries: HashMap<String, Vec<ContentEntry>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, content_type: &str, entries: Vec<ContentEntry>) -> Self {
        self.entries.insert(content_type.to_string(), entries);
        self
    }

    pub fn failing(mut self, content_type: &str) -> Self {
        self.failing.insert(content_type.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for FixtureSource {
    async fn find_entries(
        &self,
        content_type: &str,
        published_only: bool,
    ) -> GeneratorResult<Vec<ContentEntry>> {
        self.calls
            .lock()
            .unwrap()
            .push((content_type.to_string(), published_only));
        if self.failing.contains(content_type) {
            return Err(GeneratorError::Source {
                content_type: content_type.to_string(),
                message: "collection table missing".to_string(),
            });
        }
        Ok(self.entries.get(content_type).cloned().unwrap_or_default())
    }
}

pub fn config_for(selected: &[&str]) -> SitemapConfig {
    SitemapConfig {
        base_url: "https://example.com".to_string(),
        selected_content_types: selected.iter().map(|s| s.to_string()).collect(),
        ..SitemapConfig::default()
    }
}

/// Builds a service whose stored config is `config`, written directly to the
/// key/value store so unvalidated records can be exercised too.
pub fn service_with(
    registry: InMemorySchemaRegistry,
    source: Arc<FixtureSource>,
    config: &SitemapConfig,
) -> SitemapService {
    let store = PluginStore::open_in_memory().unwrap();
    store.set_json(PLUGIN_NAME, CONFIG_KEY, config).unwrap();
    SitemapService::new(Arc::new(registry), source, ConfigStore::new(store))
}

/// One parsed `<url>` record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedUrl {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

/// Parses a sitemap strictly, panicking if it is not well-formed or its root
/// is not a single `urlset` element. Returns the `<url>` records in order.
pub fn parse_sitemap(xml: &str) -> Vec<ParsedUrl> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut roots = 0;
    let mut urls = Vec::new();
    let mut current = ParsedUrl::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8(start.name().as_ref().to_vec()).unwrap();
                if stack.is_empty() {
                    roots += 1;
                    assert_eq!(name, "urlset", "unexpected root element");
                }
                if name == "url" {
                    current = ParsedUrl::default();
                }
                stack.push(name);
            }
            Ok(Event::End(_)) => {
                if stack.pop().as_deref() == Some("url") {
                    urls.push(std::mem::take(&mut current));
                }
            }
            Ok(Event::Text(text)) => {
                let value = text.unescape().expect("text must be properly escaped").into_owned();
                if value.trim().is_empty() {
                    continue;
                }
                assert!(!stack.is_empty(), "text outside root element");
                match stack.last().map(String::as_str) {
                    Some("loc") => current.loc = value,
                    Some("lastmod") => current.lastmod = Some(value),
                    Some("changefreq") => current.changefreq = Some(value),
                    Some("priority") => current.priority = Some(value),
                    other => panic!("unexpected text in {other:?}"),
                }
            }
            Ok(Event::Empty(empty)) => {
                panic!("unexpected empty element {:?}", empty.name());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed XML at {}: {e}", reader.buffer_position()),
        }
    }

    assert!(stack.is_empty(), "unclosed elements: {stack:?}");
    assert_eq!(roots, 1, "expected a single root element");
    urls
}
