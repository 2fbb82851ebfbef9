//! Sitemap builder.
//!
//! Every call is a full recomputation: load config, resolve each selected
//! content type, fetch its entries, render. A type that cannot be resolved or
//! fetched is logged and skipped; it never fails the document.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use sitemapper_model::{ContentEntry, ContentTypeDescriptor};
use tracing::{debug, warn};

use crate::GeneratorResult;
use crate::config::{ConfigStore, SitemapConfig, TypeSettings};
use crate::discovery::ContentTypeDiscoverer;
use crate::preview::{ContentTypeSummary, PreviewEntry, SitemapData};
use crate::registry::SchemaRegistry;
use crate::source::ContentSource;
use crate::xml::{UrlEntry, is_xml_safe, lastmod_date, render_urlset};

/// Entries one content type contributes, already filtered to slugged records.
struct TypeContribution {
    descriptor: ContentTypeDescriptor,
    settings: TypeSettings,
    entries: Vec<ContentEntry>,
}

impl TypeContribution {
    fn url_for(&self, base_url: &str, slug: &str) -> String {
        format!("{}{}/{}", base_url, self.settings.path, slug)
    }
}

pub struct SitemapService {
    discoverer: ContentTypeDiscoverer,
    source: Arc<dyn ContentSource>,
    config: ConfigStore,
}

impl SitemapService {
    pub fn new(
        registry: Arc<dyn SchemaRegistry>,
        source: Arc<dyn ContentSource>,
        config: ConfigStore,
    ) -> Self {
        Self {
            discoverer: ContentTypeDiscoverer::new(registry),
            source,
            config,
        }
    }

    pub fn discoverer(&self) -> &ContentTypeDiscoverer {
        &self.discoverer
    }

    /// Sitemap-eligible content types.
    pub fn discover_content_types(&self) -> Vec<ContentTypeDescriptor> {
        self.discoverer.discover_content_types()
    }

    pub async fn get_config(&self) -> GeneratorResult<SitemapConfig> {
        let store = self.config.clone();
        tokio::task::spawn_blocking(move || store.get_config()).await?
    }

    pub async fn update_config(&self, config: SitemapConfig) -> GeneratorResult<SitemapConfig> {
        let store = self.config.clone();
        tokio::task::spawn_blocking(move || store.update_config(config)).await?
    }

    /// Renders the public XML sitemap.
    pub async fn generate_xml(&self) -> GeneratorResult<String> {
        let config = self.get_config().await?;
        if config.selected_content_types.is_empty() {
            return Ok(render_urlset(&[]));
        }

        let today = Utc::now().date_naive();
        let base_url = config.base_url.as_str();
        let contributions = self.collect(&config).await;
        let urls: Vec<UrlEntry> = contributions
            .iter()
            .flat_map(|contribution| {
                contribution.entries.iter().filter_map(move |entry| {
                    let slug = entry.slug()?;
                    Some(UrlEntry {
                        loc: contribution.url_for(base_url, slug),
                        lastmod: Some(lastmod_date(entry.updated_at(), today)),
                        changefreq: Some(contribution.settings.changefreq),
                        priority: Some(contribution.settings.priority),
                    })
                })
            })
            .collect();

        debug!("Rendered sitemap with {} URLs", urls.len());
        Ok(render_urlset(&urls))
    }

    /// Structured preview of what the sitemap would contain.
    pub async fn get_sitemap_data(&self) -> GeneratorResult<SitemapData> {
        let config = self.get_config().await?;
        let mut data = SitemapData::empty(Utc::now());
        if config.selected_content_types.is_empty() {
            return Ok(data);
        }

        for contribution in self.collect(&config).await {
            let previews: Vec<PreviewEntry> = contribution
                .entries
                .iter()
                .filter_map(|entry| {
                    let slug = entry.slug()?;
                    Some(PreviewEntry {
                        url: contribution.url_for(&config.base_url, slug),
                        title: entry.display_title().unwrap_or(slug).to_string(),
                        lastmod: entry.updated_at().map(str::to_string),
                    })
                })
                .collect();

            data.meta.total_urls += previews.len();
            data.meta.content_types.push(ContentTypeSummary {
                uid: contribution.descriptor.uid.clone(),
                display_name: contribution.descriptor.display_name.clone(),
                count: previews.len(),
            });
            data.entries.insert(contribution.descriptor.uid, previews);
        }

        Ok(data)
    }

    /// Renders the sitemap and writes it to `path`. Returns the byte count.
    pub async fn write_xml_to(&self, path: &Path) -> GeneratorResult<usize> {
        let xml = self.generate_xml().await?;
        tokio::fs::write(path, xml.as_bytes()).await?;
        Ok(xml.len())
    }

    async fn collect(&self, config: &SitemapConfig) -> Vec<TypeContribution> {
        let mut seen = HashSet::new();
        let mut contributions = Vec::new();

        for uid in &config.selected_content_types {
            if !seen.insert(uid.as_str()) {
                continue;
            }

            let descriptor = match self.discoverer.resolve_eligible(uid) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!("Skipping content type {}: {}", uid, e);
                    continue;
                }
            };

            let fetched = self.source.find_entries(uid, descriptor.has_published_at).await;
            let entries = match fetched {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Skipping content type {}: {}", uid, e);
                    continue;
                }
            };

            let entries: Vec<ContentEntry> = entries
                .into_iter()
                .filter(|entry| match entry.slug() {
                    Some(slug) if is_xml_safe(slug) => true,
                    Some(slug) => {
                        warn!(
                            "Skipping {} entry {}: slug {:?} is not valid XML text",
                            uid,
                            entry.id,
                            slug
                        );
                        false
                    }
                    None => false,
                })
                .collect();
            debug!("Content type {} contributes {} entries", uid, entries.len());

            contributions.push(TypeContribution {
                settings: config.settings_for(&descriptor),
                descriptor,
                entries,
            });
        }

        contributions
    }
}
