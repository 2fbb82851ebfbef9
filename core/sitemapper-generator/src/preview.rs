//! JSON preview of a sitemap, for admin tooling.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapData {
    /// Content type uid to its entries, in listing order.
    pub entries: BTreeMap<String, Vec<PreviewEntry>>,
    pub meta: SitemapMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub url: String,
    pub title: String,
    /// Raw `updatedAt` of the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapMeta {
    pub total_urls: usize,
    pub last_generated: DateTime<Utc>,
    pub content_types: Vec<ContentTypeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSummary {
    pub uid: String,
    pub display_name: String,
    pub count: usize,
}

impl SitemapData {
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            entries: BTreeMap::new(),
            meta: SitemapMeta {
                total_urls: 0,
                last_generated: generated_at,
                content_types: Vec::new(),
            },
        }
    }
}
