//! Sitemap configuration and its persistence.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use sitemapper_model::ContentTypeDescriptor;
use sitemapper_storage::PluginStore;
use tracing::{info, warn};

use crate::xml::is_xml_safe;
use crate::{GeneratorError, GeneratorResult};

/// Plugin namespace in the key/value store.
pub const PLUGIN_NAME: &str = "sitemap-generator";
/// Key of the single config record.
pub const CONFIG_KEY: &str = "config";

pub const DEFAULT_BASE_URL: &str = "https://example.com";
pub const DEFAULT_PRIORITY: f64 = 0.7;

/// Sitemap-protocol hint for how often a page changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted settings controlling sitemap generation.
///
/// Always replaced as a whole: a missing override map in an update means
/// "no overrides", not "keep the current ones".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapConfig {
    pub base_url: String,
    #[serde(default)]
    pub selected_content_types: Vec<String>,
    #[serde(default)]
    pub custom_paths: BTreeMap<String, String>,
    #[serde(default)]
    pub custom_priorities: BTreeMap<String, f64>,
    #[serde(default)]
    pub custom_changefreq: BTreeMap<String, ChangeFrequency>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            selected_content_types: Vec::new(),
            custom_paths: BTreeMap::new(),
            custom_priorities: BTreeMap::new(),
            custom_changefreq: BTreeMap::new(),
        }
    }
}

/// Resolved per-type output settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSettings {
    pub path: String,
    pub priority: f64,
    pub changefreq: ChangeFrequency,
}

impl SitemapConfig {
    /// Path, priority and changefreq for one content type, defaults applied.
    pub fn settings_for(&self, descriptor: &ContentTypeDescriptor) -> TypeSettings {
        let uid = descriptor.uid.as_str();
        TypeSettings {
            path: self
                .custom_paths
                .get(uid)
                .cloned()
                .unwrap_or_else(|| descriptor.default_path()),
            priority: self.custom_priorities.get(uid).copied().unwrap_or(DEFAULT_PRIORITY),
            changefreq: self.custom_changefreq.get(uid).copied().unwrap_or_default(),
        }
    }

    /// Rejects configs that would render an invalid sitemap.
    pub fn validate(&self) -> GeneratorResult<()> {
        if !is_xml_safe(&self.base_url) {
            return Err(invalid(format!(
                "baseUrl {:?} contains characters that cannot appear in XML",
                self.base_url
            )));
        }
        let base = url::Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("baseUrl '{}' is not a valid URL: {e}", self.base_url)))?;
        if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
            return Err(invalid(format!(
                "baseUrl '{}' must be an absolute http(s) URL",
                self.base_url
            )));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(invalid(format!(
                "baseUrl '{}' must not carry a query or fragment",
                self.base_url
            )));
        }

        if let Some(uid) = self.selected_content_types.iter().find(|uid| uid.trim().is_empty()) {
            return Err(invalid(format!("selected content type '{uid}' is blank")));
        }

        for (uid, path) in &self.custom_paths {
            if !path.starts_with('/') {
                return Err(invalid(format!("path for '{uid}' must start with '/', got '{path}'")));
            }
            if !is_xml_safe(path) {
                return Err(invalid(format!(
                    "path for '{uid}' contains characters that cannot appear in XML"
                )));
            }
        }

        for (uid, priority) in &self.custom_priorities {
            if !(0.0..=1.0).contains(priority) {
                return Err(invalid(format!(
                    "priority for '{uid}' must be between 0.0 and 1.0, got {priority}"
                )));
            }
        }

        Ok(())
    }

    /// Drops duplicate selections (first occurrence wins) and trailing
    /// slashes on the base URL and custom paths.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let mut seen = HashSet::new();
        self.selected_content_types.retain(|uid| seen.insert(uid.clone()));

        let trimmed_len = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed_len);

        for path in self.custom_paths.values_mut() {
            let trimmed = path.trim_end_matches('/');
            *path = trimmed.to_string();
        }
        self
    }
}

fn invalid(message: String) -> GeneratorError {
    GeneratorError::InvalidConfig(message)
}

/// Durable get/set of the single [`SitemapConfig`] record.
#[derive(Clone)]
pub struct ConfigStore {
    store: PluginStore,
}

impl ConfigStore {
    pub fn new(store: PluginStore) -> Self {
        Self { store }
    }

    /// The stored config. On first access the defaults are written and
    /// returned.
    ///
    /// A record that no longer parses is repaired in place: changefreq
    /// overrides outside the protocol vocabulary are dropped, and if the
    /// record is still unreadable it is replaced by defaults.
    pub fn get_config(&self) -> GeneratorResult<SitemapConfig> {
        let Some(value) = self.store.get(PLUGIN_NAME, CONFIG_KEY)? else {
            let config = SitemapConfig::default();
            self.store.set_json(PLUGIN_NAME, CONFIG_KEY, &config)?;
            return Ok(config);
        };

        let err = match serde_json::from_value::<SitemapConfig>(value.clone()) {
            Ok(config) => return Ok(config),
            Err(e) => e,
        };
        let config = match without_unknown_changefreq(value) {
            Some(config) => {
                warn!("Dropping unknown changefreq overrides from stored sitemap config: {}", err);
                config
            }
            None => {
                warn!("Stored sitemap config is unreadable, replacing it with defaults: {}", err);
                SitemapConfig::default()
            }
        };
        self.store.set_json(PLUGIN_NAME, CONFIG_KEY, &config)?;
        Ok(config)
    }

    /// Validates and replaces the stored config, returning what was stored.
    pub fn update_config(&self, config: SitemapConfig) -> GeneratorResult<SitemapConfig> {
        config.validate()?;
        let config = config.normalized();
        self.store.set_json(PLUGIN_NAME, CONFIG_KEY, &config)?;
        info!(
            "Sitemap config updated: {} content type(s) selected, base URL {}",
            config.selected_content_types.len(),
            config.base_url
        );
        Ok(config)
    }
}

/// Parses a stored record after removing `customChangefreq` values the
/// [`ChangeFrequency`] vocabulary does not know.
fn without_unknown_changefreq(mut value: serde_json::Value) -> Option<SitemapConfig> {
    let overrides = value.get_mut("customChangefreq")?.as_object_mut()?;
    overrides.retain(|_, freq| ChangeFrequency::deserialize(&*freq).is_ok());
    serde_json::from_value(value).ok()
}
