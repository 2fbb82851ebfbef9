use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier prefix of user-defined content types. Plugin, admin and
/// internal schemas use other namespaces (`plugin::`, `admin::`).
pub const API_UID_PREFIX: &str = "api::";

/// A content type as held by the CMS schema registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSchema {
    /// Namespaced identifier, e.g. `api::product.product`. Registry files key
    /// schemas by uid, so this may be absent in the file and filled in on load.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub info: SchemaInfo,
    #[serde(default)]
    pub options: SchemaOptions,
    /// Attribute name to definition. A missing or malformed map is empty.
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub attributes: BTreeMap<String, Attribute>,
}

impl ContentTypeSchema {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_info(mut self, singular: &str, plural: &str, display: &str) -> Self {
        self.info = SchemaInfo {
            singular_name: Some(singular.into()),
            plural_name: Some(plural.into()),
            display_name: Some(display.into()),
        };
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, kind: &str) -> Self {
        self.attributes.insert(name.into(), Attribute::of_kind(kind));
        self
    }

    #[must_use]
    pub fn with_draft_and_publish(mut self, enabled: bool) -> Self {
        self.options.draft_and_publish = enabled;
        self
    }

    /// Whether the uid is in the user-defined `api::` namespace.
    pub fn is_api(&self) -> bool {
        self.uid.starts_with(API_UID_PREFIX)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether entries carry draft/published state.
    pub fn has_published_at(&self) -> bool {
        self.options.draft_and_publish || self.has_attribute("publishedAt")
    }

    /// Last segment of the uid (`api::product.product` -> `product`).
    pub fn uid_name(&self) -> &str {
        self.uid
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(&self.uid)
    }
}

/// Naming metadata declared by a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaOptions {
    #[serde(default)]
    pub draft_and_publish: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    #[default]
    CollectionType,
    SingleType,
}

/// One attribute definition. Only the `type` is interpreted; everything else
/// is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Attribute {
    pub fn of_kind(kind: &str) -> Self {
        Self {
            kind: Some(kind.into()),
            extra: serde_json::Map::new(),
        }
    }
}

fn lenient_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, Attribute>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(map)) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .map(|(name, def)| {
            let attribute = serde_json::from_value(def).unwrap_or_default();
            (name, attribute)
        })
        .collect())
}
