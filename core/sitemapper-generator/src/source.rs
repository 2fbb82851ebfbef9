//! Access to live content entries.

use async_trait::async_trait;
use sitemapper_model::ContentEntry;
use sitemapper_storage::EntryStore;

use crate::{GeneratorError, GeneratorResult};

/// Generic entity listing: all entries of one content type.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Lists entries in the order the backend returns them. With
    /// `published_only`, drafts are left out.
    async fn find_entries(
        &self,
        content_type: &str,
        published_only: bool,
    ) -> GeneratorResult<Vec<ContentEntry>>;
}

#[async_trait]
impl ContentSource for EntryStore {
    async fn find_entries(
        &self,
        content_type: &str,
        published_only: bool,
    ) -> GeneratorResult<Vec<ContentEntry>> {
        let store = self.clone();
        let uid = content_type.to_string();
        tokio::task::spawn_blocking(move || store.list_entries(&uid, published_only))
            .await?
            .map_err(|e| GeneratorError::Source {
                content_type: content_type.to_string(),
                message: e.to_string(),
            })
    }
}
