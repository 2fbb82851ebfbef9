//! Scoped key/value persistence for plugin settings.

use crate::{StorageResult, lock, open_sqlite};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Durable key/value store keyed by plugin name + key, values stored as JSON.
#[derive(Clone)]
pub struct PluginStore {
    conn: Arc<Mutex<Connection>>,
}

impl PluginStore {
    /// Opens (or creates) a plugin store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Self::from_connection(open_sqlite(path)?)
    }

    /// Opens an in-memory plugin store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS plugin_store (
                plugin TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (plugin, key)
            );
            ",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns the stored value, or `None` if the key was never written.
    pub fn get(&self, plugin: &str, key: &str) -> StorageResult<Option<serde_json::Value>> {
        let raw: Option<String> = {
            let conn = lock(&self.conn)?;
            conn.query_row(
                "SELECT value FROM plugin_store WHERE plugin = ?1 AND key = ?2",
                params![plugin, key],
                |row| row.get(0),
            )
            .optional()?
        };
        raw.map(|s| serde_json::from_str::<serde_json::Value>(&s))
            .transpose()
            .map_err(Into::into)
    }

    /// Overwrites the value for `(plugin, key)`.
    pub fn set(&self, plugin: &str, key: &str, value: &serde_json::Value) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO plugin_store (plugin, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(plugin, key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![plugin, key, raw, chrono::Utc::now().to_rfc3339()],
        )?;
        debug!("Stored {}/{} ({} bytes)", plugin, key, raw.len());
        Ok(())
    }

    /// Removes the value for `(plugin, key)`. Returns whether a record existed.
    pub fn delete(&self, plugin: &str, key: &str) -> StorageResult<bool> {
        let conn = lock(&self.conn)?;
        let removed = conn.execute(
            "DELETE FROM plugin_store WHERE plugin = ?1 AND key = ?2",
            params![plugin, key],
        )?;
        Ok(removed > 0)
    }

    /// Typed read. Fails with a serialization error if the stored JSON does
    /// not match `T`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        plugin: &str,
        key: &str,
    ) -> StorageResult<Option<T>> {
        self.get(plugin, key)?
            .map(serde_json::from_value::<T>)
            .transpose()
            .map_err(Into::into)
    }

    /// Typed write.
    pub fn set_json<T: Serialize>(&self, plugin: &str, key: &str, value: &T) -> StorageResult<()> {
        self.set(plugin, key, &serde_json::to_value(value)?)
    }
}
