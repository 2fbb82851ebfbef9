//! Content entry persistence.

use crate::{StorageError, StorageResult, lock, open_sqlite};
use rusqlite::{Connection, params};
use sitemapper_model::ContentEntry;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Content entries keyed by `(content_type, id)`.
///
/// Listing order is first-insertion order; updating an entry keeps its
/// position.
#[derive(Clone)]
pub struct EntryStore {
    conn: Arc<Mutex<Connection>>,
}

impl EntryStore {
    /// Opens (or creates) an entry store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Self::from_connection(open_sqlite(path)?)
    }

    /// Opens an in-memory entry store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS content_entries (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                content_type TEXT NOT NULL,
                entry_id TEXT NOT NULL,
                data TEXT NOT NULL,
                UNIQUE(content_type, entry_id)
            );
            ",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Inserts an entry, or replaces the data of an existing one.
    pub fn upsert_entry(&self, entry: &ContentEntry) -> StorageResult<()> {
        let conn = lock(&self.conn)?;
        upsert(&conn, entry)
    }

    /// Upserts a batch of entries in one transaction. Returns the count written.
    pub fn import_entries(&self, entries: &[ContentEntry]) -> StorageResult<usize> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        for entry in entries {
            upsert(&tx, entry)?;
        }
        tx.commit()?;
        debug!("Imported {} entries", entries.len());
        Ok(entries.len())
    }

    /// Lists all entries of a content type in insertion order.
    ///
    /// With `published_only`, entries without a `publishedAt` value (drafts)
    /// are left out.
    pub fn list_entries(
        &self,
        content_type: &str,
        published_only: bool,
    ) -> StorageResult<Vec<ContentEntry>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT entry_id, data FROM content_entries WHERE content_type = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![content_type], |row| {
            let id: String = row.get(0)?;
            let data: String = row.get(1)?;
            Ok((id, data))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, data) = row?;
            let data = serde_json::from_str(&data).map_err(|e| {
                StorageError::InvalidData(format!("entry {content_type}/{id}: {e}"))
            })?;
            let entry = ContentEntry::new(id, content_type, data);
            if published_only && entry.published_at().is_none() {
                continue;
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Number of stored entries for a content type, drafts included.
    pub fn count_entries(&self, content_type: &str) -> StorageResult<usize> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM content_entries WHERE content_type = ?1",
            params![content_type],
            |row| row.get(0),
        )?;
        usize::try_from(count).map_err(|e| StorageError::InvalidData(e.to_string()))
    }

    /// Deletes one entry. Returns whether it existed.
    pub fn delete_entry(&self, content_type: &str, id: &str) -> StorageResult<bool> {
        let conn = lock(&self.conn)?;
        let removed = conn.execute(
            "DELETE FROM content_entries WHERE content_type = ?1 AND entry_id = ?2",
            params![content_type, id],
        )?;
        Ok(removed > 0)
    }
}

fn upsert(conn: &Connection, entry: &ContentEntry) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO content_entries (content_type, entry_id, data) VALUES (?1, ?2, ?3)
         ON CONFLICT(content_type, entry_id) DO UPDATE SET data = excluded.data",
        params![entry.content_type, entry.id, serde_json::to_string(&entry.data)?],
    )?;
    Ok(())
}
