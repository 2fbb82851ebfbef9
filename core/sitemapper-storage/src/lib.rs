//! SQLite storage layer for Sitemapper.
//!
//! Two stores share one database file, each over its own connection:
//!
//! - [`PluginStore`] — scoped key/value records (plugin name + key -> JSON),
//!   used to persist the sitemap configuration
//! - [`EntryStore`] — content entries keyed by content type and id, served in
//!   insertion order to the sitemap builder

mod entry_store;
mod error;
mod plugin_store;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub use entry_store::EntryStore;
pub use error::{StorageError, StorageResult};
pub use plugin_store::PluginStore;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite connection, creating the parent directory if needed.
///
/// A busy timeout is set so the two stores can write to the same file
/// without surfacing `SQLITE_BUSY` under light contention.
pub fn open_sqlite(path: &Path) -> StorageResult<rusqlite::Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = rusqlite::Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

pub(crate) fn lock(
    conn: &Mutex<rusqlite::Connection>,
) -> StorageResult<MutexGuard<'_, rusqlite::Connection>> {
    conn.lock().map_err(|_| StorageError::LockPoisoned)
}
