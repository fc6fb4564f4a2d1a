//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections and apply migrations.
//! - Persist string values in the `kv_entries` table.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - Each `set` is a single autocommitted upsert.

use super::migrations::apply_migrations;
use super::{KeyValueStore, StorageResult};
use log::{debug, error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Key-value store persisted in one SQLite database.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps an already-open connection, applying pending migrations.
    pub fn try_new(mut conn: Connection) -> StorageResult<Self> {
        bootstrap_connection(&mut conn)?;
        Ok(Self { conn })
    }

    /// Borrow of the underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_write module=storage status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}

/// Opens a SQLite storage file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `storage_open` logging events with duration and status.
pub fn open_storage(path: impl AsRef<Path>) -> StorageResult<SqliteKeyValueStore> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite storage and applies all pending migrations.
pub fn open_storage_in_memory() -> StorageResult<SqliteKeyValueStore> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<SqliteKeyValueStore> {
    let started_at = Instant::now();
    info!("event=storage_open module=storage status=start mode={mode}");

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=storage_open module=storage status=error mode={} duration_ms={} error_code=open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match SqliteKeyValueStore::try_new(conn) {
        Ok(store) => {
            info!(
                "event=storage_open module=storage status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=storage_open module=storage status=error mode={} duration_ms={} error_code=bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
