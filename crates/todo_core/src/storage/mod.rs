//! Durable key-value storage used for todo and preference persistence.
//!
//! # Responsibility
//! - Define the string-keyed persistence surface consumed by the store.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `set` is synchronous: once it returns `Ok`, the value is durable for
//!   the backing implementation.
//! - A missing key is `Ok(None)`, never an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::{open_storage, open_storage_in_memory, SqliteKeyValueStore};

/// Key holding the serialized todo collection (JSON array).
pub const TODOS_KEY: &str = "todos";
/// Key holding the serialized dark-mode preference (JSON boolean).
pub const DARK_MODE_KEY: &str = "darkMode";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String-keyed persistence surface.
pub trait KeyValueStore {
    /// Reads the raw value for `key`, `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
