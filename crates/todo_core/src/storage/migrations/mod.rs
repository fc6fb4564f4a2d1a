//! Schema upgrades for the `kv_entries` table.
//!
//! # Responsibility
//! - Own the DDL for the single key-value table behind `KeyValueStore`.
//! - Bring older storage files up to the layout this build reads.
//!
//! # Invariants
//! - Steps are listed in strictly increasing `version` order.
//! - `PRAGMA user_version` records the last step applied; all pending steps
//!   run in one transaction so a file is never left half-upgraded.
//! - Upgrades keep existing `kv_entries` rows.

use crate::storage::{StorageError, StorageResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_entries",
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Schema version written by this build.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Upgrades the key-value schema on `conn` to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Sqlite` when a step fails; the file keeps its previous version.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let from_version = user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        debug!("event=storage_migrate module=storage status=skipped version={latest}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > from_version) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=storage_migrate_step module=storage version={} name={}",
            step.version, step.name
        );
    }
    let entries: i64 = tx.query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))?;
    tx.commit()?;

    info!(
        "event=storage_migrate module=storage status=ok from_version={from_version} to_version={latest} entries={entries}"
    );
    Ok(())
}

fn user_version(conn: &Connection) -> StorageResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
