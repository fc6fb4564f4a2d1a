//! Persisted UI preferences.

use crate::storage::{KeyValueStore, StorageResult, DARK_MODE_KEY};
use log::warn;

/// Reads the dark-mode flag; anything but a stored JSON boolean is `false`.
pub fn load_dark_mode<S: KeyValueStore + ?Sized>(storage: &S) -> bool {
    match storage.get(DARK_MODE_KEY) {
        Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|err| {
            warn!("event=pref_load module=store status=fallback key={DARK_MODE_KEY} error={err}");
            false
        }),
        Ok(None) => false,
        Err(err) => {
            warn!("event=pref_load module=store status=fallback key={DARK_MODE_KEY} error={err}");
            false
        }
    }
}

pub fn save_dark_mode<S: KeyValueStore + ?Sized>(storage: &mut S, enabled: bool) -> StorageResult<()> {
    storage.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
}
