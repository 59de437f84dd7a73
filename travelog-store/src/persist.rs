//! JSON state-file persistence for the entry store.
//!
//! On every mutation the current collection contents are serialized to a
//! JSON file. On startup the file is loaded back so data survives restarts.
//!
//! The file is written atomically: first to a `.tmp` sibling, then renamed
//! over the final path, so a crash mid-write never corrupts the stored
//! state.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use travelog_core::entry::LogEntry;
use travelog_core::error::TravelogError;

/// The shape serialized to / deserialized from the state file:
/// collection name → id → entry.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub collections: HashMap<String, HashMap<String, LogEntry>>,
}

/// Save the collection contents to `path`.
///
/// Persistence failures are store failures and propagate to the caller.
pub fn save_state(
    path: &Path,
    collection: &str,
    entries: &DashMap<String, LogEntry>,
) -> Result<(), TravelogError> {
    let mut persisted = PersistedState::default();
    persisted.collections.insert(
        collection.to_string(),
        entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect(),
    );

    let json = serde_json::to_string_pretty(&persisted)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    // Atomic write: tmp file → rename. The tmp name is unique per write
    // so concurrent saves never interleave into the same sibling.
    let tmp = path.with_extension(format!("{}.json.tmp", uuid::Uuid::new_v4()));
    std::fs::write(&tmp, &json)?;
    std::fs::rename(&tmp, path)?;

    tracing::debug!(path = %path.display(), "persist: state saved");
    Ok(())
}

/// Load a previously saved state file into `entries`.
///
/// * If the file does not exist            → silently returns (first run).
/// * If the file exists but is malformed   → logs a warning and returns.
/// * On success                            → the collection is populated.
pub fn load_state(path: &Path, collection: &str, entries: &DashMap<String, LogEntry>) {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "persist: no state file found, starting fresh");
        return;
    }

    let data = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "persist: failed to read state file");
            return;
        }
    };

    let mut persisted: PersistedState = match serde_json::from_str(&data) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "persist: state file is malformed, ignoring");
            return;
        }
    };

    let mut restored = 0;
    if let Some(records) = persisted.collections.remove(collection) {
        restored = records.len();
        for (id, entry) in records {
            entries.insert(id, entry);
        }
    }

    tracing::info!(
        collection = collection,
        entries = restored,
        path = %path.display(),
        "persist: state restored from file"
    );
}
