//! Save and restore run progress.
//!
//! The record is a small JSON document kept under a single key:
//! `{"completedNodes": [...], "currentNode": "..." | null, "timestamp": <ms>}`.

use std::collections::BTreeSet;
use chrono::Utc;
use runmap_core::NodeId;
use runmap_storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key the tracker uses unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "level_progress";

/// Persisted progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Completed node ids, in order
    pub completed_nodes: Vec<NodeId>,

    /// Selected node, if any
    pub current_node: Option<NodeId>,

    /// Milliseconds since the Unix epoch when the record was written
    #[serde(default)]
    pub timestamp: i64,
}

impl ProgressRecord {
    /// Record the given state, stamped with the current time.
    pub fn new(completed: impl IntoIterator<Item = NodeId>, current: Option<NodeId>) -> Self {
        Self {
            completed_nodes: completed.into_iter().collect(),
            current_node: current,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Write progress under `key`.
pub fn save_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    completed: &BTreeSet<NodeId>,
    current: Option<&NodeId>,
) -> runmap_storage::Result<()> {
    let record = ProgressRecord::new(completed.iter().cloned(), current.cloned());
    runmap_storage::write_json(store, key, &record)?;
    debug!(
        "Saved progress: {} completed, current {:?}",
        record.completed_nodes.len(),
        record.current_node
    );
    Ok(())
}

/// Read progress from `key`.
///
/// Missing records yield `None`. Unreadable or malformed records also yield
/// `None` after logging a warning; a bad save never blocks a run.
pub fn load_progress<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<ProgressRecord> {
    match runmap_storage::read_json::<ProgressRecord>(store, key) {
        Ok(record) => record,
        Err(e) => {
            warn!("Ignoring saved progress under '{}': {}", key, e);
            None
        }
    }
}

/// Erase progress stored under `key`.
pub fn clear_progress<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> runmap_storage::Result<()> {
    store.remove(key)
}
