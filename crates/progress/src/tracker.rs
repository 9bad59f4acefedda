//! Progress tracking service.
//!
//! Availability is level-gated: the open tier is one past the highest
//! completed level, and every node on it is available regardless of which
//! edges lead there.

use std::collections::BTreeSet;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use runmap_core::{Edge, Graph, Node, NodeId};
use runmap_storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::access::validate_node_access;
use crate::observer::{NoopObserver, ProgressObserver};
use crate::persistence::{clear_progress, load_progress, save_progress, DEFAULT_STORAGE_KEY};
use crate::recommend::{recommended_nodes, shortest_path};
use crate::stats::ProgressStats;

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Persist after every state change
    pub auto_save: bool,

    /// Restore saved progress on construction
    pub auto_load: bool,

    /// Storage key owned by the tracker
    pub storage_key: String,
}

impl TrackerConfig {
    /// Set auto-save.
    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    /// Set auto-load.
    pub fn with_auto_load(mut self, auto_load: bool) -> Self {
        self.auto_load = auto_load;
        self
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            auto_save: true,
            auto_load: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// How a node presents to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    /// Finished
    Completed,
    /// Selected and being played
    Current,
    /// Open for selection
    Available,
    /// Not reachable yet
    Locked,
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Completed node ids
    pub completed_nodes: BTreeSet<NodeId>,

    /// Available node ids, in floor order
    pub available_nodes: Vec<NodeId>,

    /// Selected node
    pub current_node: Option<NodeId>,

    /// Nodes in the floor
    pub total_nodes: usize,

    /// Fraction of nodes completed
    pub completion_rate: f64,
}

/// Tracks one run through a floor.
///
/// Owns the progression state and the store it persists to; the graph is
/// shared and never modified.
pub struct ProgressTracker<S: KeyValueStore> {
    graph: Arc<Graph>,
    store: S,
    config: TrackerConfig,
    observer: Box<dyn ProgressObserver>,
    completed: BTreeSet<NodeId>,
    current: Option<NodeId>,
    available: Vec<NodeId>,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Create a tracker, restoring saved progress if `auto_load` is set.
    pub fn new(graph: Arc<Graph>, store: S, config: TrackerConfig) -> Self {
        let mut tracker = Self {
            graph,
            store,
            config,
            observer: Box::new(NoopObserver),
            completed: BTreeSet::new(),
            current: None,
            available: Vec::new(),
        };
        if tracker.config.auto_load {
            tracker.restore();
        }
        tracker.recompute();
        tracker
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// The floor being tracked.
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Completed node ids.
    pub fn completed_nodes(&self) -> &BTreeSet<NodeId> {
        &self.completed
    }

    /// Available node ids, in floor order.
    pub fn available_nodes(&self) -> &[NodeId] {
        &self.available
    }

    /// Selected node.
    pub fn current_node(&self) -> Option<&NodeId> {
        self.current.as_ref()
    }

    /// Level the player is working through: one past the highest completed
    /// level, or 0 before anything is completed.
    pub fn current_level(&self) -> u32 {
        self.completed
            .iter()
            .filter_map(|id| self.graph.node(id))
            .map(|n| n.level + 1)
            .max()
            .unwrap_or(0)
    }

    // === Mutations ===

    /// Mark a node completed. Fails for unknown or already completed nodes.
    pub fn complete_node(&mut self, node_id: &NodeId) -> bool {
        let Some(node) = self.graph.node(node_id) else {
            warn!("Cannot complete unknown node {}", node_id);
            return false;
        };
        if self.completed.contains(node_id) {
            warn!("Node {} is already completed", node_id);
            return false;
        }
        let is_boss = node.is_boss();

        self.completed.insert(node_id.clone());
        self.recompute();
        self.persist();

        if is_boss {
            info!("Boss node {} completed", node_id);
        } else {
            debug!("Completed node {}, now on level {}", node_id, self.current_level());
        }
        self.observer.on_node_complete(node_id, &self.completed, is_boss);
        self.notify_change();
        true
    }

    /// Select a node to play. Fails for unknown nodes or when access is denied.
    pub fn select_node(&mut self, node_id: &NodeId) -> bool {
        let graph = Arc::clone(&self.graph);
        let Some(node) = graph.node(node_id) else {
            warn!("Cannot select unknown node {}", node_id);
            return false;
        };
        if !validate_node_access(node_id, &self.completed, &self.available, &graph) {
            warn!("Access to node {} denied", node_id);
            return false;
        }

        self.current = Some(node_id.clone());
        self.persist();

        debug!("Selected node {}", node_id);
        self.observer.on_node_select(node);
        self.notify_change();
        true
    }

    /// Drop the current selection.
    pub fn clear_current_node(&mut self) {
        if self.current.take().is_some() {
            self.persist();
            self.notify_change();
        }
    }

    /// Forget all progress, including the saved record.
    pub fn reset_progress(&mut self) {
        self.completed.clear();
        self.current = None;
        self.available.clear();
        self.recompute();

        if let Err(e) = clear_progress(&mut self.store, &self.config.storage_key) {
            warn!("Failed to erase saved progress: {}", e);
        }
        info!("Progress reset");
        self.notify_change();
    }

    /// Complete exactly the nodes below `level`, without completion
    /// notifications.
    pub fn set_progress_to_level(&mut self, level: u32) {
        self.completed = self
            .graph
            .nodes()
            .iter()
            .filter(|n| n.level < level)
            .map(|n| n.id.clone())
            .collect();
        self.recompute();
        self.persist();

        info!("Progress set to level {}", level);
        self.notify_change();
    }

    // === Queries ===

    /// Whether the node is in the available tier. Drives both highlighting
    /// and clickability.
    pub fn is_node_available(&self, node_id: &NodeId) -> bool {
        self.available.contains(node_id)
    }

    /// Alias of [`ProgressTracker::is_node_available`].
    pub fn is_node_active(&self, node_id: &NodeId) -> bool {
        self.is_node_available(node_id)
    }

    /// Alias of [`ProgressTracker::is_node_available`].
    pub fn is_node_clickable(&self, node_id: &NodeId) -> bool {
        self.is_node_available(node_id)
    }

    /// Whether the node is completed.
    pub fn is_node_completed(&self, node_id: &NodeId) -> bool {
        self.completed.contains(node_id)
    }

    /// Whether the node is selected.
    pub fn is_node_current(&self, node_id: &NodeId) -> bool {
        self.current.as_ref() == Some(node_id)
    }

    /// Display status of a node.
    pub fn node_status(&self, node_id: &NodeId) -> NodeStatus {
        if self.is_node_completed(node_id) {
            NodeStatus::Completed
        } else if self.is_node_current(node_id) {
            NodeStatus::Current
        } else if self.is_node_available(node_id) {
            NodeStatus::Available
        } else {
            NodeStatus::Locked
        }
    }

    /// An edge is active when it leaves a completed node or joins two
    /// available ones.
    pub fn is_edge_active(&self, edge: &Edge) -> bool {
        self.is_node_completed(&edge.from)
            || (self.is_node_available(&edge.from) && self.is_node_available(&edge.to))
    }

    /// Summary statistics.
    pub fn progress_stats(&self) -> ProgressStats {
        ProgressStats::compute(&self.graph, &self.completed, &self.available)
    }

    /// Open nodes worth playing next, best first.
    pub fn recommendations(&self) -> Vec<&Node> {
        recommended_nodes(&self.graph, &self.available, &self.completed)
    }

    /// Shortest path from the current node (or the first available one) to
    /// `target`. Empty when there is no start or no path.
    pub fn find_path_to_node(&self, target: &NodeId) -> Vec<NodeId> {
        match self.current.as_ref().or_else(|| self.available.first()) {
            Some(start) => shortest_path(&self.graph, start, target),
            None => Vec::new(),
        }
    }

    /// Take a progress snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let total_nodes = self.graph.len();
        ProgressSnapshot {
            timestamp: Utc::now(),
            completed_nodes: self.completed.clone(),
            available_nodes: self.available.clone(),
            current_node: self.current.clone(),
            total_nodes,
            completion_rate: if total_nodes > 0 {
                self.completed.len() as f64 / total_nodes as f64
            } else {
                0.0
            },
        }
    }

    // === Internals ===

    fn recompute(&mut self) {
        let level = self.current_level();
        self.available = self
            .graph
            .nodes_at_level(level)
            .map(|n| n.id.clone())
            .collect();
    }

    fn persist(&mut self) {
        if !self.config.auto_save {
            return;
        }
        if let Err(e) = save_progress(
            &mut self.store,
            &self.config.storage_key,
            &self.completed,
            self.current.as_ref(),
        ) {
            warn!("Failed to save progress: {}", e);
        }
    }

    fn notify_change(&mut self) {
        let snapshot = self.snapshot();
        self.observer.on_progress_change(&snapshot);
    }

    fn restore(&mut self) {
        let Some(record) = load_progress(&self.store, &self.config.storage_key) else {
            return;
        };

        let (known, stale): (Vec<NodeId>, Vec<NodeId>) = record
            .completed_nodes
            .into_iter()
            .partition(|id| self.graph.contains(id));
        if !stale.is_empty() {
            warn!("Dropping {} saved node(s) not on this floor: {:?}", stale.len(), stale);
        }
        self.completed = known.into_iter().collect();

        self.current = match record.current_node {
            Some(id) if self.graph.contains(&id) => Some(id),
            Some(id) => {
                warn!("Dropping saved selection {} not on this floor", id);
                None
            }
            None => None,
        };

        debug!("Restored {} completed node(s)", self.completed.len());
    }
}
