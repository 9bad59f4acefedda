//! Progress notifications.

use std::collections::BTreeSet;
use runmap_core::{Node, NodeId};
use crate::tracker::ProgressSnapshot;

/// Receives notifications after the tracker's state has changed.
///
/// Every method sees post-mutation state. All methods default to doing
/// nothing, so observers only implement what they need.
pub trait ProgressObserver {
    /// A node was completed.
    fn on_node_complete(&mut self, _node_id: &NodeId, _completed: &BTreeSet<NodeId>, _is_boss: bool) {}

    /// A node was selected.
    fn on_node_select(&mut self, _node: &Node) {}

    /// Completed, available, or current state changed.
    fn on_progress_change(&mut self, _snapshot: &ProgressSnapshot) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

type CompleteFn = Box<dyn FnMut(&NodeId, &BTreeSet<NodeId>, bool)>;
type SelectFn = Box<dyn FnMut(&Node)>;
type ChangeFn = Box<dyn FnMut(&ProgressSnapshot)>;

/// Observer assembled from closures.
#[derive(Default)]
pub struct Callbacks {
    on_complete: Option<CompleteFn>,
    on_select: Option<SelectFn>,
    on_change: Option<ChangeFn>,
}

impl Callbacks {
    /// No callbacks set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `f` with `(node_id, completed, is_boss)` after each completion.
    pub fn on_node_complete(mut self, f: impl FnMut(&NodeId, &BTreeSet<NodeId>, bool) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Call `f` with the selected node after each selection.
    pub fn on_node_select(mut self, f: impl FnMut(&Node) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Call `f` with a snapshot after every state change.
    pub fn on_progress_change(mut self, f: impl FnMut(&ProgressSnapshot) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

impl ProgressObserver for Callbacks {
    fn on_node_complete(&mut self, node_id: &NodeId, completed: &BTreeSet<NodeId>, is_boss: bool) {
        if let Some(f) = self.on_complete.as_mut() {
            f(node_id, completed, is_boss);
        }
    }

    fn on_node_select(&mut self, node: &Node) {
        if let Some(f) = self.on_select.as_mut() {
            f(node);
        }
    }

    fn on_progress_change(&mut self, snapshot: &ProgressSnapshot) {
        if let Some(f) = self.on_change.as_mut() {
            f(snapshot);
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_complete", &self.on_complete.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
