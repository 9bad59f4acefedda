//! Node access rules.

use std::collections::BTreeSet;
use runmap_core::{Graph, NodeId};

/// Whether the player may select `node_id`.
///
/// Entry-level nodes are always open, completed nodes stay open for replay,
/// and anything else must be in the available tier. Unknown ids are denied.
pub fn validate_node_access(
    node_id: &NodeId,
    completed: &BTreeSet<NodeId>,
    available: &[NodeId],
    graph: &Graph,
) -> bool {
    let Some(node) = graph.node(node_id) else {
        return false;
    };

    node.level == 0 || completed.contains(node_id) || available.contains(node_id)
}
