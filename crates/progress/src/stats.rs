//! Progress statistics.

use std::collections::BTreeSet;
use runmap_core::{Graph, NodeId};
use serde::{Deserialize, Serialize};

/// Summary counts for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Nodes in the floor
    pub total_nodes: usize,

    /// Completed nodes
    pub completed: usize,

    /// Nodes currently available
    pub available: usize,

    /// Nodes neither completed nor available, never negative
    pub locked: usize,

    /// `completed / total_nodes`, 0 for an empty floor
    pub completion_rate: f64,

    /// Boss nodes in the floor
    pub boss_nodes: usize,

    /// Boss nodes completed
    pub boss_completed: usize,

    /// Every boss has been beaten
    pub is_game_complete: bool,
}

impl ProgressStats {
    /// Compute stats for a state.
    pub fn compute(graph: &Graph, completed: &BTreeSet<NodeId>, available: &[NodeId]) -> Self {
        let total_nodes = graph.len();
        let completed_count = completed.len();
        let available_count = available.len();

        let bosses = graph.nodes().iter().filter(|n| n.is_boss());
        let (boss_nodes, boss_completed) = bosses.fold((0, 0), |(all, done), n| {
            (all + 1, done + usize::from(completed.contains(&n.id)))
        });

        let completion_rate = if total_nodes > 0 {
            completed_count as f64 / total_nodes as f64
        } else {
            0.0
        };

        Self {
            total_nodes,
            completed: completed_count,
            available: available_count,
            locked: total_nodes.saturating_sub(completed_count + available_count),
            completion_rate,
            boss_nodes,
            boss_completed,
            is_game_complete: boss_completed == boss_nodes,
        }
    }
}
