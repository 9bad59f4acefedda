use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runmap_core::{Graph, NodeType};
use runmap_generator::generate_dag_graph;

fn floor(max_level: u32, width: u32, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_dag_graph(max_level, width, &mut rng).unwrap()
}

proptest! {
    #[test]
    fn exactly_one_boss_on_top(max_level in 0u32..12, width in 1u32..7, seed in any::<u64>()) {
        let graph = floor(max_level, width, seed);
        let bosses: Vec<_> = graph.nodes().iter().filter(|n| n.node_type == NodeType::Boss).collect();
        prop_assert_eq!(bosses.len(), 1);
        prop_assert_eq!(bosses[0].level, max_level);
        prop_assert_eq!(graph.nodes_at_level(max_level).count(), 1);
    }

    #[test]
    fn edges_join_adjacent_levels(max_level in 0u32..12, width in 1u32..7, seed in any::<u64>()) {
        let graph = floor(max_level, width, seed);
        for edge in graph.edges() {
            let from = graph.node(&edge.from).unwrap();
            let to = graph.node(&edge.to).unwrap();
            prop_assert_eq!(from.level + 1, to.level);
        }
    }

    #[test]
    fn every_node_reachable_and_continues(max_level in 0u32..12, width in 1u32..7, seed in any::<u64>()) {
        let graph = floor(max_level, width, seed);
        for node in graph.nodes() {
            if node.level > 0 {
                prop_assert!(graph.in_degree(&node.id) >= 1, "{} has no inbound edge", node.id);
            }
            if node.level < max_level {
                prop_assert!(graph.out_degree(&node.id) >= 1, "{} is a dead end", node.id);
            }
        }
    }

    #[test]
    fn penultimate_level_converges_on_boss(max_level in 1u32..12, width in 1u32..7, seed in any::<u64>()) {
        let graph = floor(max_level, width, seed);
        let boss = graph.boss().unwrap();
        for node in graph.nodes_at_level(max_level - 1) {
            prop_assert!(graph.has_edge(&node.id, &boss.id));
        }
    }

    #[test]
    fn no_duplicate_edges(max_level in 0u32..12, width in 1u32..7, seed in any::<u64>()) {
        let graph = floor(max_level, width, seed);
        let mut seen = std::collections::HashSet::new();
        for edge in graph.edges() {
            prop_assert!(seen.insert(edge.clone()), "duplicate edge {} -> {}", edge.from, edge.to);
        }
    }

    #[test]
    fn validate_accepts_every_floor(max_level in 0u32..12, width in 1u32..7, seed in any::<u64>()) {
        prop_assert_eq!(floor(max_level, width, seed).validate(), Ok(()));
    }

    #[test]
    fn same_seed_same_floor(max_level in 0u32..10, width in 1u32..6, seed in any::<u64>()) {
        let a = floor(max_level, width, seed);
        let b = floor(max_level, width, seed);
        prop_assert_eq!(a.nodes(), b.nodes());
        prop_assert_eq!(a.edges(), b.edges());
    }
}
