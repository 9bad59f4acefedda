//! Node recommendations and path finding.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use runmap_core::{Graph, Node, NodeId};

/// Available, not yet completed nodes ordered by type priority, best first.
///
/// The sort is stable, so nodes of equal priority keep their order in
/// `available`.
pub fn recommended_nodes<'g>(
    graph: &'g Graph,
    available: &[NodeId],
    completed: &BTreeSet<NodeId>,
) -> Vec<&'g Node> {
    let mut nodes: Vec<&Node> = available
        .iter()
        .filter(|id| !completed.contains(*id))
        .filter_map(|id| graph.node(id))
        .collect();
    nodes.sort_by_key(|n| Reverse(n.node_type.priority()));
    nodes
}

/// Shortest forward path from `start` to `target`, both ends included.
///
/// Breadth-first over edges in creation order, so among equally short paths
/// the first one discovered wins. Empty when either end is unknown or the
/// target cannot be reached.
pub fn shortest_path(graph: &Graph, start: &NodeId, target: &NodeId) -> Vec<NodeId> {
    let Some(start) = graph.node(start).map(|n| &n.id) else {
        return Vec::new();
    };
    if start == target {
        return vec![start.clone()];
    }

    let mut parents: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut visited: HashSet<&NodeId> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for next in graph.successors(node) {
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, node);

            if next == target {
                let mut path = vec![next.clone()];
                let mut cursor = next;
                while let Some(&parent) = parents.get(cursor) {
                    path.push(parent.clone());
                    cursor = parent;
                }
                path.reverse();
                return path;
            }

            queue.push_back(next);
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use runmap_core::{Edge, NodeType};

    fn ids(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(|id| id.as_str()).collect()
    }

    fn mixed_entry() -> Graph {
        Graph::new(
            vec![
                Node::new("0n1", "Level 0", NodeType::Roll, 0),
                Node::new("0n2", "Level 0", NodeType::Safe, 0),
                Node::new("0n3", "Level 0", NodeType::Emergency, 0),
                Node::new("0n4", "Level 0", NodeType::Encounter, 0),
                Node::new("1n1", "Boss", NodeType::Boss, 1),
            ],
            vec![
                Edge::new("0n1", "1n1"),
                Edge::new("0n2", "1n1"),
                Edge::new("0n3", "1n1"),
                Edge::new("0n4", "1n1"),
            ],
        )
        .unwrap()
    }

    fn ladder() -> Graph {
        Graph::new(
            vec![
                Node::new("0n1", "Level 0", NodeType::Safe, 0),
                Node::new("1n1", "Level 1", NodeType::Combat, 1),
                Node::new("1n2", "Level 1", NodeType::Roll, 1),
                Node::new("2n1", "Level 2", NodeType::Combat, 2),
                Node::new("2n2", "Level 2", NodeType::Encounter, 2),
                Node::new("3n1", "Boss", NodeType::Boss, 3),
            ],
            vec![
                Edge::new("0n1", "1n1"),
                Edge::new("0n1", "1n2"),
                Edge::new("1n1", "2n1"),
                Edge::new("1n2", "2n1"),
                Edge::new("1n2", "2n2"),
                Edge::new("2n1", "3n1"),
                Edge::new("2n2", "3n1"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_recommendation_order() {
        let graph = mixed_entry();
        let available: Vec<NodeId> = ["0n1", "0n2", "0n3", "0n4"].into_iter().map(NodeId::from).collect();
        let recommended = recommended_nodes(&graph, &available, &BTreeSet::new());
        let types: Vec<NodeType> = recommended.iter().map(|n| n.node_type).collect();
        assert_eq!(
            types,
            vec![NodeType::Safe, NodeType::Encounter, NodeType::Roll, NodeType::Emergency]
        );
    }

    #[test]
    fn test_recommendation_ties_keep_order() {
        let graph = ladder();
        let available = vec![NodeId::from("2n1"), NodeId::from("1n1")];
        let recommended = recommended_nodes(&graph, &available, &BTreeSet::new());
        assert_eq!(recommended[0].id.as_str(), "2n1");
        assert_eq!(recommended[1].id.as_str(), "1n1");
    }

    #[test]
    fn test_recommendations_skip_completed() {
        let graph = mixed_entry();
        let available = vec![NodeId::from("0n1"), NodeId::from("0n2")];
        let completed = BTreeSet::from([NodeId::from("0n2")]);
        let recommended = recommended_nodes(&graph, &available, &completed);
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].id.as_str(), "0n1");
    }

    #[test]
    fn test_shortest_path_first_discovered() {
        let graph = ladder();
        let path = shortest_path(&graph, &NodeId::from("0n1"), &NodeId::from("3n1"));
        assert_eq!(ids(&path), vec!["0n1", "1n1", "2n1", "3n1"]);
    }

    #[test]
    fn test_shortest_path_through_branch() {
        let graph = ladder();
        let path = shortest_path(&graph, &NodeId::from("0n1"), &NodeId::from("2n2"));
        assert_eq!(ids(&path), vec!["0n1", "1n2", "2n2"]);
    }

    #[test]
    fn test_path_to_self() {
        let graph = ladder();
        let path = shortest_path(&graph, &NodeId::from("1n2"), &NodeId::from("1n2"));
        assert_eq!(ids(&path), vec!["1n2"]);
    }

    #[test]
    fn test_no_backward_paths() {
        let graph = ladder();
        assert!(shortest_path(&graph, &NodeId::from("2n1"), &NodeId::from("1n1")).is_empty());
        assert!(shortest_path(&graph, &NodeId::from("1n1"), &NodeId::from("2n2")).is_empty());
    }

    #[test]
    fn test_unknown_endpoints() {
        let graph = ladder();
        assert!(shortest_path(&graph, &NodeId::from("9n9"), &NodeId::from("3n1")).is_empty());
        assert!(shortest_path(&graph, &NodeId::from("0n1"), &NodeId::from("9n9")).is_empty());
    }
}
