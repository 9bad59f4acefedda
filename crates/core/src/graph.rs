//! Floor graph - leveled DAG of encounter nodes.

use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use crate::id::NodeId;
use crate::node::{Edge, Node};

/// Structural problems in a floor graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Graph has no nodes
    #[error("graph has no nodes")]
    Empty,

    /// Two nodes share an id
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// Edge references a node that does not exist
    #[error("edge references unknown node: {0}")]
    UnknownNode(NodeId),

    /// Edge skips or reverses levels
    #[error("edge {from} -> {to} does not connect adjacent levels")]
    NonAdjacentEdge {
        /// Source node
        from: NodeId,
        /// Target node
        to: NodeId,
    },

    /// The top level must hold exactly one boss node and nothing else
    #[error("expected a single boss node on the top level, found {bosses} boss node(s) and {top_level_nodes} top-level node(s)")]
    BossLayout {
        /// Boss nodes anywhere in the graph
        bosses: usize,
        /// Nodes on the top level
        top_level_nodes: usize,
    },

    /// Node above the entry level cannot be reached
    #[error("node {0} has no incoming edge")]
    MissingInbound(NodeId),

    /// Node below the top level is a dead end
    #[error("node {0} has no outgoing edge")]
    MissingOutbound(NodeId),

    /// Node on the level before the boss does not lead to it
    #[error("node {0} has no edge to the boss")]
    MissingBossEdge(NodeId),
}

/// A generated floor: nodes plus edges between consecutive levels.
///
/// Immutable once built. Nodes keep their creation order, which is level by
/// level and, inside a level, by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawGraph", into = "RawGraph")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
}

#[derive(Serialize, Deserialize)]
struct RawGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        Graph::new(raw.nodes, raw.edges)
    }
}

impl From<Graph> for RawGraph {
    fn from(graph: Graph) -> Self {
        RawGraph {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

impl Graph {
    /// Build a graph. Ids must be unique and every edge must join two known
    /// nodes on adjacent levels; connectivity is checked by [`Graph::validate`].
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> crate::Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        for edge in &edges {
            let from = index
                .get(&edge.from)
                .map(|&i| &nodes[i])
                .ok_or_else(|| GraphError::UnknownNode(edge.from.clone()))?;
            let to = index
                .get(&edge.to)
                .map(|&i| &nodes[i])
                .ok_or_else(|| GraphError::UnknownNode(edge.to.clone()))?;
            if from.level + 1 != to.level {
                return Err(GraphError::NonAdjacentEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }

        Ok(Self { nodes, edges, index })
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Highest level present, `None` for an empty graph.
    pub fn max_level(&self) -> Option<u32> {
        self.nodes.iter().map(|n| n.level).max()
    }

    /// The boss node, if there is exactly one.
    pub fn boss(&self) -> Option<&Node> {
        let mut bosses = self.nodes.iter().filter(|n| n.is_boss());
        match (bosses.next(), bosses.next()) {
            (Some(boss), None) => Some(boss),
            _ => None,
        }
    }

    /// Nodes on `level`, in creation order.
    pub fn nodes_at_level(&self, level: u32) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.level == level)
    }

    /// Nodes grouped by level.
    pub fn levels(&self) -> BTreeMap<u32, Vec<&Node>> {
        let mut levels: BTreeMap<u32, Vec<&Node>> = BTreeMap::new();
        for node in &self.nodes {
            levels.entry(node.level).or_default().push(node);
        }
        levels
    }

    /// Targets of edges leaving `id`, in edge order.
    pub fn successors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges.iter().filter(move |e| &e.from == id).map(|e| &e.to)
    }

    /// Sources of edges entering `id`, in edge order.
    pub fn predecessors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges.iter().filter(move |e| &e.to == id).map(|e| &e.from)
    }

    /// Number of edges entering `id`.
    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.predecessors(id).count()
    }

    /// Number of edges leaving `id`.
    pub fn out_degree(&self, id: &NodeId) -> usize {
        self.successors(id).count()
    }

    /// Whether the edge `from -> to` exists.
    pub fn has_edge(&self, from: &NodeId, to: &NodeId) -> bool {
        self.edges.iter().any(|e| &e.from == from && &e.to == to)
    }

    /// Check the floor invariants: a single boss alone on the top level,
    /// no unreachable nodes, no dead ends, and every node on the level
    /// before the boss leading straight to it.
    pub fn validate(&self) -> crate::Result<()> {
        let max_level = self.max_level().ok_or(GraphError::Empty)?;

        let bosses = self.nodes.iter().filter(|n| n.is_boss()).count();
        let top: Vec<&Node> = self.nodes_at_level(max_level).collect();
        let boss = match top.as_slice() {
            [only] if only.is_boss() && bosses == 1 => *only,
            _ => {
                return Err(GraphError::BossLayout {
                    bosses,
                    top_level_nodes: top.len(),
                })
            }
        };

        for node in &self.nodes {
            if node.level > 0 && self.in_degree(&node.id) == 0 {
                return Err(GraphError::MissingInbound(node.id.clone()));
            }
            if node.level < max_level && self.out_degree(&node.id) == 0 {
                return Err(GraphError::MissingOutbound(node.id.clone()));
            }
            if node.level + 1 == max_level && !self.has_edge(&node.id, &boss.id) {
                return Err(GraphError::MissingBossEdge(node.id.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    fn diamond() -> Graph {
        let nodes = vec![
            Node::new("0n1", "Level 0", NodeType::Safe, 0),
            Node::new("1n1", "Level 1", NodeType::Combat, 1),
            Node::new("1n2", "Level 1", NodeType::Roll, 1),
            Node::new("2n1", "Boss", NodeType::Boss, 2),
        ];
        let edges = vec![
            Edge::new("0n1", "1n1"),
            Edge::new("0n1", "1n2"),
            Edge::new("1n1", "2n1"),
            Edge::new("1n2", "2n1"),
        ];
        Graph::new(nodes, edges).unwrap()
    }

    #[test]
    fn test_lookup_and_degrees() {
        let graph = diamond();
        let start = NodeId::from("0n1");
        let boss = NodeId::from("2n1");

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.max_level(), Some(2));
        assert_eq!(graph.boss().map(|n| &n.id), Some(&boss));
        assert_eq!(graph.out_degree(&start), 2);
        assert_eq!(graph.in_degree(&boss), 2);
        assert_eq!(
            graph.successors(&start).cloned().collect::<Vec<_>>(),
            vec![NodeId::from("1n1"), NodeId::from("1n2")]
        );
        assert!(graph.node(&NodeId::from("9n9")).is_none());
    }

    #[test]
    fn test_levels_grouping() {
        let graph = diamond();
        let levels = graph.levels();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[&1].len(), 2);
        assert_eq!(levels[&1][0].id.as_str(), "1n1");
    }

    #[test]
    fn test_valid_graph_passes() {
        assert_eq!(diamond().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let nodes = vec![
            Node::new("0n1", "Level 0", NodeType::Safe, 0),
            Node::new("0n1", "Level 0", NodeType::Safe, 0),
        ];
        assert_eq!(
            Graph::new(nodes, vec![]).unwrap_err(),
            GraphError::DuplicateNode(NodeId::from("0n1"))
        );
    }

    #[test]
    fn test_rejects_level_skipping_edge() {
        let nodes = vec![
            Node::new("0n1", "Level 0", NodeType::Safe, 0),
            Node::new("1n1", "Level 1", NodeType::Combat, 1),
            Node::new("2n1", "Boss", NodeType::Boss, 2),
        ];
        let err = Graph::new(nodes, vec![Edge::new("0n1", "2n1")]).unwrap_err();
        assert!(matches!(err, GraphError::NonAdjacentEdge { .. }));
    }

    #[test]
    fn test_rejects_unknown_endpoint() {
        let nodes = vec![Node::new("0n1", "Level 0", NodeType::Safe, 0)];
        let err = Graph::new(nodes, vec![Edge::new("0n1", "1n7")]).unwrap_err();
        assert_eq!(err, GraphError::UnknownNode(NodeId::from("1n7")));
    }

    #[test]
    fn test_validate_reports_dead_end() {
        let nodes = vec![
            Node::new("0n1", "Level 0", NodeType::Safe, 0),
            Node::new("1n1", "Level 1", NodeType::Combat, 1),
            Node::new("1n2", "Level 1", NodeType::Roll, 1),
            Node::new("2n1", "Boss", NodeType::Boss, 2),
        ];
        let edges = vec![
            Edge::new("0n1", "1n1"),
            Edge::new("0n1", "1n2"),
            Edge::new("1n1", "2n1"),
        ];
        let graph = Graph::new(nodes, edges).unwrap();
        assert_eq!(graph.validate(), Err(GraphError::MissingOutbound(NodeId::from("1n2"))));
    }

    #[test]
    fn test_validate_reports_disconnected_levels() {
        let nodes = vec![
            Node::new("0n1", "Level 0", NodeType::Safe, 0),
            Node::new("1n1", "Boss", NodeType::Boss, 1),
        ];
        let graph = Graph::new(nodes, vec![]).unwrap();
        assert_eq!(graph.validate(), Err(GraphError::MissingOutbound(NodeId::from("0n1"))));
    }

    #[test]
    fn test_validate_requires_single_boss() {
        let nodes = vec![
            Node::new("0n1", "Level 0", NodeType::Boss, 0),
            Node::new("1n1", "Boss", NodeType::Boss, 1),
        ];
        let graph = Graph::new(nodes, vec![Edge::new("0n1", "1n1")]).unwrap();
        assert_eq!(
            graph.validate(),
            Err(GraphError::BossLayout { bosses: 2, top_level_nodes: 1 })
        );
        assert!(graph.boss().is_none());
    }

    #[test]
    fn test_empty_graph_is_invalid() {
        let graph = Graph::new(vec![], vec![]).unwrap();
        assert_eq!(graph.validate(), Err(GraphError::Empty));
    }

    #[test]
    fn test_json_round_trip_rebuilds_index() {
        let graph = diamond();
        let json = serde_json::to_string(&graph).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nodes(), graph.nodes());
        assert!(back.contains(&NodeId::from("1n2")));
    }

    #[test]
    fn test_json_with_bad_edge_is_rejected() {
        let json = r#"{"nodes":[{"id":"0n1","label":"Level 0","type":"SAFE","level":0}],
                       "edges":[{"from":"0n1","to":"1n1"}]}"#;
        assert!(serde_json::from_str::<Graph>(json).is_err());
    }
}
