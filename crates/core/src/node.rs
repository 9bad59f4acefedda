//! Node and edge models.

use serde::{Deserialize, Serialize};
use crate::content::ContentHandle;
use crate::id::NodeId;

/// Encounter category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Regular operation
    Combat,
    /// Emergency operation
    Emergency,
    /// Interlude with a dice roll
    Roll,
    /// Chance encounter
    Encounter,
    /// Rest stop, always used for the entry level
    Safe,
    /// Final encounter of the floor
    Boss,
}

impl NodeType {
    /// Every node type.
    pub const ALL: [NodeType; 6] = [
        NodeType::Combat,
        NodeType::Emergency,
        NodeType::Roll,
        NodeType::Encounter,
        NodeType::Safe,
        NodeType::Boss,
    ];

    /// Types drawn for nodes between the entry level and the boss.
    pub const ENCOUNTER_POOL: [NodeType; 5] = [
        NodeType::Combat,
        NodeType::Emergency,
        NodeType::Roll,
        NodeType::Encounter,
        NodeType::Safe,
    ];

    /// Recommendation priority, higher is better.
    pub fn priority(&self) -> u8 {
        match self {
            NodeType::Safe => 5,
            NodeType::Encounter => 4,
            NodeType::Combat => 3,
            NodeType::Roll => 2,
            NodeType::Emergency => 1,
            NodeType::Boss => 0,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Combat => "COMBAT",
            NodeType::Emergency => "EMERGENCY",
            NodeType::Roll => "ROLL",
            NodeType::Encounter => "ENCOUNTER",
            NodeType::Safe => "SAFE",
            NodeType::Boss => "BOSS",
        }
    }

    /// Parse from the serialized name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// An encounter node in the floor graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Display text
    pub label: String,

    /// Encounter category
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Depth tier, 0 is the entry level
    pub level: u32,

    /// Type-specific payload, if the resolver had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentHandle>,
}

impl Node {
    /// Create a node without content.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, node_type: NodeType, level: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            level,
            content: None,
        }
    }

    /// Attach a content handle.
    pub fn with_content(mut self, content: Option<ContentHandle>) -> Self {
        self.content = content;
        self
    }

    /// Whether this is a boss node.
    pub fn is_boss(&self) -> bool {
        self.node_type == NodeType::Boss
    }
}

/// Directed edge from a node to a node on the next level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub from: NodeId,

    /// Target node
    pub to: NodeId,
}

impl Edge {
    /// Create an edge.
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
