//! Per-type node content.
//!
//! The graph only carries an opaque handle; whatever renders or plays a node
//! maps the handle to its own encounter implementation.

use serde::{Deserialize, Serialize};
use crate::node::NodeType;

/// Opaque reference to the content played at a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(String);

impl ContentHandle {
    /// Create a handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Handle name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Looks up the content attached to nodes of a given type.
///
/// Implementations must be pure: the generator may call them any number of
/// times per floor.
pub trait ContentResolver {
    /// Resolve the content for `node_type`, or `None` if it has none.
    fn resolve(&self, node_type: NodeType) -> Option<ContentHandle>;
}

impl<F> ContentResolver for F
where
    F: Fn(NodeType) -> Option<ContentHandle>,
{
    fn resolve(&self, node_type: NodeType) -> Option<ContentHandle> {
        self(node_type)
    }
}

/// Default resolver: one handle per node type.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinContent;

impl ContentResolver for BuiltinContent {
    fn resolve(&self, node_type: NodeType) -> Option<ContentHandle> {
        let name = match node_type {
            NodeType::Combat => "combat",
            NodeType::Emergency => "emergency",
            NodeType::Roll => "roll",
            NodeType::Encounter => "encounter",
            NodeType::Safe => "safe",
            NodeType::Boss => "boss",
        };
        Some(ContentHandle::new(name))
    }
}
