//! Unique identifiers for floor nodes.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node in a floor graph.
///
/// Generated ids follow the `{level}n{index}` format with a 1-based index
/// inside the level, e.g. `0n1`, `3n2`. Ids read back from storage or typed
/// by a user are accepted as-is; lookups against a graph decide whether they
/// refer to anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the node at `index` (0-based) within `level`.
    pub fn at(level: u32, index: usize) -> Self {
        Self(format!("{}n{}", level, index + 1))
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for NodeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
