//! Runmap core data models.
//!
//! This crate defines the floor graph that a run travels through: encounter
//! nodes organized into levels, the edges between adjacent levels, and the
//! content handles attached to each node type.

#![warn(missing_docs)]

// Core identities
mod id;

// Floor graph
mod node;
mod content;
mod graph;

// Re-exports
pub use id::NodeId;
pub use node::{Node, NodeType, Edge};
pub use content::{ContentHandle, ContentResolver, BuiltinContent};
pub use graph::{Graph, GraphError};

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
