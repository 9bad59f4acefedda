//! Progression Tracking
//!
//! Node availability, completion, selection, persistence, and
//! recommendations for a run through a generated floor.

#![warn(missing_docs)]

pub mod tracker;
pub mod access;
pub mod observer;
pub mod persistence;
pub mod stats;
pub mod recommend;

pub use tracker::{ProgressTracker, ProgressSnapshot, TrackerConfig, NodeStatus};
pub use access::validate_node_access;
pub use observer::{ProgressObserver, NoopObserver, Callbacks};
pub use persistence::{ProgressRecord, save_progress, load_progress, clear_progress, DEFAULT_STORAGE_KEY};
pub use stats::ProgressStats;
pub use recommend::{recommended_nodes, shortest_path};
