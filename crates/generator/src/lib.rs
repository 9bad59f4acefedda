//! Floor generation.
//!
//! Builds a random leveled DAG: a safe entry level, randomly typed middle
//! levels, and a single boss on top, with edges repaired until every node is
//! reachable and every path ends at the boss.

#![warn(missing_docs)]

pub mod config;
pub mod dag;

pub use config::{GeneratorConfig, GeneratorError, Result, MAX_LEVEL_LIMIT, MAX_NODES_PER_LEVEL_LIMIT};
pub use dag::{GraphGenerator, generate_dag_graph, MAX_FAN_OUT};
