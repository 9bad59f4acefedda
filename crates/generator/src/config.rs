//! Generator configuration.

use runmap_core::GraphError;
use serde::{Deserialize, Serialize};

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised before or during generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// Configuration rejected before any work started
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    /// Assembled graph failed its own construction checks
    #[error("generated graph is malformed: {0}")]
    Graph(#[from] GraphError),
}

/// Highest boss level a config may ask for.
pub const MAX_LEVEL_LIMIT: u32 = 1024;

/// Largest per-level node bound a config may ask for.
pub const MAX_NODES_PER_LEVEL_LIMIT: u32 = 64;

/// Size of a generated floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Highest level index, inclusive; the boss lives here
    pub max_level: u32,

    /// Upper bound on nodes per non-boss level
    pub max_nodes_per_level: u32,
}

impl GeneratorConfig {
    /// Create a config.
    pub fn new(max_level: u32, max_nodes_per_level: u32) -> Self {
        Self {
            max_level,
            max_nodes_per_level,
        }
    }

    /// Set the boss level.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the per-level node bound.
    pub fn with_max_nodes_per_level(mut self, max_nodes_per_level: u32) -> Self {
        self.max_nodes_per_level = max_nodes_per_level;
        self
    }

    /// Reject configurations that cannot produce a floor.
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes_per_level < 1 {
            return Err(GeneratorError::InvalidConfig(
                "max_nodes_per_level must be at least 1".to_string(),
            ));
        }
        if self.max_nodes_per_level > MAX_NODES_PER_LEVEL_LIMIT {
            return Err(GeneratorError::InvalidConfig(format!(
                "max_nodes_per_level must be at most {}, got {}",
                MAX_NODES_PER_LEVEL_LIMIT, self.max_nodes_per_level
            )));
        }
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(GeneratorError::InvalidConfig(format!(
                "max_level must be at most {}, got {}",
                MAX_LEVEL_LIMIT, self.max_level
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_level: 5,
            max_nodes_per_level: 4,
        }
    }
}
