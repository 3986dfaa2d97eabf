//! High-level runtime engine settings
//!
//! Selects the partitioning strategy, singularity policy and force law
//! used when building and running a `Simulation`

use crate::configuration::config::{EngineConfig, Falloff, PartitionStrategy, SingularityPolicy};

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub strategy: PartitionStrategy, // full pass, fixed batches or rolling window
    pub singularity: SingularityPolicy, // guarded division or non-finite filter
    pub falloff: Falloff, // 1/r^2 or 1/r
    pub parallel: bool, // rayon over targets
    pub channel_capacity: usize, // snapshots buffered between producer and consumer
}

impl Default for Engine {
    fn default() -> Self {
        Self::from(EngineConfig::default())
    }
}

impl From<EngineConfig> for Engine {
    fn from(cfg: EngineConfig) -> Self {
        Self {
            strategy: cfg.strategy,
            singularity: cfg.singularity,
            falloff: cfg.falloff,
            parallel: cfg.parallel,
            channel_capacity: cfg.channel_capacity,
        }
    }
}

impl Engine {
    pub fn with_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_singularity(mut self, singularity: SingularityPolicy) -> Self {
        self.singularity = singularity;
        self
    }
}
