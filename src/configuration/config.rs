//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – partitioning strategy, singularity policy, force law
//! - [`ParametersConfig`] – physical constants and step size
//! - [`ParticlesConfig`]  – random initial state (count, extent, seeds) or explicit bodies
//! - [`RunConfig`]        – how many frames the headless runner produces
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   strategy: { kind: rolling_window, window: 1000 }
//!   singularity: guarded       # or filter_non_finite
//!   falloff: inverse_square    # or inverse
//!   parallel: true
//!   channel_capacity: 10
//!
//! parameters:
//!   g: 10.0
//!   mass: 0.0001
//!   time_delta: 0.05
//!   time_factor: 0.5
//!   min_distance: 1.0e-9
//!
//! particles:
//!   count: 10000
//!   extent: 1.0
//!   position_seed: 1
//!   velocity_seed: 1
//!
//! run:
//!   duration: 60.0             # frames = duration / time_delta
//! ```
//!
//! `particles` may list explicit bodies instead:
//!
//! ```yaml
//! particles:
//!   bodies:
//!     - { x: [-1.0, 0.0, 0.0], v: [0.0, 0.0, 0.0] }
//!     - { x: [ 1.0, 0.0, 0.0], v: [0.0, 0.0, 0.0] }
//! ```

use serde::Deserialize;

use crate::simulation::channel::DEFAULT_CAPACITY;

/// Which particles are updated on a tick
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// every particle, every tick
    Full,
    /// `batches` contiguous batches, one per tick
    FixedBatches { batches: usize },
    /// `window` consecutive indices per tick, wrapping at N
    RollingWindow { window: usize },
}

/// How a pair at (near) zero separation is handled
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// zero contribution when the separation is below `min_distance`
    #[default]
    Guarded,
    /// compute, then zero NaN and infinite components
    FilterNonFinite,
}

/// Radial dependence of the pair force
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    #[default]
    InverseSquare, // G m^2 / r^2
    Inverse, // G m^2 / r
}

/// Engine-level options
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_strategy")]
    pub strategy: PartitionStrategy,
    #[serde(default)]
    pub singularity: SingularityPolicy,
    #[serde(default)]
    pub falloff: Falloff,
    #[serde(default)]
    pub parallel: bool, // spread targets over the rayon pool
    #[serde(default = "default_capacity")]
    pub channel_capacity: usize, // pending snapshots before the producer blocks
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            singularity: SingularityPolicy::default(),
            falloff: Falloff::default(),
            parallel: false,
            channel_capacity: default_capacity(),
        }
    }
}

fn default_strategy() -> PartitionStrategy {
    PartitionStrategy::Full
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Physical constants and step size
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub g: f64, // gravitational constant
    pub mass: f64, // mass shared by every particle
    pub time_delta: f64, // step size
    pub time_factor: f64, // scale applied to both updates
    #[serde(default = "default_min_distance")]
    pub min_distance: f64, // pairs closer than this contribute nothing
}

fn default_min_distance() -> f64 {
    1.0e-9
}

/// Configuration for a single particle's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position, 3 components
    pub v: Vec<f64>, // initial velocity, 3 components
}

/// Initial particle state
#[derive(Deserialize, Debug, Clone)]
pub struct ParticlesConfig {
    #[serde(default)]
    pub count: Option<usize>, // random particles, ignored when `bodies` is given
    #[serde(default = "default_extent")]
    pub extent: f64, // random components drawn from [-extent, extent)
    #[serde(default = "default_seed")]
    pub position_seed: u64,
    #[serde(default = "default_seed")]
    pub velocity_seed: u64,
    #[serde(default)]
    pub bodies: Option<Vec<BodyConfig>>,
}

fn default_extent() -> f64 {
    1.0
}

fn default_seed() -> u64 {
    1
}

/// Length of a headless run
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunConfig {
    #[serde(default)]
    pub frames: Option<u64>, // explicit frame count
    #[serde(default)]
    pub duration: Option<f64>, // simulated time, frames = duration / time_delta
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub particles: ParticlesConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_scenario() {
        let yaml = r#"
engine:
  strategy: { kind: fixed_batches, batches: 4 }
  singularity: filter_non_finite
  falloff: inverse
  parallel: true
parameters:
  g: 10.0
  mass: 0.0001
  time_delta: 0.05
  time_factor: 0.5
particles:
  count: 100
  position_seed: 7
run:
  duration: 60.0
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.engine.strategy, PartitionStrategy::FixedBatches { batches: 4 });
        assert_eq!(cfg.engine.singularity, SingularityPolicy::FilterNonFinite);
        assert_eq!(cfg.engine.falloff, Falloff::Inverse);
        assert_eq!(cfg.engine.channel_capacity, DEFAULT_CAPACITY);
        assert_eq!(cfg.particles.count, Some(100));
        assert_eq!(cfg.particles.position_seed, 7);
        assert_eq!(cfg.particles.velocity_seed, 1);
        assert_eq!(cfg.parameters.min_distance, 1.0e-9);
        assert_eq!(cfg.run.duration, Some(60.0));
    }

    #[test]
    fn engine_section_is_optional() {
        let yaml = r#"
parameters: { g: 1.0, mass: 1.0, time_delta: 0.1, time_factor: 1.0 }
particles:
  bodies:
    - { x: [0.0, 0.0, 0.0], v: [0.0, 0.0, 0.0] }
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.engine.strategy, PartitionStrategy::Full);
        assert_eq!(cfg.engine.singularity, SingularityPolicy::Guarded);
        assert_eq!(cfg.particles.bodies.map(|b| b.len()), Some(1));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let yaml = r#"
engine:
  strategy: { kind: octree }
parameters: { g: 1.0, mass: 1.0, time_delta: 0.1, time_factor: 1.0 }
particles: { count: 2 }
"#;
        assert!(ScenarioConfig::from_yaml_str(yaml).is_err());
    }
}
