pub mod error;
pub mod simulation;
pub mod configuration;
pub mod runner;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{NVec3, VectorField, ParticleSet};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::forces::PairwiseGravity;
pub use simulation::partition::{
    Partition, Partitioner, Sources, FullPass, FixedBatches, RollingWindow,
};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::snapshot::{Snapshot, FrameStats};
pub use simulation::channel::{
    snapshot_channel, SnapshotSender, SnapshotReceiver, DEFAULT_CAPACITY,
};
pub use simulation::driver::Simulation;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    ScenarioConfig, EngineConfig, ParametersConfig, ParticlesConfig, BodyConfig, RunConfig,
    PartitionStrategy, SingularityPolicy, Falloff,
};

pub use runner::{run_headless, spawn_producer, consume, RunSummary};

pub use benchmark::benchmark::{bench_strategies, bench_policies};
