//! Owns the particle state and advances it one tick at a time
//!
//! Each `tick()` runs partition -> pairwise gravity -> integrator and returns
//! a `Snapshot` of every particle, including the ones that were not updated
//! this tick (those report their last-known values).

use log::{debug, trace};

use crate::error::SimError;
use super::engine::Engine;
use super::forces::PairwiseGravity;
use super::integrator::semi_implicit_euler;
use super::params::Parameters;
use super::partition::Partitioner;
use super::snapshot::Snapshot;
use super::states::{NVec3, ParticleSet};

pub struct Simulation {
    particles: ParticleSet,
    params: Parameters,
    engine: Engine,
    gravity: PairwiseGravity,
    partitioner: Box<dyn Partitioner + Send + Sync>,
    tick: u64,
}

impl Simulation {
    /// Validate the configuration and take ownership of the particles
    pub fn new(
        particles: ParticleSet,
        params: Parameters,
        engine: Engine,
    ) -> Result<Self, SimError> {
        if particles.is_empty() {
            return Err(SimError::EmptyParticleSet);
        }
        params.validate()?;
        let partitioner = engine.strategy.build(particles.len())?;
        let gravity = PairwiseGravity::new(&params, &engine);

        debug!(
            "simulation ready: n = {}, strategy = {:?}, sweep = {} ticks",
            particles.len(),
            engine.strategy,
            partitioner.ticks_per_sweep()
        );

        Ok(Self {
            particles,
            params,
            engine,
            gravity,
            partitioner,
            tick: 0,
        })
    }

    /// Advance one tick and return the resulting snapshot
    pub fn tick(&mut self) -> Snapshot {
        let partition = self.partitioner.select(self.tick);
        assert!(
            !partition.targets.is_empty(),
            "partitioner produced an empty target set at tick {}",
            self.tick
        );

        let accelerations = self.gravity.compute_accelerations(
            self.particles.positions.as_slice(),
            &partition.sources,
            &partition.targets,
        );
        semi_implicit_euler(
            &mut self.particles,
            &partition.targets,
            &accelerations,
            &self.params,
        );

        self.tick += 1;
        trace!(
            "tick {} updated {} particles against {} sources",
            self.tick,
            partition.targets.len(),
            partition.sources.count(self.particles.len())
        );

        Snapshot::capture(&self.particles, self.tick)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn ticks_per_sweep(&self) -> usize {
        self.partitioner.ticks_per_sweep()
    }

    /// Mean position (mass is uniform)
    pub fn center_of_mass(&self) -> NVec3 {
        self.particles.positions.sum() / self.particles.len() as f64
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.particles.velocities.sum() * self.params.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        let v2: f64 = self.particles.velocities.iter().map(|v| v.norm_squared()).sum();
        0.5 * self.params.mass * v2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::PartitionStrategy;

    #[test]
    fn tick_counter_and_snapshot_tick_advance_together() {
        let particles = ParticleSet::random_uniform(8, 1.0, 3, 4).unwrap();
        let mut sim =
            Simulation::new(particles, Parameters::default(), Engine::default()).unwrap();
        let s1 = sim.tick();
        let s2 = sim.tick();
        assert_eq!((s1.tick, s2.tick), (1, 2));
        assert_eq!(sim.tick_count(), 2);
        assert_eq!(s2.len(), 8);
    }

    #[test]
    fn batched_tick_leaves_other_particles_in_place() {
        let particles = ParticleSet::random_uniform(9, 1.0, 3, 4).unwrap();
        let before = particles.clone();
        let strategy = PartitionStrategy::FixedBatches { batches: 3 };
        let engine = Engine::default().with_strategy(strategy);
        let mut sim = Simulation::new(particles, Parameters::default(), engine).unwrap();

        let snap = sim.tick();
        for i in 3..9 {
            let p = before.positions[i];
            assert_eq!(snap.positions[i], [p.x, p.y, p.z]);
            assert_eq!(snap.speeds[i], before.speeds[i]);
        }
        let p0 = before.positions[0];
        assert_ne!(snap.positions[0], [p0.x, p0.y, p0.z]);
    }

    #[test]
    fn construction_rejects_invalid_window() {
        let particles = ParticleSet::random_uniform(4, 1.0, 1, 1).unwrap();
        let strategy = PartitionStrategy::RollingWindow { window: 5 };
        let engine = Engine::default().with_strategy(strategy);
        let err = Simulation::new(particles, Parameters::default(), engine).err();
        assert_eq!(err, Some(SimError::InvalidWindow { window: 5, n: 4 }));
    }

    #[test]
    fn keeps_the_engine_it_was_built_with() {
        let particles = ParticleSet::random_uniform(6, 1.0, 2, 2).unwrap();
        let strategy = PartitionStrategy::RollingWindow { window: 2 };
        let engine = Engine { channel_capacity: 3, ..Engine::default() }.with_strategy(strategy);
        let sim = Simulation::new(particles, Parameters::default(), engine).unwrap();
        assert_eq!(sim.engine().strategy, strategy);
        assert_eq!(sim.engine().channel_capacity, 3);
        assert_eq!(sim.ticks_per_sweep(), 3);
    }
}
