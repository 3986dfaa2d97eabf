//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - engine settings (`Engine`)
//! - physical constants (`Parameters`)
//! - the initial particle state (`ParticleSet`)
//! - the number of frames a headless run should produce

use log::info;

use crate::configuration::config::{BodyConfig, ParticlesConfig, RunConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::driver::Simulation;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, ParticleSet};

/// Frames produced when the scenario does not say how long to run
pub const DEFAULT_DURATION: f64 = 60.0;

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub particles: ParticleSet,
    pub frames: u64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            mass: p_cfg.mass,
            time_delta: p_cfg.time_delta,
            time_factor: p_cfg.time_factor,
            min_distance: p_cfg.min_distance,
        };
        parameters.validate()?;

        let engine = Engine::from(cfg.engine);
        let particles = build_particles(&cfg.particles)?;
        let frames = frame_count(&cfg.run, parameters.time_delta);

        info!(
            "scenario: {} particles, {:?}, {} frames",
            particles.len(),
            engine.strategy,
            frames
        );

        Ok(Self {
            engine,
            parameters,
            particles,
            frames,
        })
    }

    /// Hand the state over to a validated `Simulation`
    pub fn into_simulation(self) -> Result<Simulation, SimError> {
        Simulation::new(self.particles, self.parameters, self.engine)
    }
}

fn build_particles(cfg: &ParticlesConfig) -> Result<ParticleSet, SimError> {
    if let Some(bodies) = &cfg.bodies {
        let mut positions = Vec::with_capacity(bodies.len());
        let mut velocities = Vec::with_capacity(bodies.len());
        for (index, bc) in bodies.iter().enumerate() {
            let (x, v) = body_vectors(index, bc)?;
            positions.push(x);
            velocities.push(v);
        }
        return ParticleSet::from_states(positions, velocities);
    }

    match cfg.count {
        Some(n) if n > 0 => {
            ParticleSet::random_uniform(n, cfg.extent, cfg.position_seed, cfg.velocity_seed)
        }
        _ => Err(SimError::EmptyParticleSet),
    }
}

fn body_vectors(index: usize, bc: &BodyConfig) -> Result<(NVec3, NVec3), SimError> {
    if bc.x.len() != 3 || bc.v.len() != 3 {
        return Err(SimError::InvalidBody {
            index,
            reason: format!("expected 3 components, got x: {}, v: {}", bc.x.len(), bc.v.len()),
        });
    }
    Ok((
        NVec3::new(bc.x[0], bc.x[1], bc.x[2]),
        NVec3::new(bc.v[0], bc.v[1], bc.v[2]),
    ))
}

/// Explicit frame count wins, otherwise duration / time_delta
fn frame_count(run: &RunConfig, time_delta: f64) -> u64 {
    match (run.frames, run.duration) {
        (Some(frames), _) => frames,
        (None, Some(duration)) => (duration / time_delta) as u64,
        (None, None) => (DEFAULT_DURATION / time_delta) as u64,
    }
}
