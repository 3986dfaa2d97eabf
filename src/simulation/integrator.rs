//! Fixed-step semi-implicit Euler integrator
//!
//! Updates only the particles listed as targets. Both the velocity kick and
//! the position drift are scaled by `time_delta * time_factor`, and the drift
//! uses the velocity produced by the kick in the same step.

use super::params::Parameters;
use super::states::{NVec3, ParticleSet};

/// Advance `targets` by one step using their accelerations.
/// `accelerations[k]` belongs to particle `targets[k]`.
pub fn semi_implicit_euler(
    particles: &mut ParticleSet,
    targets: &[usize],
    accelerations: &[NVec3],
    params: &Parameters,
) {
    assert_eq!(
        targets.len(),
        accelerations.len(),
        "one acceleration per target is required"
    );

    let scale = params.step_scale(); // dt * time_factor

    for (&i, a) in targets.iter().zip(accelerations.iter()) {
        particles.accelerations[i] = *a;

        // Kick: v_n+1 = v_n + a_n * dt * tf
        particles.velocities[i] += *a * scale;

        // Drift with the new velocity: x_n+1 = x_n + v_n+1 * dt * tf
        let v = particles.velocities[i];
        particles.positions[i] += v * scale;

        particles.speeds[i] = v.norm();
    }
}
