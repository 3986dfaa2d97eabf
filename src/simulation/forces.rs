//! Pairwise gravitational accelerations
//!
//! `PairwiseGravity` computes, for each target particle, the summed
//! acceleration from every source particle. Sources and targets are index
//! lists into one shared position slice, so a pass can be dense (all vs all),
//! batched (a subset vs all) or peer-to-peer (a subset vs another subset).
//!
//! Pairs closer than `min_distance`, including a particle paired with itself,
//! contribute exactly zero.

use rayon::prelude::*;

use crate::configuration::config::{Falloff, SingularityPolicy};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::partition::Sources;
use crate::simulation::states::NVec3;

/// Direct-sum Newtonian gravity for uniform-mass particles
#[derive(Debug, Clone)]
pub struct PairwiseGravity {
    pub g: f64,
    pub mass: f64,
    pub min_distance: f64,
    pub singularity: SingularityPolicy,
    pub falloff: Falloff,
    pub parallel: bool, // evaluate targets on the rayon pool
}

impl PairwiseGravity {
    pub fn new(params: &Parameters, engine: &Engine) -> Self {
        Self {
            g: params.g,
            mass: params.mass,
            min_distance: params.min_distance,
            singularity: engine.singularity,
            falloff: engine.falloff,
            parallel: engine.parallel,
        }
    }

    /// Acceleration felt by a particle at `target` due to one at `source`
    pub fn pair_contribution(&self, target: &NVec3, source: &NVec3) -> NVec3 {
        // d is the displacement from the target to the source.
        // Gravity is attractive, so the target is pulled along +d and the
        // source (in its own pass) along -d: equal and opposite.
        let d = source - target;

        // Separation distance |d|, exactly 0 for a particle paired with itself
        let r = d.norm();

        match self.singularity {
            SingularityPolicy::Guarded => {
                // Guarded division:
                // - r == 0 is the self pair or two coincident particles
                // - r < min_distance is a pair too close to resolve
                // Either way the pair contributes nothing, never NaN/Inf
                if r == 0.0 || r < self.min_distance {
                    return NVec3::zeros();
                }

                // A pair above the guard can still be close enough that
                // r^2 underflows and the magnitude overflows to +inf
                let magnitude = self.magnitude(r);
                if !magnitude.is_finite() {
                    return NVec3::zeros();
                }

                // unit vector d / r scaled by |a|
                (d / r) * magnitude
            }
            SingularityPolicy::FilterNonFinite => {
                // Compute first, clean up after:
                // r == 0 gives (0/0) * inf = NaN per component, and a pair
                // close enough to overflow gives inf. Both are zeroed here
                // before the contribution reaches the sum.
                let a = (d / r) * self.magnitude(r);
                a.map(|c| if c.is_finite() { c } else { 0.0 })
            }
        }
    }

    /// |a| = (G * m^2 / r^k) / m
    fn magnitude(&self, r: f64) -> f64 {
        // r^k for the selected law:
        // - inverse square, the Newtonian force
        // - inverse, the softer law the demo was tuned with
        let denom = match self.falloff {
            Falloff::InverseSquare => r * r,
            Falloff::Inverse => r,
        };

        // Force between two equal masses: F = G * m * m / r^k
        let force = self.g * (self.mass * self.mass) / denom;

        // Newton's second law on the target: a = F / m.
        // The mass cancels algebraically but the division is kept so the
        // rounding matches a force-first evaluation.
        force / self.mass
    }

    /// Net acceleration on a particle at `target` from every source
    pub fn acceleration_on(
        &self,
        target: &NVec3,
        positions: &[NVec3],
        sources: &Sources,
    ) -> NVec3 {
        // Sum contributions in source order; the self pair adds an exact zero
        let mut acc = NVec3::zeros();
        match sources {
            Sources::All => {
                for source in positions {
                    acc += self.pair_contribution(target, source);
                }
            }
            Sources::Indices(indices) => {
                for &s in indices {
                    acc += self.pair_contribution(target, &positions[s]);
                }
            }
        }
        acc
    }

    /// Accelerations for `targets` against `sources`, aligned with `targets`
    pub fn compute_accelerations(
        &self,
        positions: &[NVec3],
        sources: &Sources,
        targets: &[usize],
    ) -> Vec<NVec3> {
        // Targets are independent of each other, so they can be spread over
        // the rayon pool. Each target still sums its sources sequentially,
        // which keeps the parallel result bit-identical to the serial one.
        if self.parallel {
            targets
                .par_iter()
                .map(|&t| self.acceleration_on(&positions[t], positions, sources))
                .collect()
        } else {
            targets
                .iter()
                .map(|&t| self.acceleration_on(&positions[t], positions, sources))
                .collect()
        }
    }
}
