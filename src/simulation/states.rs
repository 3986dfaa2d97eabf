//! Core state types for the gravity simulation.
//!
//! - `VectorField` a fixed-length array of 3d vectors (positions or velocities)
//! - `ParticleSet` the full particle state, one entry per particle index
//!
//! Mass is uniform and lives in `Parameters`, not on the particles.

use std::ops::{Index, IndexMut};

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SimError;

pub type NVec3 = Vector3<f64>;

/// Fixed-length array of 3d vectors
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    data: Vec<NVec3>,
}

impl VectorField {
    pub fn zeros(n: usize) -> Self {
        Self { data: vec![NVec3::zeros(); n] }
    }

    pub fn from_vec(data: Vec<NVec3>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[NVec3] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NVec3> {
        self.data.iter()
    }

    /// self[i] += scale * other[i] for every i
    pub fn axpy(&mut self, scale: f64, other: &VectorField) {
        assert_eq!(self.len(), other.len(), "vector field length mismatch");
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += scale * *b;
        }
    }

    /// Euclidean norm of every element
    pub fn norms(&self) -> Vec<f64> {
        self.data.iter().map(|v| v.norm()).collect()
    }

    /// Copy out the elements at `indices`, in that order
    pub fn gather(&self, indices: &[usize]) -> Vec<NVec3> {
        indices.iter().map(|&i| self.data[i]).collect()
    }

    /// Sum of all elements
    pub fn sum(&self) -> NVec3 {
        self.data.iter().fold(NVec3::zeros(), |acc, v| acc + v)
    }

    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.iter().all(|c| c.is_finite()))
    }
}

impl Index<usize> for VectorField {
    type Output = NVec3;

    fn index(&self, i: usize) -> &NVec3 {
        &self.data[i]
    }
}

impl IndexMut<usize> for VectorField {
    fn index_mut(&mut self, i: usize) -> &mut NVec3 {
        &mut self.data[i]
    }
}

impl std::ops::AddAssign<&VectorField> for VectorField {
    fn add_assign(&mut self, rhs: &VectorField) {
        self.axpy(1.0, rhs);
    }
}

/// Full particle state. Length and order are fixed once built.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    pub positions: VectorField,
    pub velocities: VectorField,
    pub accelerations: VectorField, // last acceleration applied to each particle
    pub speeds: Vec<f64>, // |v|, used only for colouring
}

impl ParticleSet {
    /// Build from explicit positions and velocities
    pub fn from_states(positions: Vec<NVec3>, velocities: Vec<NVec3>) -> Result<Self, SimError> {
        if positions.is_empty() {
            return Err(SimError::EmptyParticleSet);
        }
        if positions.len() != velocities.len() {
            return Err(SimError::InvalidBody {
                index: positions.len().min(velocities.len()),
                reason: format!(
                    "{} positions but {} velocities",
                    positions.len(),
                    velocities.len()
                ),
            });
        }
        for (index, (x, v)) in positions.iter().zip(velocities.iter()).enumerate() {
            if !x.iter().chain(v.iter()).all(|c| c.is_finite()) {
                return Err(SimError::InvalidBody {
                    index,
                    reason: "non-finite position or velocity".to_string(),
                });
            }
        }

        let n = positions.len();
        let velocities = VectorField::from_vec(velocities);
        let speeds = velocities.norms();
        Ok(Self {
            positions: VectorField::from_vec(positions),
            velocities,
            accelerations: VectorField::zeros(n),
            speeds,
        })
    }

    /// Positions and velocities drawn uniformly from [-extent, extent)^3.
    /// Positions and velocities use their own seeded generators.
    pub fn random_uniform(
        n: usize,
        extent: f64,
        position_seed: u64,
        velocity_seed: u64,
    ) -> Result<Self, SimError> {
        if !(extent > 0.0 && extent.is_finite()) {
            return Err(SimError::InvalidExtent(extent));
        }
        let mut pos_rng = ChaCha8Rng::seed_from_u64(position_seed);
        let mut vel_rng = ChaCha8Rng::seed_from_u64(velocity_seed);

        let draw = |rng: &mut ChaCha8Rng| {
            NVec3::new(
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
            )
        };

        let positions = (0..n).map(|_| draw(&mut pos_rng)).collect();
        let velocities = (0..n).map(|_| draw(&mut vel_rng)).collect();
        Self::from_states(positions, velocities)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn all_finite(&self) -> bool {
        self.positions.all_finite()
            && self.velocities.all_finite()
            && self.speeds.iter().all(|s| s.is_finite())
    }
}
