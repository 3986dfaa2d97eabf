//! Physical and numerical constants for a run
//!
//! `Parameters` holds:
//! - gravitational constant `g` and the uniform particle `mass`,
//! - step size `time_delta` and the `time_factor` scale applied to both
//!   the velocity and the position update,
//! - `min_distance`, the positive separation below which a pair
//!   contributes nothing

use crate::error::SimError;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub mass: f64, // uniform particle mass
    pub time_delta: f64, // step size
    pub time_factor: f64, // extra scale on every update
    pub min_distance: f64, // guarded-division threshold
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 10.0,
            mass: 0.0001,
            time_delta: 0.05,
            time_factor: 0.5,
            min_distance: 1.0e-9,
        }
    }
}

impl Parameters {
    /// Reject settings that would give undefined numeric behaviour
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.time_delta > 0.0 && self.time_delta.is_finite()) {
            return Err(SimError::NonPositiveTimeDelta(self.time_delta));
        }
        if !self.time_factor.is_finite() {
            return Err(SimError::InvalidTimeFactor(self.time_factor));
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(SimError::InvalidMass(self.mass));
        }
        if !self.g.is_finite() {
            return Err(SimError::InvalidGravitationalConstant(self.g));
        }
        if !(self.min_distance > 0.0 && self.min_distance.is_finite()) {
            return Err(SimError::NonPositiveMinDistance(self.min_distance));
        }
        Ok(())
    }

    /// Scale applied to each update, dt * time_factor
    pub fn step_scale(&self) -> f64 {
        self.time_delta * self.time_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_time_delta() {
        let p = Parameters { time_delta: 0.0, ..Parameters::default() };
        assert_eq!(p.validate(), Err(SimError::NonPositiveTimeDelta(0.0)));

        let p = Parameters { time_delta: -0.1, ..Parameters::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_bad_mass_and_guard() {
        let p = Parameters { mass: 0.0, ..Parameters::default() };
        assert_eq!(p.validate(), Err(SimError::InvalidMass(0.0)));

        let p = Parameters { min_distance: -1.0, ..Parameters::default() };
        assert_eq!(p.validate(), Err(SimError::NonPositiveMinDistance(-1.0)));

        // a zero guard would let overflowing pairs through
        let p = Parameters { min_distance: 0.0, ..Parameters::default() };
        assert_eq!(p.validate(), Err(SimError::NonPositiveMinDistance(0.0)));
    }

    #[test]
    fn rejects_non_finite_gravitational_constant() {
        let p = Parameters { g: f64::INFINITY, ..Parameters::default() };
        assert_eq!(
            p.validate(),
            Err(SimError::InvalidGravitationalConstant(f64::INFINITY))
        );

        let p = Parameters { g: f64::NAN, ..Parameters::default() };
        assert!(matches!(p.validate(), Err(SimError::InvalidGravitationalConstant(_))));
    }
}
