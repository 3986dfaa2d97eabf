//! Per-tick capture of the particle state handed to rendering

use super::states::ParticleSet;

/// Immutable copy of every position and speed at the end of a tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64, // tick this snapshot closes
    pub positions: Vec<[f64; 3]>,
    pub speeds: Vec<f64>,
}

impl Snapshot {
    pub fn capture(particles: &ParticleSet, tick: u64) -> Self {
        Self {
            tick,
            positions: particles.positions.iter().map(|p| [p.x, p.y, p.z]).collect(),
            speeds: particles.speeds.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.positions.iter().flatten().all(|c| c.is_finite())
            && self.speeds.iter().all(|s| s.is_finite())
    }

    /// Summary used by headless consumers in place of a colour ramp
    pub fn stats(&self) -> FrameStats {
        let n = self.speeds.len().max(1) as f64;
        let mean_speed = self.speeds.iter().sum::<f64>() / n;
        let max_speed = self.speeds.iter().cloned().fold(0.0, f64::max);

        let mut centroid = [0.0; 3];
        for p in &self.positions {
            for (c, x) in centroid.iter_mut().zip(p) {
                *c += x / n;
            }
        }

        FrameStats {
            tick: self.tick,
            mean_speed,
            max_speed,
            centroid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub tick: u64,
    pub mean_speed: f64,
    pub max_speed: f64,
    pub centroid: [f64; 3],
}
