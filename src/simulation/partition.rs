//! Per-tick selection of which particles are updated
//!
//! A [`Partitioner`] maps a tick counter to a [`Partition`]: the target
//! indices that get integrated this tick and the sources their
//! accelerations are computed against. Forces are always taken from the
//! whole population here; only the set of targets shrinks.
//!
//! Strategies:
//! - [`FullPass`]      every particle, every tick (exact, O(N^2) per tick)
//! - [`FixedBatches`]  contiguous batches of `ceil(N/B)`, one batch per tick
//! - [`RollingWindow`] `L` consecutive indices per tick, wrapping modulo N

use std::ops::Range;

use log::debug;

use crate::configuration::config::PartitionStrategy;
use crate::error::SimError;

/// Particles whose positions act as attractors for a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sources {
    All,
    Indices(Vec<usize>),
}

impl Sources {
    /// Number of source particles in a population of `n`
    pub fn count(&self, n: usize) -> usize {
        match self {
            Sources::All => n,
            Sources::Indices(indices) => indices.len(),
        }
    }
}

/// Targets and sources for one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub targets: Vec<usize>,
    pub sources: Sources,
}

/// Chooses the partition for tick `k`
pub trait Partitioner {
    fn select(&self, tick: u64) -> Partition;

    /// Ticks needed before every particle has been a target at least once
    fn ticks_per_sweep(&self) -> usize;
}

pub struct FullPass {
    n: usize,
}

impl FullPass {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Partitioner for FullPass {
    fn select(&self, _tick: u64) -> Partition {
        Partition {
            targets: (0..self.n).collect(),
            sources: Sources::All,
        }
    }

    fn ticks_per_sweep(&self) -> usize {
        1
    }
}

/// Population split once into contiguous batches; the last may be shorter
pub struct FixedBatches {
    batches: Vec<Range<usize>>,
}

impl FixedBatches {
    pub fn new(n: usize, batches: usize) -> Result<Self, SimError> {
        if batches == 0 || batches > n {
            return Err(SimError::InvalidBatchCount { batches, n });
        }
        let size = n.div_ceil(batches);
        let ranges: Vec<Range<usize>> = (0..n)
            .step_by(size)
            .map(|start| start..(start + size).min(n))
            .collect();

        debug!(
            "fixed batches: n = {n}, requested {batches}, using {} of size {size}",
            ranges.len()
        );
        Ok(Self { batches: ranges })
    }

    pub fn batches(&self) -> &[Range<usize>] {
        &self.batches
    }
}

impl Partitioner for FixedBatches {
    fn select(&self, tick: u64) -> Partition {
        let which = (tick % self.batches.len() as u64) as usize;
        Partition {
            targets: self.batches[which].clone().collect(),
            sources: Sources::All,
        }
    }

    fn ticks_per_sweep(&self) -> usize {
        self.batches.len()
    }
}

/// Fixed-length window sliding by its own length each tick, modulo N
pub struct RollingWindow {
    n: usize,
    window: usize,
}

impl RollingWindow {
    pub fn new(n: usize, window: usize) -> Result<Self, SimError> {
        if window == 0 || window > n {
            return Err(SimError::InvalidWindow { window, n });
        }
        Ok(Self { n, window })
    }
}

impl Partitioner for RollingWindow {
    fn select(&self, tick: u64) -> Partition {
        // (k * L) mod N, reduced first so large tick counts cannot overflow
        let start = ((tick % self.n as u64) as usize * self.window) % self.n;
        Partition {
            targets: (0..self.window).map(|j| (start + j) % self.n).collect(),
            sources: Sources::All,
        }
    }

    fn ticks_per_sweep(&self) -> usize {
        self.n.div_ceil(self.window)
    }
}

impl PartitionStrategy {
    /// Build the partitioner for a population of `n` particles
    pub fn build(&self, n: usize) -> Result<Box<dyn Partitioner + Send + Sync>, SimError> {
        if n == 0 {
            return Err(SimError::EmptyParticleSet);
        }
        Ok(match *self {
            PartitionStrategy::Full => Box::new(FullPass::new(n)),
            PartitionStrategy::FixedBatches { batches } => Box::new(FixedBatches::new(n, batches)?),
            PartitionStrategy::RollingWindow { window } => Box::new(RollingWindow::new(n, window)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered_after(p: &dyn Partitioner, n: usize, ticks: usize) -> Vec<bool> {
        let mut seen = vec![false; n];
        for k in 0..ticks {
            for t in p.select(k as u64).targets {
                seen[t] = true;
            }
        }
        seen
    }

    #[test]
    fn full_pass_selects_everything() {
        let p = FullPass::new(5);
        let part = p.select(17);
        assert_eq!(part.targets, vec![0, 1, 2, 3, 4]);
        assert_eq!(part.sources, Sources::All);
        assert_eq!(part.sources.count(5), 5);
    }

    #[test]
    fn source_count_follows_the_index_list() {
        assert_eq!(Sources::All.count(12), 12);
        assert_eq!(Sources::Indices(vec![4, 7, 9]).count(12), 3);
    }

    #[test]
    fn fixed_batches_last_batch_is_shorter() {
        let p = FixedBatches::new(10, 3).unwrap();
        assert_eq!(p.batches(), &[0..4, 4..8, 8..10]);
        assert_eq!(p.select(2).targets, vec![8, 9]);
        assert_eq!(p.select(3).targets, vec![0, 1, 2, 3]);
    }

    #[test]
    fn fixed_batches_drop_empty_trailing_batches() {
        // ceil(10 / 6) = 2, so only five non-empty batches exist
        let p = FixedBatches::new(10, 6).unwrap();
        assert_eq!(p.ticks_per_sweep(), 5);
        assert!(covered_after(&p, 10, 5).iter().all(|&s| s));
    }

    #[test]
    fn rolling_window_wraps_modulo_n() {
        let p = RollingWindow::new(10, 4).unwrap();
        assert_eq!(p.select(0).targets, vec![0, 1, 2, 3]);
        assert_eq!(p.select(1).targets, vec![4, 5, 6, 7]);
        assert_eq!(p.select(2).targets, vec![8, 9, 0, 1]);
        assert_eq!(p.select(3).targets, vec![2, 3, 4, 5]);
    }

    #[test]
    fn rolling_window_covers_all_in_ceil_n_over_l_ticks() {
        for (n, l) in [(10, 4), (9, 3), (7, 7), (100, 33), (5, 1)] {
            let p = RollingWindow::new(n, l).unwrap();
            let sweep = p.ticks_per_sweep();
            assert_eq!(sweep, n.div_ceil(l));
            assert!(covered_after(&p, n, sweep).iter().all(|&s| s), "n = {n}, l = {l}");
        }
    }

    #[test]
    fn rolling_window_survives_huge_tick_counts() {
        let p = RollingWindow::new(10, 4).unwrap();
        let part = p.select(u64::MAX);
        assert_eq!(part.targets.len(), 4);
        assert!(part.targets.iter().all(|&t| t < 10));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            RollingWindow::new(10, 0).err(),
            Some(SimError::InvalidWindow { window: 0, n: 10 })
        );
        assert!(RollingWindow::new(10, 11).is_err());
        assert!(FixedBatches::new(10, 0).is_err());
        assert!(FixedBatches::new(3, 4).is_err());
        assert!(PartitionStrategy::Full.build(0).is_err());
    }
}
