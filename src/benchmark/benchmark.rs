use std::time::Instant;

use crate::configuration::config::{PartitionStrategy, SingularityPolicy};
use crate::simulation::driver::Simulation;
use crate::simulation::engine::Engine;
use crate::simulation::forces::PairwiseGravity;
use crate::simulation::params::Parameters;
use crate::simulation::partition::Sources;
use crate::simulation::states::{NVec3, ParticleSet};

/// Helper to build a deterministic particle set of size `n`, no rng needed
fn make_particles(n: usize) -> ParticleSet {
    let positions = (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec3::new((i_f * 0.37).sin(), (i_f * 0.13).cos(), (i_f * 0.07).sin())
        })
        .collect();
    // from_states only fails on empty or non-finite input
    ParticleSet::from_states(positions, vec![NVec3::zeros(); n])
        .unwrap_or_else(|e| panic!("benchmark set: {e}"))
}

/// Average milliseconds per tick over `steps` ticks, after one warm-up tick
fn time_ticks(sim: &mut Simulation, steps: usize) -> f64 {
    sim.tick();
    let t0 = Instant::now();
    for _ in 0..steps {
        sim.tick();
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Per-tick cost of each partitioning strategy for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_strategies() {
    println!("N,full_ms,batches8_ms,window_n/16_ms");

    for n in [500, 1000, 2000, 4000, 8000] {
        let steps = if n <= 1000 { 5 } else { 2 };
        let strategies = [
            PartitionStrategy::Full,
            PartitionStrategy::FixedBatches { batches: 8 },
            PartitionStrategy::RollingWindow { window: n / 16 },
        ];

        let mut row = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            let engine = Engine { parallel: true, ..Engine::default() }.with_strategy(strategy);
            match Simulation::new(make_particles(n), Parameters::default(), engine) {
                Ok(mut sim) => row.push(format!("{:.6}", time_ticks(&mut sim, steps))),
                Err(e) => row.push(format!("error: {e}")),
            }
        }
        println!("{},{}", n, row.join(","));
    }
}

/// Raw engine throughput: guarded vs filtered singularity, serial vs rayon
pub fn bench_policies() {
    let params = Parameters::default();

    for n in [1000, 2000, 4000] {
        let particles = make_particles(n);
        let positions = particles.positions.as_slice();
        let targets: Vec<usize> = (0..n).collect();

        for singularity in [SingularityPolicy::Guarded, SingularityPolicy::FilterNonFinite] {
            for parallel in [false, true] {
                let engine = Engine { parallel, ..Engine::default() }.with_singularity(singularity);
                let gravity = PairwiseGravity::new(&params, &engine);

                // Warm up
                gravity.compute_accelerations(positions, &Sources::All, &targets);

                let t0 = Instant::now();
                let out = gravity.compute_accelerations(positions, &Sources::All, &targets);
                let dt = t0.elapsed().as_secs_f64();

                println!(
                    "N = {n:5}, {:?}, parallel = {parallel:5}, {:8.6} s, |a_0| = {:.3e}",
                    singularity,
                    dt,
                    out[0].norm()
                );
            }
        }
    }
}
