//! Headless producer/consumer run
//!
//! The simulation runs on its own thread and publishes one snapshot per
//! tick into a bounded channel. The consumer here stands in for a renderer:
//! it takes every frame in order and logs a summary of the speeds that a
//! renderer would push through its colour ramp.

use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::error::SimError;
use crate::simulation::channel::{snapshot_channel, SnapshotReceiver, SnapshotSender};
use crate::simulation::driver::Simulation;
use crate::simulation::scenario::Scenario;
use crate::simulation::snapshot::FrameStats;

/// Run `frames` ticks on a dedicated thread, publishing each snapshot.
/// Stops early if the consumer hangs up. Hands the simulation back on join.
pub fn spawn_producer(
    mut sim: Simulation,
    sender: SnapshotSender,
    frames: u64,
) -> JoinHandle<Result<Simulation, SimError>> {
    thread::spawn(move || {
        for _ in 0..frames {
            let snapshot = sim.tick();
            if let Err(e) = sender.publish(snapshot) {
                warn!("consumer hung up after {} ticks", sim.tick_count());
                return Err(e);
            }
        }
        debug!("producer finished {} ticks", sim.tick_count());
        // sender dropped here, which lets the consumer drain and stop
        Ok(sim)
    })
}

/// What a headless run observed
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub last: Option<FrameStats>,
    pub peak_speed: f64,
}

/// Consume every snapshot until the producer is done
pub fn consume<F>(receiver: &SnapshotReceiver, mut on_frame: F) -> RunSummary
where
    F: FnMut(&FrameStats),
{
    let mut summary = RunSummary { frames: 0, last: None, peak_speed: 0.0 };
    for snapshot in receiver.iter() {
        let stats = snapshot.stats();
        on_frame(&stats);
        summary.frames += 1;
        summary.peak_speed = summary.peak_speed.max(stats.max_speed);
        summary.last = Some(stats);
    }
    summary
}

/// Build the simulation, run it to completion, and log progress roughly ten times
pub fn run_headless(scenario: Scenario) -> Result<RunSummary, SimError> {
    let frames = scenario.frames;
    let sim = scenario.into_simulation()?;
    let capacity = sim.engine().channel_capacity;

    info!("run: {} particles, {} frames, channel capacity {}", sim.len(), frames, capacity);

    let (tx, rx) = snapshot_channel(capacity);
    let producer = spawn_producer(sim, tx, frames);

    let every = (frames / 10).max(1);
    let summary = consume(&rx, |stats| {
        if stats.tick % every == 0 {
            info!(
                "frame {:>6}: mean speed {:.5}, max speed {:.5}, centroid [{:.4}, {:.4}, {:.4}]",
                stats.tick,
                stats.mean_speed,
                stats.max_speed,
                stats.centroid[0],
                stats.centroid[1],
                stats.centroid[2]
            );
        }
    });

    let sim = producer.join().map_err(|_| SimError::ProducerPanicked)??;
    info!(
        "done: {} frames, kinetic energy {:.6e}, |momentum| {:.3e}",
        summary.frames,
        sim.kinetic_energy(),
        sim.total_momentum().norm()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::Engine;
    use crate::simulation::params::Parameters;
    use crate::simulation::states::ParticleSet;

    fn small_sim() -> Simulation {
        let particles = ParticleSet::random_uniform(12, 1.0, 5, 6).unwrap();
        Simulation::new(particles, Parameters::default(), Engine::default()).unwrap()
    }

    #[test]
    fn consumer_sees_every_frame_in_order() {
        let (tx, rx) = snapshot_channel(2);
        let producer = spawn_producer(small_sim(), tx, 25);

        let mut ticks = Vec::new();
        let summary = consume(&rx, |s| ticks.push(s.tick));

        let sim = producer.join().unwrap().unwrap();
        assert_eq!(summary.frames, 25);
        assert_eq!(ticks, (1..=25).collect::<Vec<u64>>());
        assert_eq!(sim.tick_count(), 25);
    }

    #[test]
    fn headless_run_uses_the_scenario_channel_capacity() {
        let yaml = r#"
engine:
  channel_capacity: 1
parameters: { g: 10.0, mass: 0.0001, time_delta: 0.05, time_factor: 0.5 }
particles: { count: 6 }
run: { frames: 12 }
"#;
        let cfg = crate::configuration::config::ScenarioConfig::from_yaml_str(yaml).unwrap();
        let scenario = Scenario::build_scenario(cfg).unwrap();
        let summary = run_headless(scenario).unwrap();
        assert_eq!(summary.frames, 12);
        assert_eq!(summary.last.map(|s| s.tick), Some(12));
    }

    #[test]
    fn producer_stops_when_consumer_leaves() {
        let (tx, rx) = snapshot_channel(1);
        let producer = spawn_producer(small_sim(), tx, 1_000);
        assert_eq!(rx.take().unwrap().tick, 1);
        drop(rx);
        assert_eq!(producer.join().unwrap().err(), Some(SimError::ChannelClosed));
    }
}
