use gravsim::{ScenarioConfig, Scenario};
use gravsim::{run_headless, bench_strategies, bench_policies};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Direct-sum gravity simulation with bounded snapshot hand-off")]
struct Args {
    /// Scenario file, looked up under ./scenarios unless it is a path that exists
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the number of frames to produce
    #[arg(long)]
    frames: Option<u64>,

    /// Override the number of random particles
    #[arg(long)]
    particles: Option<usize>,

    /// Run the strategy and engine benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_strategies();
        bench_policies();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(n) = args.particles {
        scenario_cfg.particles.count = Some(n);
        scenario_cfg.particles.bodies = None;
    }
    if let Some(frames) = args.frames {
        scenario_cfg.run.frames = Some(frames);
    }

    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    let summary = run_headless(scenario).context("simulation failed")?;

    info!("peak speed over the run: {:.5}", summary.peak_speed);
    Ok(())
}
