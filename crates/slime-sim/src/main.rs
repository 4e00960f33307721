//! Headless runner: drives the simulation at a fixed frame length and
//! prints a JSON summary when done.

mod telemetry;

use anyhow::{Context, Result};
use slime_core::SimulationConfig;
use slime_world::{detect_contacts, NullSink, Simulation};
use std::path::PathBuf;
use tracing::{info, warn};

/// Runner settings read from the environment
struct RunOptions {
    config_path: Option<PathBuf>,
    seed: Option<String>,
    frames: u64,
    frame_ms: f64,
    json_logs: bool,
}

impl RunOptions {
    fn from_env() -> Result<Self> {
        let config_path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("SLIME_CONFIG").ok())
            .map(PathBuf::from);

        let frames = match std::env::var("SLIME_FRAMES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SLIME_FRAMES is not a frame count: {raw}"))?,
            Err(_) => 3600,
        };
        let frame_ms = match std::env::var("SLIME_FRAME_MS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SLIME_FRAME_MS is not a number: {raw}"))?,
            Err(_) => 16.0,
        };

        Ok(Self {
            config_path,
            seed: std::env::var("SLIME_SEED").ok(),
            frames,
            frame_ms,
            json_logs: std::env::var("SLIME_LOG_FORMAT").is_ok_and(|f| f == "json"),
        })
    }

    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config_path {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(seed) = &self.seed {
            config.seed = Some(seed.clone());
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let options = RunOptions::from_env()?;
    telemetry::init_telemetry(options.json_logs)?;

    let config = options.load_config()?;
    if config.seed.is_none() {
        warn!("No seed configured; this run cannot be reproduced");
    }

    info!(
        seed = ?config.seed,
        frames = options.frames,
        frame_ms = options.frame_ms,
        "Starting slime ecosystem run"
    );

    let mut sim = Simulation::new(config)?;
    let mut sink = NullSink;
    sim.initialize(&mut sink);

    for _ in 0..options.frames {
        let contacts = detect_contacts(sim.population().agents(), sim.resources().resources());
        sim.step(options.frame_ms, &contacts, &mut sink);
    }

    sim.emit_summary();
    println!("{}", serde_json::to_string_pretty(&sim.summary())?);
    Ok(())
}
