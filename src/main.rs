//! Wooden Fish headless runner
//!
//! Drives the simulation frame by frame with a scripted tapper, picks the
//! first offered upgrade at every level clear and prints the run summary.

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use wooden_fish::sim::{GameStatus, Simulation, TickInput, tick};
use wooden_fish::{RunSummary, Settings};

#[derive(Debug, Parser)]
#[command(name = "wooden-fish", about = "Run a headless Wooden Fish session")]
struct Args {
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<std::path::PathBuf>,
    /// Maximum frames to simulate
    #[arg(long, default_value_t = 60 * 60 * 30)]
    frames: u64,
    /// Frame length in ms
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
    /// Manual taps per second (0 relies on auto-fire alone)
    #[arg(long, default_value_t = 4.0)]
    taps_per_sec: f64,
}

#[derive(Debug, serde::Serialize)]
struct Report {
    status: GameStatus,
    frames: u64,
    events: u64,
    score: u64,
    level: u32,
    summary: RunSummary,
}

/// Scripted player holding the frame loop state
struct Game {
    sim: Simulation,
    now_ms: f64,
    tap_budget: f64,
    taps_per_ms: f64,
    /// Presentation events produced (and discarded) so far
    events: u64,
}

impl Game {
    fn new(settings: Settings, taps_per_sec: f64) -> Self {
        Self {
            sim: Simulation::new(settings),
            now_ms: 0.0,
            tap_budget: 0.0,
            taps_per_ms: taps_per_sec.max(0.0) / 1000.0,
            events: 0,
        }
    }

    fn is_finished(&self) -> bool {
        matches!(
            self.sim.status(),
            GameStatus::GameOver | GameStatus::Victory
        )
    }

    /// Gather this frame's input and advance the simulation
    fn update(&mut self, frame_ms: f64) {
        let mut input = TickInput::default();
        match self.sim.status() {
            GameStatus::Playing => {
                self.tap_budget += self.taps_per_ms * frame_ms;
                let center = self.sim.center();
                while self.tap_budget >= 1.0 {
                    input.taps.push(center + Vec2::new(0.0, 40.0));
                    self.tap_budget -= 1.0;
                }
            }
            GameStatus::Upgrading => input.upgrade = self.sim.offers().first().copied(),
            _ => {}
        }
        tick(&mut self.sim, &input, self.now_ms);
        self.events += self.sim.drain_events().len() as u64;
        self.now_ms += frame_ms;
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    settings.validate().context("invalid settings")?;
    anyhow::ensure!(args.frame_ms > 0.0, "--frame-ms must be positive");

    log::info!("Wooden Fish (headless) starting with seed {}", settings.seed);
    let mut game = Game::new(settings, args.taps_per_sec);
    game.sim.start(0.0)?;

    let mut frames = 0;
    while frames < args.frames && !game.is_finished() {
        game.update(args.frame_ms);
        frames += 1;
    }
    if !game.is_finished() {
        log::warn!("Stopped after {frames} frames without finishing the run");
    }

    let report = Report {
        status: game.sim.status(),
        frames,
        events: game.events,
        score: game.sim.state().score,
        level: game.sim.state().level,
        summary: game.sim.history().summary(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
