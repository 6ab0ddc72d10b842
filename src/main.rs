//! Bricker - native entry point
//!
//! Runs the simulation headless at a fixed timestep. Round-end questions are
//! asked on stdin; `--autoplay` lets the demo pilot move the paddle.

use std::path::PathBuf;

use anyhow::{Result, bail};
use bricker::consts::SIM_DT;
use bricker::platform::{Autopilot, StdinPrompt};
use bricker::sim::{GamePhase, GameState, TickInput, tick};
use bricker::{BoardConfig, Tuning};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Brick-breaker with randomized brick behaviors",
    long_about = None
)]
struct Args {
    /// Brick rows (both sizes fall back to the default board if either is invalid)
    rows: Option<String>,
    /// Bricks per row
    columns: Option<String>,
    /// Run seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Stop after this many ticks
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,
    /// Let the demo pilot steer the paddle
    #[arg(long)]
    autoplay: bool,
    /// Ticks between status lines
    #[arg(long, default_value_t = 600)]
    status_every: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.status_every == 0 {
        bail!("--status-every must be at least 1");
    }

    let board = BoardConfig::from_args(args.rows.as_deref(), args.columns.as_deref());
    let tuning = match &args.tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    }
    .sanitized();
    let seed = args.seed.unwrap_or_else(rand::random);

    log::info!("Bricker starting: seed {seed}, {}x{} board", board.rows, board.columns);

    let mut state = GameState::new(seed, tuning, board);
    let mut prompt = StdinPrompt::stdio();
    let mut input = TickInput::default();
    let autopilot = args.autoplay.then(Autopilot::default);

    while state.time_ticks < args.max_ticks {
        if let Some(pilot) = &autopilot {
            pilot.steer(&state, &mut input);
        }
        tick(&mut state, &input, &mut prompt, SIM_DT);
        input.next_frame();

        if state.phase == GamePhase::Exited {
            break;
        }
        if state.time_ticks % args.status_every == 0 {
            log::info!(
                "t={:.1}s round {} lives {} bricks {} extra paddles {}",
                state.time_ticks as f32 * SIM_DT,
                state.round,
                state.lives,
                state.live_bricks,
                state.extra_paddles
            );
        }
    }

    log::info!(
        "Bricker stopped after {} ticks ({} rounds)",
        state.time_ticks,
        state.round
    );
    Ok(())
}
