use std::{path::PathBuf, time::Duration};

use clap::Parser;
use interpreter::{CubeModule, ExecutionState};
use log::info;
use tokio::{
    sync::mpsc::error::TryRecvError,
    time::{Instant, MissedTickBehavior},
};

use crate::{config::Config, input::spawn_line_reader, terminal::TerminalPresenter};

mod config;
mod input;
mod terminal;

/// Solve a scrambled Rubik's cube module by typing moves
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file. Defaults to `rubiks/config.toml` in the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Six character serial number that determines the scramble
    #[arg(long)]
    serial: Option<String>,
    /// Seed for the color permutations
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let settings = Config::load(args.config.as_deref())?
        .with_overrides(args.serial, args.seed, args.tick_rate)
        .resolve(&mut fastrand::Rng::new())?;

    info!("Using seed {}", settings.seed);

    let mut rng = fastrand::Rng::with_seed(settings.seed);
    let mut module = CubeModule::activate(settings.serial, &mut rng, settings.timings);
    let mut presenter = TerminalPresenter::new();

    presenter.welcome(module.label(), module.serial().as_str());

    let mut lines_rx = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));

    let mut frames = tokio::time::interval(Duration::from_secs_f64(
        1.0 / f64::from(settings.tick_rate_hz),
    ));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_frame = Instant::now();
    let mut pending: Option<String> = None;
    let mut input_open = true;
    let mut was_busy = true;

    loop {
        let now = frames.tick().await;
        let delta = now - last_frame;
        last_frame = now;

        if pending.is_none() && input_open {
            match lines_rx.try_recv() {
                Ok(line) if !line.trim().is_empty() => pending = Some(line),
                Ok(_) | Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => input_open = false,
            }
        }

        // Moves wait until the previous ones have been dispatched
        if !module.is_busy()
            && let Some(line) = pending.take()
            && let Ok(outcome) = module.handle_command(&line, &mut presenter)
        {
            presenter.accepted(&outcome);
        }

        match module.tick(delta, &mut presenter) {
            ExecutionState::Solved => break,
            ExecutionState::Busy => was_busy = true,
            ExecutionState::Idle => {
                if was_busy {
                    presenter.status(module.live_state(), module.reference());
                    was_busy = false;
                }

                if !input_open && pending.is_none() {
                    presenter.input_closed();
                    break;
                }
            }
        }
    }

    Ok(())
}
