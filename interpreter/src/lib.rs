#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! A single Rubik's cube module: scrambled once on activation, then turned by player commands until it is solved.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use cube_core::{CubeState, Move, format_moves};
use log::{info, warn};
use scrambler::{Scramble, SerialNumber};

pub mod commands;
pub mod history;
pub mod presenter;
pub mod scheduler;

pub use commands::{Command, CommandError, simulate};
pub use history::History;
pub use presenter::{Headless, Presenter};
pub use scheduler::{ExecutionState, QueueItem, Scheduler, Speed, Timings};

static NEXT_MODULE_ID: AtomicUsize = AtomicUsize::new(1);

/// What an accepted command did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The moves were queued. `stopped_early` is set when the cube would be solved before the last typed move.
    Queued {
        moves: Vec<Move>,
        stopped_early: bool,
    },
    /// The player's moves were queued to be undone
    Reset { undone: usize },
    RotatedView,
}

#[derive(Debug)]
pub struct CubeModule {
    id: usize,
    label: String,
    serial: SerialNumber,
    scramble: Scramble,
    scheduler: Scheduler,
    history: History,
}

impl CubeModule {
    /// Generate a scramble for `serial` and queue it to be played onto a solved cube.
    pub fn activate(serial: SerialNumber, rng: &mut fastrand::Rng, timings: Timings) -> CubeModule {
        let id = NEXT_MODULE_ID.fetch_add(1, Ordering::Relaxed);
        let label = format!("[Rubik's Cube #{id}]");

        info!("{label} Serial number: {serial}");

        let scramble = Scramble::generate(&serial, rng);
        scramble.log_report(&label);

        let mut scheduler = Scheduler::new(CubeState::solved(), timings, label.clone());
        scheduler.enqueue(QueueItem::Timing(Speed::Scramble));
        for mv in scramble.scramble_moves() {
            scheduler.enqueue(QueueItem::Turn(mv));
        }
        scheduler.enqueue(QueueItem::Timing(Speed::Player));

        CubeModule {
            id,
            label,
            serial,
            scramble,
            scheduler,
            history: History::default(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The prefix of every log line this module writes
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn serial(&self) -> &SerialNumber {
        &self.serial
    }

    pub fn scramble(&self) -> &Scramble {
        &self.scramble
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn live_state(&self) -> &CubeState {
        self.scheduler.live_state()
    }

    /// The solved layout the live cube is compared against
    pub fn reference(&self) -> &CubeState {
        self.scheduler.reference()
    }

    pub fn is_solved(&self) -> bool {
        self.scheduler.is_solved()
    }

    /// Whether queued moves are still waiting to be dispatched. Turn commands are refused until they are.
    pub fn is_busy(&self) -> bool {
        self.scheduler.has_pending()
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.scheduler.execution_state()
    }

    /// Run one line of player input. A rejected command changes nothing.
    pub fn handle_command(
        &mut self,
        input: &str,
        presenter: &mut impl Presenter,
    ) -> Result<CommandOutcome, CommandError> {
        let result = self.try_command(input, presenter);

        if let Err(err) = &result {
            warn!("{} Ignoring command `{}`: {err}", self.label, input.trim());
        }

        result
    }

    fn try_command(
        &mut self,
        input: &str,
        presenter: &mut impl Presenter,
    ) -> Result<CommandOutcome, CommandError> {
        if self.is_solved() {
            return Err(CommandError::Solved);
        }

        match input.parse::<Command>()? {
            Command::Reset => self.reset(),
            Command::RotateView => {
                presenter.rotate_view();
                Ok(CommandOutcome::RotatedView)
            }
            Command::Turns(moves) => {
                if self.is_busy() {
                    return Err(CommandError::Busy);
                }

                let played = simulate(
                    &moves,
                    self.scheduler.live_state(),
                    self.scheduler.reference(),
                );
                let stopped_early = played.len() < moves.len();

                if stopped_early {
                    info!(
                        "{} Dropping `{}`, the cube is solved before them",
                        self.label,
                        format_moves(&moves[played.len()..])
                    );
                }

                info!("{} Turning {}", self.label, format_moves(&played));
                for &mv in &played {
                    self.queue_player_move(mv);
                }

                Ok(CommandOutcome::Queued {
                    moves: played,
                    stopped_early,
                })
            }
        }
    }

    /// A single move from a face button rather than typed input
    pub fn player_turn(&mut self, mv: Move) -> Result<(), CommandError> {
        if self.is_solved() {
            return Err(CommandError::Solved);
        }

        self.queue_player_move(mv);
        Ok(())
    }

    fn queue_player_move(&mut self, mv: Move) {
        if self.scheduler.enqueue(QueueItem::Turn(mv)) {
            self.history.push(mv);
        }
    }

    /// Queue the undo of every move the player made, bringing the cube back to how the scramble left it.
    pub fn reset(&mut self) -> Result<CommandOutcome, CommandError> {
        if self.is_solved() {
            return Err(CommandError::Solved);
        }

        let undo = self.history.unwind();
        info!("{} Resetting, undoing {} move(s)", self.label, undo.len());

        if !undo.is_empty() {
            self.scheduler.enqueue(QueueItem::Timing(Speed::Reset));
            for &mv in &undo {
                self.scheduler.enqueue(QueueItem::Turn(mv));
            }
            self.scheduler.enqueue(QueueItem::Timing(Speed::Player));
        }

        Ok(CommandOutcome::Reset {
            undone: undo.len(),
        })
    }

    /// Advance the queue by one tick of `delta` wall time
    pub fn tick(&mut self, delta: Duration, presenter: &mut impl Presenter) -> ExecutionState {
        self.scheduler.tick(delta, presenter)
    }
}
