use std::{collections::VecDeque, time::Duration};

use cube_core::{CubeState, Move};
use log::{info, trace};
use serde::Deserialize;

use crate::presenter::Presenter;

/// Which kind of turn is being played. Only player turns can solve the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    /// Replaying the scramble at activation
    Scramble,
    /// Turns the player asked for
    Player,
    /// Undoing the player's turns
    Reset,
}

/// How long one quarter turn takes to animate at each speed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub scramble_turn_ms: u64,
    pub player_turn_ms: u64,
    pub reset_turn_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            scramble_turn_ms: 0,
            player_turn_ms: 250,
            reset_turn_ms: 100,
        }
    }
}

impl Timings {
    /// Every turn completes on the tick that starts it
    pub const INSTANT: Timings = Timings {
        scramble_turn_ms: 0,
        player_turn_ms: 0,
        reset_turn_ms: 0,
    };

    #[must_use]
    pub fn duration(&self, speed: Speed) -> Duration {
        Duration::from_millis(match speed {
            Speed::Scramble => self.scramble_turn_ms,
            Speed::Player => self.player_turn_ms,
            Speed::Reset => self.reset_turn_ms,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueItem {
    /// Turns queued after this marker play at this speed
    Timing(Speed),
    Turn(Move),
}

/// What the scheduler is doing after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionState {
    /// Nothing queued and nothing turning
    Idle,
    /// A turn is animating or items are waiting in the queue
    Busy,
    /// The player solved the cube. Nothing happens anymore.
    Solved,
}

#[derive(Clone, Copy, Debug)]
struct ActiveTurn {
    mv: Move,
    speed: Speed,
    elapsed: Duration,
    duration: Duration,
}

impl ActiveTurn {
    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn degrees(&self) -> f32 {
        90.0 * (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Owns the live cube and plays queued turns onto it, one queue item per tick.
///
/// A turn changes the cube state the moment it is dequeued; the ticks after that only drive the animation.
#[derive(Debug)]
pub struct Scheduler {
    label: String,
    live: CubeState,
    reference: CubeState,
    queue: VecDeque<QueueItem>,
    speed: Speed,
    timings: Timings,
    active: Option<ActiveTurn>,
    solved: bool,
}

impl Scheduler {
    /// Create a scheduler whose live cube starts out as `reference`. `label` prefixes every log line.
    #[must_use]
    pub fn new(reference: CubeState, timings: Timings, label: String) -> Scheduler {
        Scheduler {
            label,
            live: reference.clone(),
            reference,
            queue: VecDeque::new(),
            speed: Speed::Player,
            timings,
            active: None,
            solved: false,
        }
    }

    /// Add an item to the back of the queue. Returns false and does nothing once the cube is solved.
    pub fn enqueue(&mut self, item: QueueItem) -> bool {
        if self.solved {
            return false;
        }

        self.queue.push_back(item);
        true
    }

    /// Whether there are queue items that have not been dispatched yet
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn live_state(&self) -> &CubeState {
        &self.live
    }

    /// The solved layout the live cube is compared against
    #[must_use]
    pub fn reference(&self) -> &CubeState {
        &self.reference
    }

    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    #[must_use]
    pub fn execution_state(&self) -> ExecutionState {
        if self.solved {
            ExecutionState::Solved
        } else if self.active.is_some() || !self.queue.is_empty() {
            ExecutionState::Busy
        } else {
            ExecutionState::Idle
        }
    }

    /// Advance by one tick of `delta` wall time.
    ///
    /// Continues the turn in progress if there is one, otherwise takes the next item off the queue.
    pub fn tick(&mut self, delta: Duration, presenter: &mut impl Presenter) -> ExecutionState {
        if self.solved {
            return ExecutionState::Solved;
        }

        if let Some(active) = &mut self.active {
            active.elapsed += delta;

            if active.is_done() {
                self.finish_turn(presenter);
            } else {
                presenter.turn_progress(active.mv, active.degrees());
            }

            return self.execution_state();
        }

        match self.queue.pop_front() {
            None => {}
            Some(QueueItem::Timing(speed)) => {
                trace!("{} Turn speed is now {speed:?}", self.label);
                self.speed = speed;
            }
            Some(QueueItem::Turn(mv)) => {
                trace!("{} Turning {mv} at {:?} speed", self.label, self.speed);

                self.live = self.live.apply(mv);
                presenter.turn_started(mv, mv.def().slots());

                let active = ActiveTurn {
                    mv,
                    speed: self.speed,
                    elapsed: Duration::ZERO,
                    duration: self.timings.duration(self.speed),
                };
                let done = active.is_done();
                self.active = Some(active);

                if done {
                    self.finish_turn(presenter);
                }
            }
        }

        self.execution_state()
    }

    fn finish_turn(&mut self, presenter: &mut impl Presenter) {
        let Some(active) = self.active.take() else {
            return;
        };

        presenter.turn_progress(active.mv, 90.0);
        presenter.turn_finished(active.mv);

        // Replays pass through the solved state all the time, only the player gets credit for it
        if active.speed == Speed::Player && self.live.is_solved(&self.reference) {
            info!("{} Module solved.", self.label);

            self.solved = true;
            self.queue.clear();
            presenter.solved();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cube_core::{CubeState, Move};

    use crate::presenter::{Headless, Presenter};

    use super::{ExecutionState, QueueItem, Scheduler, Speed, Timings};

    #[derive(Default)]
    struct Frames {
        started: Vec<Move>,
        progress: Vec<f32>,
        finished: Vec<Move>,
        solved: usize,
    }

    impl Presenter for Frames {
        fn turn_started(&mut self, mv: Move, slots: &[cube_core::Slot; 9]) {
            assert!(slots.iter().all(|slot| mv.def().in_layer(*slot)));
            self.started.push(mv);
        }

        fn turn_progress(&mut self, _: Move, degrees: f32) {
            self.progress.push(degrees);
        }

        fn turn_finished(&mut self, mv: Move) {
            self.finished.push(mv);
        }

        fn solved(&mut self) {
            self.solved += 1;
        }
    }

    fn scheduler(timings: Timings) -> Scheduler {
        Scheduler::new(CubeState::solved(), timings, "[test]".to_owned())
    }

    fn run(scheduler: &mut Scheduler, presenter: &mut impl Presenter) -> ExecutionState {
        for _ in 0..1000 {
            let state = scheduler.tick(Duration::from_millis(10), presenter);
            if state != ExecutionState::Busy {
                return state;
            }
        }

        panic!("scheduler never settled");
    }

    #[test]
    fn one_item_per_tick() {
        let mut scheduler = scheduler(Timings::INSTANT);
        scheduler.enqueue(QueueItem::Timing(Speed::Scramble));
        scheduler.enqueue(QueueItem::Turn(Move::R));
        scheduler.enqueue(QueueItem::Turn(Move::U));

        let tick = Duration::from_millis(10);

        assert_eq!(scheduler.tick(tick, &mut Headless), ExecutionState::Busy);
        assert_eq!(scheduler.speed(), Speed::Scramble);
        assert_eq!(scheduler.live_state(), &CubeState::solved());

        assert_eq!(scheduler.tick(tick, &mut Headless), ExecutionState::Busy);
        assert_eq!(scheduler.live_state(), &CubeState::solved().apply(Move::R));

        assert_eq!(scheduler.tick(tick, &mut Headless), ExecutionState::Idle);
        assert_eq!(
            scheduler.live_state(),
            &CubeState::solved().apply_all(&[Move::R, Move::U])
        );
    }

    #[test]
    fn state_changes_before_the_animation() {
        let mut scheduler = scheduler(Timings {
            player_turn_ms: 100,
            ..Timings::INSTANT
        });
        let mut frames = Frames::default();

        scheduler.enqueue(QueueItem::Turn(Move::F));

        assert_eq!(scheduler.tick(Duration::ZERO, &mut frames), ExecutionState::Busy);
        assert_eq!(scheduler.live_state(), &CubeState::solved().apply(Move::F));
        assert_eq!(frames.started, vec![Move::F]);
        assert!(frames.finished.is_empty());

        for _ in 0..3 {
            assert_eq!(
                scheduler.tick(Duration::from_millis(30), &mut frames),
                ExecutionState::Busy
            );
        }

        assert_eq!(
            scheduler.tick(Duration::from_millis(30), &mut frames),
            ExecutionState::Idle
        );
        assert_eq!(frames.finished, vec![Move::F]);
        assert_eq!(frames.progress.len(), 4);
        assert!(frames.progress.windows(2).all(|w| w[0] < w[1]));
        assert!((frames.progress[3] - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn replays_never_solve() {
        let mut frames = Frames::default();

        for speed in [Speed::Scramble, Speed::Reset] {
            let mut scheduler = scheduler(Timings::INSTANT);
            scheduler.enqueue(QueueItem::Timing(speed));
            scheduler.enqueue(QueueItem::Turn(Move::R));
            scheduler.enqueue(QueueItem::Turn(Move::R_PRIME));
            scheduler.enqueue(QueueItem::Turn(Move::U));

            assert_eq!(run(&mut scheduler, &mut frames), ExecutionState::Idle);
            assert!(!scheduler.is_solved());
            assert_eq!(scheduler.live_state(), &CubeState::solved().apply(Move::U));
        }

        assert_eq!(frames.solved, 0);
    }

    #[test]
    fn player_solve_is_terminal() {
        let mut scheduler = scheduler(Timings::default());
        let mut frames = Frames::default();

        scheduler.enqueue(QueueItem::Timing(Speed::Scramble));
        scheduler.enqueue(QueueItem::Turn(Move::D));
        scheduler.enqueue(QueueItem::Timing(Speed::Player));
        scheduler.enqueue(QueueItem::Turn(Move::D_PRIME));
        scheduler.enqueue(QueueItem::Turn(Move::B));

        assert_eq!(run(&mut scheduler, &mut frames), ExecutionState::Solved);
        assert_eq!(frames.solved, 1);
        assert_eq!(frames.started, vec![Move::D, Move::D_PRIME]);
        assert!(!scheduler.has_pending());
        assert!(scheduler.live_state().is_solved(scheduler.reference()));

        assert!(!scheduler.enqueue(QueueItem::Turn(Move::B)));
        assert_eq!(
            scheduler.tick(Duration::from_secs(1), &mut frames),
            ExecutionState::Solved
        );
        assert_eq!(frames.solved, 1);
    }

    #[test]
    fn default_timings() {
        let timings = Timings::default();
        assert_eq!(timings.duration(Speed::Scramble), Duration::ZERO);
        assert_eq!(timings.duration(Speed::Player), Duration::from_millis(250));
        assert_eq!(timings.duration(Speed::Reset), Duration::from_millis(100));
    }
}
