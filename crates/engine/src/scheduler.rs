//! Scheduler - drives one game session tick by tick
//!
//! Each armed session is identified by a [`TickHandle`]. A frame only runs
//! when the caller presents the handle that is currently armed, so a handle
//! kept around from before `stop()` or from a finished game does nothing.
//!
//! Frame order is fixed:
//!
//! 1. queued input signals, in receipt order
//! 2. gravity for the time elapsed since the previous frame
//! 3. one snapshot handed to the render sink
//!
//! A frame that ends in GameOver still renders, then halts the scheduler.
//! From there only a Restart submission brings it back, under a new handle.

use arrayvec::ArrayVec;
use log::{debug, warn};

use classic_tetris_core::{GameSnapshot, GameState, PieceRng, SimpleRng};
use classic_tetris_types::{GameAction, LockEvent};

use crate::clock::Clock;

/// Maximum input signals held between two frames
pub const INBOX_CAPACITY: usize = 32;

/// Receives a read-only snapshot once per frame
pub trait RenderSink {
    type Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    type Error = S::Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error> {
        (**self).present(snapshot)
    }
}

/// Identifies one armed run of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What a call to [`Scheduler::frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Handle was stale or the loop is not armed
    Skipped,
    /// Tick ran and the game continues
    Ticked { lock: Option<LockEvent> },
    /// Tick ran and ended the game; the loop is now halted
    Halted { lock: Option<LockEvent> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Armed(TickHandle),
    Halted,
    Stopped,
}

pub struct Scheduler<S: RenderSink, R: PieceRng = SimpleRng> {
    game: GameState<R>,
    sink: S,
    inbox: ArrayVec<GameAction, INBOX_CAPACITY>,
    state: LoopState,
    generation: u64,
    /// Timestamp of the previous frame; `None` right after arming
    last_ms: Option<u64>,
    snapshot: GameSnapshot,
}

impl<S: RenderSink, R: PieceRng> Scheduler<S, R> {
    /// Wrap a game and a sink. Nothing runs until [`Scheduler::start`].
    pub fn new(game: GameState<R>, sink: S) -> Self {
        Self {
            game,
            sink,
            inbox: ArrayVec::new(),
            state: LoopState::Idle,
            generation: 0,
            last_ms: None,
            snapshot: GameSnapshot::default(),
        }
    }

    /// Arm a fresh handle. Any previous handle becomes stale and the next
    /// frame measures elapsed time from itself.
    pub fn start(&mut self) -> TickHandle {
        self.generation += 1;
        let handle = TickHandle(self.generation);
        self.state = LoopState::Armed(handle);
        self.last_ms = None;
        debug!("scheduler armed: generation {}", self.generation);
        handle
    }

    /// Cancel the armed handle and drop pending input
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            debug!("scheduler stopped with {} pending inputs", self.inbox.len());
        }
        self.state = LoopState::Stopped;
        self.inbox.clear();
        self.last_ms = None;
    }

    /// Currently armed handle, if any
    pub fn handle(&self) -> Option<TickHandle> {
        match self.state {
            LoopState::Armed(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.state == LoopState::Halted
    }

    pub fn is_stopped(&self) -> bool {
        self.state == LoopState::Stopped
    }

    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Queue an input signal for the next frame.
    ///
    /// Returns false when the signal was not accepted: the loop is idle or
    /// stopped, the inbox is full, or the game is over and the signal is not
    /// Restart. A Restart after GameOver is applied at once and re-arms the
    /// loop under a new handle.
    pub fn submit(&mut self, action: GameAction) -> bool {
        match self.state {
            LoopState::Idle | LoopState::Stopped => false,
            LoopState::Halted => {
                if action != GameAction::Restart {
                    return false;
                }
                self.inbox.clear();
                self.game.restart();
                self.start();
                true
            }
            LoopState::Armed(_) => {
                if self.inbox.try_push(action).is_err() {
                    warn!("input inbox full, dropping {}", action.as_str());
                    return false;
                }
                true
            }
        }
    }

    /// Run one tick at `now_ms` if `handle` is the armed one.
    pub fn frame(&mut self, handle: TickHandle, now_ms: u64) -> Result<FrameOutcome, S::Error> {
        if self.state != LoopState::Armed(handle) {
            return Ok(FrameOutcome::Skipped);
        }

        let elapsed = self.last_ms.map_or(0, |last| now_ms.saturating_sub(last));
        self.last_ms = Some(now_ms);

        // An event from an earlier frame is stale by now.
        self.game.take_last_event();

        let mut lock = None;
        for action in self.inbox.drain(..) {
            self.game.apply_action(action);
            lock = self.game.take_last_event().or(lock);
        }

        self.game.tick(u32::try_from(elapsed).unwrap_or(u32::MAX));
        lock = self.game.take_last_event().or(lock);

        self.game.snapshot_into(&mut self.snapshot);
        self.sink.present(&self.snapshot)?;

        if self.game.game_over() {
            self.state = LoopState::Halted;
            self.last_ms = None;
            debug!(
                "scheduler halted: generation {}, final score {}",
                handle.generation(),
                self.game.score()
            );
            return Ok(FrameOutcome::Halted { lock });
        }

        Ok(FrameOutcome::Ticked { lock })
    }

    /// Run one frame for the armed handle using `clock`'s current time.
    pub fn frame_with<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<FrameOutcome, S::Error> {
        match self.handle() {
            Some(handle) => self.frame(handle, clock.now_ms()),
            None => Ok(FrameOutcome::Skipped),
        }
    }
}
