//! Game state module - the authoritative session state machine
//!
//! This module ties together the board, the active piece, the piece catalog,
//! the RNG and the scoring policy. It handles gravity timing, player actions,
//! lock-in, line clears, level progression and the game lifecycle.
//!
//! Status transitions:
//!
//! - `Running` --tick past the gravity interval--> drop one row, or lock-in
//! - `Running` <--Pause--> `Paused` (nothing moves while paused)
//! - `Running` --lock-in that leaves row 0 occupied, or a spawn that does
//!   not fit--> `GameOver`
//! - any --Restart--> `Running` with a fresh board and session (straight to
//!   `GameOver` if the first piece cannot spawn)

use log::{debug, info};

use crate::board::Board;
use crate::error::CoreError;
use crate::piece::{ActivePiece, DropOutcome};
use crate::pieces::{pick_random, Shape};
use crate::rng::{PieceRng, SimpleRng};
use crate::scoring::{gravity_interval_ms, score_lock};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameStatus, LockEvent, START_LEVEL};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: PieceRng = SimpleRng> {
    board: Board,
    active: Option<ActivePiece>,
    next: Shape,
    rng: R,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Number of pieces spawned this episode.
    piece_id: u32,
    /// Last lock-in (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    status: GameStatus,
    drop_timer_ms: u32,
}

impl GameState<SimpleRng> {
    /// Standard 10x20 game with a seeded LCG
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: PieceRng> GameState<R> {
    /// Standard 10x20 game drawing pieces from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::from_board(Board::new(), rng)
    }

    /// Game on a custom board size.
    ///
    /// Fails only for a zero dimension.
    pub fn with_board(width: u16, height: u16, rng: R) -> Result<Self, CoreError> {
        Ok(Self::from_board(Board::with_dimensions(width, height)?, rng))
    }

    fn from_board(board: Board, mut rng: R) -> Self {
        let first = pick_random(&mut rng);
        let next = pick_random(&mut rng);
        let mut state = Self {
            board,
            active: None,
            next,
            rng,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            status: GameStatus::Running,
            drop_timer_ms: 0,
        };
        if !state.place(first) {
            state.end_game();
        }
        state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next_shape(&self) -> &Shape {
        &self.next
    }

    /// Milliseconds accumulated toward the next gravity step
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Current gravity interval, fully determined by level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_cell_values(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock-in event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Put `shape` at the spawn point. Returns false (game over) when it
    /// collides with settled cells.
    fn place(&mut self, shape: Shape) -> bool {
        let piece = ActivePiece::spawn(shape, &self.board);
        if !piece.fits(&self.board) {
            self.active = None;
            return false;
        }
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Promote the next piece and draw a new one
    fn spawn_next(&mut self) -> bool {
        let upcoming = pick_random(&mut self.rng);
        let shape = std::mem::replace(&mut self.next, upcoming);
        self.place(shape)
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// At most one row per call; returns true when the piece dropped or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Running || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.gravity_interval_ms() {
            return false;
        }

        self.drop_timer_ms = 0;
        self.step_down();
        true
    }

    /// Apply a player action.
    ///
    /// Returns whether anything changed. Illegal actions (blocked moves,
    /// anything but Pause/Restart while paused, anything but Restart after
    /// game over) are ignored.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::Pause => self.toggle_pause(),
            _ if self.status != GameStatus::Running => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => self.step_down(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
        }
    }

    pub(crate) fn try_move(&mut self, dx: i32) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.try_move(dx, &self.board),
            None => false,
        }
    }

    pub(crate) fn try_rotate(&mut self) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.try_rotate(&self.board),
            None => false,
        }
    }

    /// One gravity step: drop a row, or lock when blocked
    fn step_down(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if piece.soft_drop(&self.board) == DropOutcome::LockRequired {
            self.lock_active();
        }
        true
    }

    /// Drop until blocked and lock immediately. Returns rows fallen.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let Some(piece) = self.active.as_mut() else {
            return 0;
        };

        let mut distance = 0;
        while piece.soft_drop(&self.board) == DropOutcome::Moved {
            distance += 1;
        }
        self.lock_active();
        distance
    }

    /// Toggle between Running and Paused. Resuming restarts the gravity timer.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                self.drop_timer_ms = 0;
                true
            }
            GameStatus::GameOver => false,
        }
    }

    /// Fresh board and session; the RNG stream continues.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.status = GameStatus::Running;
        self.drop_timer_ms = 0;
        self.last_event = None;
        self.piece_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);

        let first = pick_random(&mut self.rng);
        self.next = pick_random(&mut self.rng);
        info!("restart: episode {}", self.episode_id);
        if !self.place(first) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.active = None;
        self.status = GameStatus::GameOver;
        info!(
            "game over: score {} level {} lines {}",
            self.score, self.level, self.lines
        );
    }

    /// Merge the active piece into the board, clear lines, score, and spawn
    /// the next piece or end the game.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock(piece.shape(), piece.x(), piece.y());
        let cleared = self.board.clear_full_lines() as u32;

        let result = score_lock(cleared, self.level, self.lines);
        self.score = self.score.saturating_add(result.score_delta);
        self.lines = result.total_lines;
        if result.level_up {
            self.level += 1;
            info!(
                "level {} reached at {} lines, gravity {}ms",
                self.level,
                self.lines,
                self.gravity_interval_ms()
            );
        }

        let game_over = self.board.top_row_occupied() || !self.spawn_next();
        if game_over {
            self.end_game();
        }

        debug!(
            "lock at ({}, {}): cleared {} (+{})",
            piece.x(),
            piece.y(),
            cleared,
            result.score_delta
        );

        if let Some(kind) = piece.kind() {
            self.last_event = Some(LockEvent {
                kind,
                lines_cleared: cleared,
                score_delta: result.score_delta,
                level_up: result.level_up,
                game_over,
            });
        }
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
