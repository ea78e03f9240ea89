//! Scheduler tests driven by a manual clock

use std::convert::Infallible;

use classic_tetris::core::{GameSnapshot, GameState, SequenceRng};
use classic_tetris::engine::{Clock, FrameOutcome, ManualClock, RenderSink, Scheduler};
use classic_tetris::types::{GameAction, GameStatus, PieceKind, TICK_MS};

#[derive(Default)]
struct Recorder {
    frames: Vec<GameSnapshot>,
}

impl RenderSink for Recorder {
    type Error = Infallible;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Infallible> {
        self.frames.push(snapshot.clone());
        Ok(())
    }
}

struct Failing;

impl RenderSink for Failing {
    type Error = &'static str;

    fn present(&mut self, _snapshot: &GameSnapshot) -> Result<(), &'static str> {
        Err("display gone")
    }
}

fn scheduler(kind: PieceKind) -> Scheduler<Recorder, SequenceRng> {
    let game = GameState::with_rng(SequenceRng::constant(kind.index()));
    Scheduler::new(game, Recorder::default())
}

/// Run frames every `TICK_MS` until `ms` have passed
fn run_for<S: RenderSink>(sched: &mut Scheduler<S, SequenceRng>, clock: &ManualClock, ms: u64)
where
    S::Error: std::fmt::Debug,
{
    let end = clock.now_ms() + ms;
    while clock.now_ms() < end {
        clock.advance(TICK_MS as u64);
        sched.frame_with(clock).unwrap();
    }
}

#[test]
fn test_gravity_at_sixty_fps() {
    let clock = ManualClock::new(0);
    let mut sched = scheduler(PieceKind::T);
    sched.start();
    sched.frame_with(&clock).unwrap();

    run_for(&mut sched, &clock, 992);
    assert_eq!(sched.game().active().unwrap().y(), 0);

    run_for(&mut sched, &clock, 16);
    assert_eq!(sched.game().active().unwrap().y(), 1);
    assert_eq!(sched.sink().frames.len(), 1 + 62 + 1);
}

#[test]
fn test_every_frame_is_presented() {
    let clock = ManualClock::new(0);
    let mut sched = scheduler(PieceKind::I);
    sched.start();
    for _ in 0..10 {
        sched.frame_with(&clock).unwrap();
        clock.advance(16);
    }
    assert_eq!(sched.sink().frames.len(), 10);
    assert!(sched
        .sink()
        .frames
        .iter()
        .all(|f| f.status == GameStatus::Running));
}

#[test]
fn test_pause_then_resume_through_inbox() {
    let clock = ManualClock::new(0);
    let mut sched = scheduler(PieceKind::T);
    sched.start();
    sched.frame_with(&clock).unwrap();

    sched.submit(GameAction::Pause);
    run_for(&mut sched, &clock, 5_000);
    assert_eq!(sched.game().active().unwrap().y(), 0);
    assert_eq!(
        sched.sink().frames.last().unwrap().status,
        GameStatus::Paused
    );

    sched.submit(GameAction::Pause);
    run_for(&mut sched, &clock, 1_008);
    assert_eq!(sched.game().active().unwrap().y(), 1);
}

#[test]
fn test_stop_prevents_further_ticks() {
    let clock = ManualClock::new(0);
    let mut sched = scheduler(PieceKind::T);
    let handle = sched.start();
    sched.frame(handle, clock.now_ms()).unwrap();
    sched.stop();

    clock.advance(10_000);
    assert_eq!(
        sched.frame(handle, clock.now_ms()),
        Ok(FrameOutcome::Skipped)
    );
    assert_eq!(sched.frame_with(&clock), Ok(FrameOutcome::Skipped));
    assert_eq!(sched.game().active().unwrap().y(), 0);
    assert_eq!(sched.sink().frames.len(), 1);

    // Starting again re-baselines: the 10s gap is not replayed.
    sched.start();
    sched.frame_with(&clock).unwrap();
    assert_eq!(sched.game().active().unwrap().y(), 0);
}

#[test]
fn test_game_over_halts_and_restart_rearms() {
    let clock = ManualClock::new(0);
    let mut sched = scheduler(PieceKind::O);
    let first = sched.start();

    for _ in 0..10 {
        sched.submit(GameAction::HardDrop);
    }
    clock.advance(16);
    let outcome = sched.frame_with(&clock).unwrap();
    assert!(matches!(outcome, FrameOutcome::Halted { .. }));
    assert!(sched.handle().is_none());

    let last = sched.sink().frames.last().unwrap().clone();
    assert_eq!(last.status, GameStatus::GameOver);
    assert!(last.active.is_none());

    // Stale handle and plain inputs do nothing.
    assert_eq!(sched.frame(first, 99_999), Ok(FrameOutcome::Skipped));
    assert!(!sched.submit(GameAction::HardDrop));

    assert!(sched.submit(GameAction::Restart));
    let second = sched.handle().unwrap();
    assert_ne!(first, second);
    clock.advance(16);
    sched.frame_with(&clock).unwrap();
    let fresh = sched.sink().frames.last().unwrap();
    assert_eq!(fresh.status, GameStatus::Running);
    assert!(fresh.board.iter().all(|&v| v == 0));
}

#[test]
fn test_sink_errors_propagate() {
    let game = GameState::with_rng(SequenceRng::constant(0));
    let mut sched = Scheduler::new(game, Failing);
    let handle = sched.start();
    assert_eq!(sched.frame(handle, 0), Err("display gone"));
}

#[test]
fn test_unplaceable_first_piece_halts_on_first_frame() {
    // Only I pieces, which never fit a 3-wide board.
    let game = GameState::with_board(3, 20, SequenceRng::constant(PieceKind::I.index())).unwrap();
    let mut sched = Scheduler::new(game, Recorder::default());
    let handle = sched.start();

    assert_eq!(sched.frame(handle, 0), Ok(FrameOutcome::Halted { lock: None }));
    assert!(sched.is_halted());
    assert_eq!(sched.sink().frames[0].status, GameStatus::GameOver);

    // Restart re-arms, but the board still cannot take a piece.
    assert!(sched.submit(GameAction::Restart));
    let fresh = sched.handle().unwrap();
    assert_eq!(sched.frame(fresh, 16), Ok(FrameOutcome::Halted { lock: None }));
    assert!(sched.is_halted());
}
