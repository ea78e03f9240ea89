//! Terminal Tetris runner (default binary).
//!
//! Reads `TETRIS_*` configuration, then drives the scheduler at a fixed frame
//! period. Key events between frames become queued input signals; the
//! terminal sink draws every frame.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use classic_tetris::config::GameConfig;
use classic_tetris::core::{GameState, SimpleRng};
use classic_tetris::engine::{RenderSink, Scheduler, SystemClock};
use classic_tetris::input::{handle_key_event, should_quit};
use classic_tetris::term::{GameView, TerminalSink, Viewport};

type Host = Scheduler<TerminalSink, SimpleRng>;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let seed = config.resolve_seed();
    let game = GameState::with_board(config.board_width, config.board_height, SimpleRng::new(seed))
        .context("invalid board configuration")?;
    info!(
        "starting: seed {} board {}x{} theme {}",
        seed,
        config.board_width,
        config.board_height,
        config.theme.as_str()
    );

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let view = GameView::default().with_theme(config.theme);
    let mut scheduler = Scheduler::new(game, TerminalSink::new(view, Viewport::new(w, h)));

    let result = scheduler
        .sink_mut()
        .enter()
        .and_then(|()| run(&mut scheduler, &config));

    // Always try to restore terminal state.
    let _ = scheduler.sink_mut().exit();
    result
}

/// Log to `TETRIS_LOG_PATH` when set. The terminal is in raw mode while
/// playing, so stderr is never a target.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(scheduler: &mut Host, config: &GameConfig) -> Result<()> {
    let clock = SystemClock::new();
    let frame = Duration::from_millis(config.frame_ms as u64);
    scheduler.start();

    let mut next_frame = Instant::now();
    loop {
        scheduler.frame_with(&clock)?;

        next_frame += frame;
        let now = Instant::now();
        if next_frame < now {
            // Fell behind (e.g. the process was suspended); don't try to catch up.
            next_frame = now;
        }

        // Input with timeout until the next frame.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }

            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit: score {}", scheduler.game().score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key, scheduler.game().status()) {
                        scheduler.submit(action);
                    }
                }
                Event::Resize(w, h) => {
                    scheduler.sink_mut().resize(w, h);
                    if scheduler.is_halted() {
                        // No frames run while halted; redraw the final board.
                        let snap = scheduler.game().snapshot();
                        scheduler.sink_mut().present(&snap)?;
                    }
                }
                _ => {}
            }
        }
    }
}
