//! Tetris fleet runner (default binary).
//!
//! `tetris-fleet` plays interactively: several boards side by side, one of
//! them focused for the keyboard, the rest driven by the heuristic agent.
//! `tetris-fleet headless [--boards N] [--ticks T] [--seed S]` runs every
//! board autonomously and prints a JSON summary. `--help` lists the flags.

mod headless;

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};

use tetris_fleet::core::{BoardSnapshot, Session, SessionConfig, SessionObserver};
use tetris_fleet::input::{InputHandler, Intent};
use tetris_fleet::term::{FleetStatus, FleetView, FrameBuffer, TerminalRenderer, Viewport};
use tetris_fleet::types::{ControlMode, PieceKind, DEFAULT_OVERRIDE_PIECES, TICK_MS};

/// Several falling-block boards side by side, one played from the keyboard
/// and the rest by the heuristic agent.
#[derive(Debug, Parser)]
#[command(name = "tetris-fleet", version, about)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Run every board autonomously and print a JSON summary
    Headless(headless::HeadlessArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SessionConfig::from_env().context("loading session config")?;

    if let Some(Mode::Headless(args)) = cli.mode {
        return headless::run(config, args);
    }

    let mut session = Session::new(config)?;
    let boards = session.config().boards.max(1);
    for i in 0..boards {
        let mode = if i == 0 {
            ControlMode::Human
        } else {
            ControlMode::Autonomous
        };
        session.add_board(mode)?;
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Marks the screen dirty whenever a board reports a change
struct Redraw(Rc<Cell<bool>>);

impl SessionObserver for Redraw {
    fn on_board_changed(&mut self, _board: usize) {
        self.0.set(true);
    }

    fn on_game_over(&mut self, _board: usize) {
        self.0.set(true);
    }

    fn on_control_mode_changed(&mut self, _board: usize, _mode: ControlMode) {
        self.0.set(true);
    }

    fn on_next_piece_changed(&mut self, _board: usize, _next: PieceKind) {
        self.0.set(true);
    }
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let dirty = Rc::new(Cell::new(true));
    session.subscribe(Box::new(Redraw(dirty.clone())));

    let view = FleetView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshots: Vec<BoardSnapshot> = Vec::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        if dirty.replace(false) {
            snapshots.resize_with(session.board_count(), BoardSnapshot::default);
            for (i, snap) in snapshots.iter_mut().enumerate() {
                session.snapshot_into(i, snap)?;
            }
            let status = FleetStatus {
                focused: session.focused(),
                hard_drop_unlocked: session.hard_drop_unlocked(),
                awaiting_piece: input.awaiting_piece(),
            };
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snapshots, &status, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let awaiting = input.awaiting_piece();
                    let intent = input.handle_key_press(key);
                    if awaiting != input.awaiting_piece() {
                        dirty.set(true);
                    }
                    if let Some(intent) = intent {
                        if !apply_intent(session, intent) {
                            return Ok(());
                        }
                        dirty.set(true);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty.set(true);
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

/// Carry out one intent. Returns false when the player asked to quit.
fn apply_intent(session: &mut Session, intent: Intent) -> bool {
    let focused = session.focused();
    let result = match (intent, focused) {
        (Intent::Quit, _) => return false,
        (Intent::Command(command), _) => {
            session.apply_command(command);
            Ok(())
        }
        (Intent::FocusBoard(index), _) => session.focus(index),
        (Intent::ToggleHardDrop, _) => {
            session.set_hard_drop_unlocked(!session.hard_drop_unlocked());
            Ok(())
        }
        (Intent::ToggleAutonomous, Some(index)) => {
            let next = match session.board(index).map(|b| b.mode()) {
                Some(ControlMode::Autonomous) => ControlMode::Human,
                _ => ControlMode::Autonomous,
            };
            session.set_control_mode(index, next).map(|_| ())
        }
        (Intent::ManualOverride, Some(index)) => session
            .begin_manual_override(index, DEFAULT_OVERRIDE_PIECES)
            .map(|_| ()),
        (Intent::Reset, Some(index)) => {
            let mode = session.board(index).map_or(ControlMode::Human, |b| b.mode());
            session.reset_board(index, mode)
        }
        (Intent::ForceNext(kind), Some(index)) => session.force_next_piece(index, kind),
        (Intent::ForceNextPrefix, _) | (_, None) => Ok(()),
    };
    if let Err(err) = result {
        eprintln!("[fleet] {}", err);
    }
    true
}
