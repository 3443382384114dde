//! Headless runner: every board autonomous, fixed tick count, JSON summary.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use tetris_fleet::core::{Session, SessionConfig, SessionObserver};
use tetris_fleet::types::{ControlMode, TICK_MS};

/// Flags of the `headless` subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
pub struct HeadlessArgs {
    /// Boards to run (defaults to the session config)
    #[arg(long)]
    pub boards: Option<usize>,
    /// Ticks of 16 ms to simulate
    #[arg(long, default_value_t = 1000)]
    pub ticks: u32,
    /// Session seed (defaults to the session config)
    #[arg(long)]
    pub seed: Option<u32>,
}

impl HeadlessArgs {
    /// Board count and seed, falling back to `config` for missing flags
    pub fn resolve(&self, config: &SessionConfig) -> (usize, u32) {
        (
            self.boards.unwrap_or(config.boards).max(1),
            self.seed.unwrap_or(config.seed),
        )
    }
}

#[derive(Debug, Default, Serialize)]
struct EventTally {
    line_clears: u32,
    lines: u32,
    game_overs: u32,
    mode_changes: u32,
}

struct Tally(Rc<RefCell<EventTally>>);

impl SessionObserver for Tally {
    fn on_lines_cleared(&mut self, _board: usize, lines: u32) {
        let mut t = self.0.borrow_mut();
        t.line_clears += 1;
        t.lines += lines;
    }

    fn on_game_over(&mut self, _board: usize) {
        self.0.borrow_mut().game_overs += 1;
    }

    fn on_control_mode_changed(&mut self, _board: usize, _mode: ControlMode) {
        self.0.borrow_mut().mode_changes += 1;
    }
}

#[derive(Debug, Serialize)]
struct BoardReport {
    index: usize,
    pieces_locked: u32,
    lines_cleared: u32,
    game_over: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u32,
    ticks: u32,
    simulated_ms: u64,
    boards: Vec<BoardReport>,
    events: EventTally,
}

pub fn run(config: SessionConfig, args: HeadlessArgs) -> Result<()> {
    let report = simulate(config, args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn simulate(mut config: SessionConfig, args: HeadlessArgs) -> Result<Report> {
    let (boards, seed) = args.resolve(&config);
    config.seed = seed;
    config.boards = boards;
    config.max_boards = config.max_boards.max(boards);

    eprintln!(
        "[fleet] headless: {} boards, {} ticks, seed {}",
        boards, args.ticks, seed
    );

    let mut session = Session::new(config)?;
    let tally = Rc::new(RefCell::new(EventTally::default()));
    session.subscribe(Box::new(Tally(tally.clone())));

    for _ in 0..boards {
        let index = session.add_board(ControlMode::Autonomous)?;
        session.set_autonomous_hard_drop(index, true)?;
    }
    for _ in 0..args.ticks {
        session.tick(TICK_MS);
    }

    let boards = session
        .boards()
        .map(|b| BoardReport {
            index: b.index(),
            pieces_locked: b.pieces_locked(),
            lines_cleared: b.lines_cleared(),
            game_over: b.is_over(),
        })
        .collect();
    drop(session);

    let events = Rc::try_unwrap(tally)
        .map(RefCell::into_inner)
        .unwrap_or_default();
    Ok(Report {
        seed,
        ticks: args.ticks,
        simulated_ms: args.ticks as u64 * TICK_MS as u64,
        boards,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flags_fall_back_to_config() {
        let config = SessionConfig {
            boards: 3,
            seed: 77,
            ..SessionConfig::default()
        };
        let args = HeadlessArgs {
            boards: None,
            ticks: 10,
            seed: None,
        };
        assert_eq!(args.resolve(&config), (3, 77));

        let args = HeadlessArgs {
            boards: Some(0),
            ticks: 10,
            seed: Some(5),
        };
        assert_eq!(args.resolve(&config), (1, 5));
    }

    #[test]
    fn report_covers_every_board() {
        let args = HeadlessArgs {
            boards: Some(12),
            ticks: 400,
            seed: Some(9),
        };
        let report = simulate(SessionConfig::default(), args).unwrap();
        assert_eq!(report.seed, 9);
        assert_eq!(report.boards.len(), 12);
        assert_eq!(report.simulated_ms, 400 * TICK_MS as u64);
        assert!(report.boards.iter().all(|b| b.pieces_locked > 0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["boards"][11]["index"], 11);
    }
}
