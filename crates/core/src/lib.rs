//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the multi-board simulation: the grid and piece state
//! machine, collision and rotation resolution, line clearing, the exhaustive
//! heuristic planner, the step-wise autonomous executor, and the session that
//! ticks every board forward in lock-step. It has **zero dependencies** on
//! terminals, rendering, or I/O beyond reading an optional config file.
//!
//! # Module Structure
//!
//! - [`shape`]: piece catalog and the generic clockwise rotation
//! - [`piece`]: the active piece of one board
//! - [`grid`]: W×H cell matrix with row compaction
//! - [`movement`]: collision test plus translate / rotate (with kicks) / drops
//! - [`lock`]: committing a piece and clearing completed rows
//! - [`planner`]: rotation × column search scored by surface features
//! - [`executor`]: turns one plan into primitive moves, one per step
//! - [`board`]: per-board state, spawn, game over, reset
//! - [`session`]: the bounded board collection and the per-tick scheduler
//! - [`events`]: observer contract for outward notifications
//!
//! # Example
//!
//! ```
//! use tetris_fleet_core::{Session, SessionConfig};
//! use tetris_fleet_core::types::{Command, ControlMode, TICK_MS};
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! let human = session.add_board(ControlMode::Human).unwrap();
//! let bot = session.add_board(ControlMode::Autonomous).unwrap();
//!
//! session.set_autonomous_hard_drop(bot, true).unwrap();
//!
//! session.focus(human).unwrap();
//! session.apply_command(Command::MoveLeft);
//! for _ in 0..300 {
//!     session.tick(TICK_MS);
//! }
//! assert!(session.board(bot).unwrap().pieces_locked() > 0);
//! ```
//!
//! # Timing
//!
//! The session never reads a clock itself. The caller measures elapsed time
//! with a monotonic source and passes it to [`Session::tick`]; gravity,
//! autonomous cadence and the stuck-piece timeout all accumulate from it.

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod executor;
pub mod grid;
pub mod lock;
pub mod movement;
pub mod piece;
pub mod planner;
pub mod rng;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use tetris_fleet_types as types;

pub use board::{Board, Capabilities};
pub use config::SessionConfig;
pub use error::{ConfigError, SessionError};
pub use events::{BoardEvent, SessionObserver};
pub use executor::{AutoAction, ExecutorState};
pub use grid::Grid;
pub use lock::LockOutcome;
pub use movement::{drop_one, hard_drop, rotate, translate, would_collide, DropOutcome};
pub use piece::ActivePiece;
pub use planner::{plan_best_placement, GridFeatures, PlannerWeights};
pub use rng::{PieceBag, SimpleRng};
pub use session::Session;
pub use shape::{rotate_clockwise, shape_for, Shape};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
