//! Terminal input module (front-end facing).
//!
//! This module is independent of the simulation. It maps `crossterm` key
//! events into [`Intent`]s: player commands for the focused board plus the
//! board-management actions of the fleet front end.

pub mod handler;
pub mod map;

pub use tetris_fleet_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, piece_for_key, should_quit, Intent};
