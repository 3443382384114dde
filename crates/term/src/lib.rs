//! Terminal "fleet renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders board snapshots into a simple framebuffer that is then
//! diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Draw any number of boards side by side from snapshots
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod fleet_view;
pub mod renderer;

pub use tetris_fleet_core as core;
pub use tetris_fleet_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use fleet_view::{FleetStatus, FleetView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
