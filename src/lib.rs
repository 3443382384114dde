//! Tetris fleet (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, integration
//! tests and benches can use `tetris_fleet::{core,input,term,types}`.

pub use tetris_fleet_core as core;
pub use tetris_fleet_input as input;
pub use tetris_fleet_term as term;
pub use tetris_fleet_types as types;
