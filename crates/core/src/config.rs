//! Session configuration
//!
//! Defaults match the standard game. A JSON document may override any subset
//! of fields; the `TETRIS_FLEET_*` environment variables then override a few
//! common ones. Unparseable environment values are ignored.

use std::env;
use std::fs;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::planner::PlannerWeights;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Upper bound on boards in the session
    pub max_boards: usize,
    /// Boards a front end creates at startup
    pub boards: usize,
    /// Board `i` draws pieces from a bag seeded with `seed + i`
    pub seed: u32,
    pub gravity_ms: u32,
    pub autonomous_cadence_ms: u32,
    pub stuck_piece_timeout_ms: u32,
    pub planner: PlannerWeights,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            max_boards: DEFAULT_MAX_BOARDS,
            boards: 2,
            seed: 12345,
            gravity_ms: DEFAULT_GRAVITY_MS,
            autonomous_cadence_ms: DEFAULT_AUTONOMOUS_CADENCE_MS,
            stuck_piece_timeout_ms: STUCK_PIECE_TIMEOUT_MS,
            planner: PlannerWeights::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from the environment:
    ///
    /// - `TETRIS_FLEET_CONFIG`: path to a JSON config file
    /// - `TETRIS_FLEET_BOARDS`: initial board count
    /// - `TETRIS_FLEET_SEED`: session seed
    /// - `TETRIS_FLEET_CADENCE_MS`: autonomous cadence
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("TETRIS_FLEET_CONFIG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Some(boards) = env::var("TETRIS_FLEET_BOARDS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.boards = boards;
        }
        if let Some(seed) = env::var("TETRIS_FLEET_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.seed = seed;
        }
        if let Some(cadence) = env::var("TETRIS_FLEET_CADENCE_MS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.autonomous_cadence_ms = cadence;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < MIN_BOARD_DIM || self.board_height < MIN_BOARD_DIM {
            return Err(ConfigError::Invalid(format!(
                "board must be at least {}x{}, got {}x{}",
                MIN_BOARD_DIM, MIN_BOARD_DIM, self.board_width, self.board_height
            )));
        }
        if self.max_boards == 0 {
            return Err(ConfigError::Invalid("max_boards must be at least 1".into()));
        }
        if self.boards > self.max_boards {
            return Err(ConfigError::Invalid(format!(
                "boards ({}) exceeds max_boards ({})",
                self.boards, self.max_boards
            )));
        }
        if self.gravity_ms == 0 || self.autonomous_cadence_ms == 0 {
            return Err(ConfigError::Invalid("cadences must be non-zero".into()));
        }
        if self.stuck_piece_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "stuck_piece_timeout_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
