//! Error types for session and configuration entry points
//!
//! Gameplay failures (blocked moves, missing placements) are not errors; they
//! come back as `bool` / `Option` from the movement and planner functions.

use std::io;

/// Misuse of a [`crate::Session`] entry point
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown board {index} (session has {count})")]
    UnknownBoard { index: usize, count: usize },
    #[error("board limit reached ({max})")]
    BoardLimitReached { max: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = SessionError::UnknownBoard { index: 7, count: 2 };
        assert_eq!(err.to_string(), "unknown board 7 (session has 2)");
        let err = SessionError::BoardLimitReached { max: 9 };
        assert_eq!(err.to_string(), "board limit reached (9)");
        let err = ConfigError::Invalid("max_boards must be at least 1".into());
        assert!(err.to_string().contains("max_boards"));
    }
}
