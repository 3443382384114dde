//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data types shared by the simulation core, the
//! terminal front end and the input mapping. Everything here is a small `Copy`
//! value with no behaviour beyond parsing and formatting.
//!
//! # Board Dimensions
//!
//! Boards default to the standard playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Other sizes are allowed per session (see the core crate's `SessionConfig`),
//! but never smaller than [`MIN_BOARD_DIM`] in either direction.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_GRAVITY_MS` | 800 | Gravity cadence for the focused human board |
//! | `DEFAULT_AUTONOMOUS_CADENCE_MS` | 150 | Delay between autonomous executor steps |
//! | `STUCK_PIECE_TIMEOUT_MS` | 5000 | Piece age that trips the autonomous circuit breaker |
//!
//! # Examples
//!
//! ```
//! use tetris_fleet_types::{Command, ControlMode, PieceKind, DEFAULT_BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.letter(), 'T');
//!
//! assert_eq!(Command::ALL.len(), 5);
//!
//! assert_eq!(ControlMode::default(), ControlMode::Human);
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Smallest width or height a board may be configured with
pub const MIN_BOARD_DIM: usize = 4;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity cadence for a focused human board
pub const DEFAULT_GRAVITY_MS: u32 = 800;

/// Delay between two autonomous executor steps
pub const DEFAULT_AUTONOMOUS_CADENCE_MS: u32 = 150;

/// Piece age after which an autonomous board forces the piece down
pub const STUCK_PIECE_TIMEOUT_MS: u32 = 5000;

/// Upper bound on boards per session
pub const DEFAULT_MAX_BOARDS: usize = 9;

/// Pieces a manual override window lasts before control returns to the agent
pub const DEFAULT_OVERRIDE_PIECES: u32 = 3;


/// Opaque color token stored in occupied grid cells.
///
/// The core never interprets it; renderers unpack it as 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorToken(pub u32);

impl ColorToken {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

/// A cell on a board grid
///
/// - `None`: Empty cell
/// - `Some(ColorToken)`: Locked block with the color of the piece that left it
pub type Cell = Option<ColorToken>;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and default color:
/// - **I**: Cyan, 4x4 matrix
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_fleet_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Upper-case display letter
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Default color written into the grid when this kind locks
    pub fn color(self) -> ColorToken {
        match self {
            PieceKind::I => ColorToken::rgb(80, 220, 220),
            PieceKind::O => ColorToken::rgb(240, 220, 80),
            PieceKind::T => ColorToken::rgb(200, 120, 220),
            PieceKind::S => ColorToken::rgb(100, 220, 120),
            PieceKind::Z => ColorToken::rgb(220, 80, 80),
            PieceKind::J => ColorToken::rgb(80, 120, 220),
            PieceKind::L => ColorToken::rgb(255, 165, 0),
        }
    }
}

/// Player commands accepted by the focused human board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise (with kicks)
    Rotate,
    /// Drop piece to its resting row and lock it (needs the hard-drop capability)
    HardDrop,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
    ];
}

/// Who drives a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Player commands and gravity (only while the board has input focus)
    #[default]
    Human,
    /// Heuristic planner plus step-wise executor
    Autonomous,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Human => "human",
            ControlMode::Autonomous => "autonomous",
        }
    }
}

/// Placement chosen by the planner.
///
/// `rotation` counts clockwise quarter turns relative to the piece's shape when
/// the plan was made; `x` is the column of the shape's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveTarget {
    pub x: i32,
    pub rotation: u8,
}
