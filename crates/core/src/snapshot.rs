//! Read-only board views for renderers and reports

use serde::Serialize;

use crate::board::Capabilities;
use crate::piece::ActivePiece;
use crate::types::{Cell, ColorToken, ControlMode, MoveTarget, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub color: ColorToken,
    /// Absolute coordinates of the occupied cells (may include `y < 0`)
    pub cells: Vec<(i32, i32)>,
}

impl ActiveSnapshot {
    /// Overwrite with `piece`, reusing the cell buffer
    pub fn copy_from(&mut self, piece: &ActivePiece) {
        self.kind = piece.kind;
        self.x = piece.x;
        self.y = piece.y;
        self.color = piece.color;
        self.cells.clear();
        self.cells.extend(piece.cells());
    }
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
            color: piece.color,
            cells: piece.cells().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BoardSnapshot {
    pub index: usize,
    pub width: usize,
    pub height: usize,
    /// Row-major locked cells
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub mode: ControlMode,
    pub game_over: bool,
    pub target: Option<MoveTarget>,
    pub capabilities: Capabilities,
    pub override_remaining: Option<u32>,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
}

impl BoardSnapshot {
    /// Locked cell at (x, y); `None` outside the grid or when empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Color to draw at (x, y): the active piece wins over locked cells
    pub fn color_at(&self, x: usize, y: usize) -> Cell {
        if let Some(active) = &self.active {
            if active
                .cells
                .iter()
                .any(|&(cx, cy)| cx == x as i32 && cy == y as i32)
            {
                return Some(active.color);
            }
        }
        self.cell(x, y)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
