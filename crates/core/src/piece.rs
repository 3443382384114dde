//! The active (falling) piece of a board

use crate::shape::{shape_for, Shape};
use crate::types::{ColorToken, PieceKind};

/// Active falling piece.
///
/// `x`/`y` locate the shape's top-left corner on the grid; `y` may be negative
/// while a piece is partly above the visible area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    pub color: ColorToken,
}

impl ActivePiece {
    /// Piece in its canonical orientation at (`x`, `y`)
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: shape_for(kind),
            x,
            y,
            color: kind.color(),
        }
    }

    /// Piece at the spawn position for a grid `grid_width` columns wide:
    /// horizontally centred, top row 0.
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let shape = shape_for(kind);
        let x = (grid_width / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            x,
            y: 0,
            color: kind.color(),
        }
    }

    /// Absolute grid coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(move |(col, row)| (self.x + col, self.y + row))
    }
}
