//! Locking and line clearing
//!
//! Locking writes the piece color into every occupied cell that lies inside
//! the visible grid (cells above row 0 are dropped). Line clearing then
//! compacts completed rows. Neither step awards points.

use crate::grid::Grid;
use crate::piece::ActivePiece;

/// Result of committing one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    pub lines_cleared: u32,
}

/// Write the piece into the grid. Cells with `y < 0` are discarded.
pub fn lock_piece(grid: &mut Grid, piece: &ActivePiece) {
    for (x, y) in piece.cells() {
        if y >= 0 {
            grid.set(x, y, Some(piece.color));
        }
    }
}

/// Lock the piece and clear any rows it completed
pub fn lock_and_clear(grid: &mut Grid, piece: &ActivePiece) -> LockOutcome {
    lock_piece(grid, piece);
    LockOutcome {
        lines_cleared: grid.clear_full_rows(),
    }
}
