//! Collision and movement - legality of the active piece on one board
//!
//! [`would_collide`] is a pure function of a piece and a grid; the planner
//! calls it against cloned grids. The remaining operations mutate a board's
//! active piece and always leave it in a legal position: a failed move is
//! reverted and reported as `false`.

use crate::board::Board;
use crate::grid::Grid;
use crate::lock::LockOutcome;
use crate::piece::ActivePiece;
use crate::shape::rotate_clockwise;
use crate::types::PieceKind;

/// Offsets tried, in order, when an in-place rotation collides:
/// four horizontal wall kicks, then one step up (floor kick).
const ROTATION_KICKS: [(i32, i32); 5] = [(1, 0), (-1, 0), (2, 0), (-2, 0), (0, -1)];

/// What a single downward step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved one row down
    Moved,
    /// The piece could not move and was locked
    Locked(LockOutcome),
    /// No active piece
    Idle,
}

/// Whether the piece overlaps a wall, the floor, or a locked cell.
///
/// Cells above the grid (`y < 0`) only collide with the side walls.
pub fn would_collide(piece: &ActivePiece, grid: &Grid) -> bool {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    piece.cells().any(|(x, y)| {
        x < 0 || x >= width || y >= height || (y >= 0 && grid.is_occupied(x, y))
    })
}

/// Shift the active piece by (`dx`, `dy`); reverts and returns false on collision
pub fn translate(board: &mut Board, dx: i32, dy: i32) -> bool {
    let Some(piece) = board.active.as_mut() else {
        return false;
    };

    piece.x += dx;
    piece.y += dy;
    if would_collide(piece, &board.grid) {
        piece.x -= dx;
        piece.y -= dy;
        return false;
    }

    board.changed = true;
    true
}

/// Rotate the active piece clockwise, trying the kick offsets if the
/// in-place rotation collides.
///
/// The O piece never rotates. When every attempt fails the shape and position
/// are restored and false is returned.
pub fn rotate(board: &mut Board) -> bool {
    let Some(piece) = board.active.as_mut() else {
        return false;
    };
    if piece.kind == PieceKind::O {
        return false;
    }

    let original = piece.shape.clone();
    let (x0, y0) = (piece.x, piece.y);
    piece.shape = rotate_clockwise(&original);

    let resolved = !would_collide(piece, &board.grid)
        || ROTATION_KICKS.iter().any(|&(dx, dy)| {
            piece.x = x0 + dx;
            piece.y = y0 + dy;
            !would_collide(piece, &board.grid)
        });

    if !resolved {
        piece.shape = original;
        piece.x = x0;
        piece.y = y0;
        return false;
    }

    board.changed = true;
    true
}

/// Move the piece down one row, locking it (and spawning the next one) when
/// it cannot move.
pub fn drop_one(board: &mut Board) -> DropOutcome {
    if board.active.is_none() {
        return DropOutcome::Idle;
    }
    if translate(board, 0, 1) {
        DropOutcome::Moved
    } else {
        DropOutcome::Locked(board.settle())
    }
}

/// Drop the piece to its resting row and lock it.
///
/// Returns `None` when there is no active piece.
pub fn hard_drop(board: &mut Board) -> Option<LockOutcome> {
    board.active.as_ref()?;
    while translate(board, 0, 1) {}
    Some(board.settle())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(rows: &[&str], piece: ActivePiece) -> Board {
        let mut board = Board::new(0, rows[0].len(), rows.len(), 1);
        board.grid = Grid::from_ascii(rows);
        board.active = Some(piece);
        board
    }

    #[test]
    fn collision_with_walls_and_floor() {
        let grid = Grid::new(4, 4);
        assert!(!would_collide(&ActivePiece::new(PieceKind::O, 0, 0), &grid));
        assert!(would_collide(&ActivePiece::new(PieceKind::O, -1, 0), &grid));
        assert!(would_collide(&ActivePiece::new(PieceKind::O, 3, 0), &grid));
        assert!(would_collide(&ActivePiece::new(PieceKind::O, 0, 3), &grid));
    }

    #[test]
    fn cells_above_the_grid_only_hit_walls() {
        let grid = Grid::from_ascii(&["####", "....", "....", "...."]);
        // rows -2 and -1 are above row 0
        assert!(!would_collide(&ActivePiece::new(PieceKind::O, 1, -2), &grid));
        assert!(would_collide(&ActivePiece::new(PieceKind::O, 1, -1), &grid));
        assert!(would_collide(&ActivePiece::new(PieceKind::O, -1, -2), &grid));
    }

    #[test]
    fn collision_with_locked_cells() {
        let grid = Grid::from_ascii(&["....", "....", "..#.", "...."]);
        assert!(would_collide(&ActivePiece::new(PieceKind::O, 1, 1), &grid));
        assert!(!would_collide(&ActivePiece::new(PieceKind::O, 0, 0), &grid));
    }

    #[test]
    fn translate_reverts_on_collision() {
        let mut board = board_with(&["....", "....", "....", "...."], ActivePiece::new(PieceKind::O, 0, 0));
        assert!(!translate(&mut board, -1, 0));
        assert_eq!(board.active().map(|p| (p.x, p.y)), Some((0, 0)));
        assert!(translate(&mut board, 1, 1));
        assert_eq!(board.active().map(|p| (p.x, p.y)), Some((1, 1)));
    }

    #[test]
    fn o_piece_does_not_rotate() {
        let mut board = board_with(&["....", "....", "....", "...."], ActivePiece::new(PieceKind::O, 1, 1));
        let before = board.active().cloned();
        assert!(!rotate(&mut board));
        assert_eq!(board.active().cloned(), before);
    }

    #[test]
    fn rotation_in_open_space_keeps_position() {
        let mut board = board_with(&[".....", ".....", ".....", ".....", "....."], ActivePiece::new(PieceKind::T, 1, 1));
        assert!(rotate(&mut board));
        let piece = board.active().unwrap();
        assert_eq!((piece.x, piece.y), (1, 1));
        assert_eq!(piece.shape.to_rows(), vec![".#.", ".##", ".#."]);
    }

    #[test]
    fn wall_kick_right_off_the_left_wall() {
        // Vertical I hugging the left wall: its matrix column 2 is filled, so x = -2.
        let mut piece = ActivePiece::new(PieceKind::I, -2, 0);
        piece.shape = rotate_clockwise(&piece.shape);
        let mut board = board_with(&["......"; 6], piece);
        assert!(!would_collide(board.active().unwrap(), &board.grid));

        // Rotating puts the bar on matrix row 2 spanning columns -2..=1. The
        // in-place, +1 and -1 positions cross the left wall; +2 is the first to fit.
        assert!(rotate(&mut board));
        let piece = board.active().unwrap();
        assert_eq!((piece.x, piece.y), (0, 0));
        assert!(!would_collide(piece, &board.grid));
    }

    #[test]
    fn floor_kick_when_walls_do_not_help() {
        // A flat T resting on the floor of a three-wide well: the upright
        // orientation pokes through the floor at every horizontal offset.
        let piece = ActivePiece::new(PieceKind::T, 0, 1);
        let mut board = board_with(&["...", "...", "..."], piece);
        assert!(!would_collide(board.active().unwrap(), &board.grid));

        assert!(rotate(&mut board));
        let piece = board.active().unwrap();
        assert_eq!((piece.x, piece.y), (0, 0));
    }

    #[test]
    fn failed_rotation_is_fully_reverted() {
        // I piece boxed in: nothing but a flat slot fits.
        let rows = ["#....#", "#....#", "######"];
        let piece = ActivePiece::new(PieceKind::I, 1, 0);
        let mut board = board_with(&rows, piece);
        assert!(!would_collide(board.active().unwrap(), &board.grid));
        let before = board.active().cloned();
        assert!(!rotate(&mut board));
        assert_eq!(board.active().cloned(), before);
    }

    #[test]
    fn hard_drop_locks_on_the_floor() {
        let mut board = Board::new(0, 6, 8, 3);
        board.start();
        let kind = board.active().unwrap().kind;
        let outcome = hard_drop(&mut board).unwrap();
        assert_eq!(outcome.lines_cleared, 0);
        assert_eq!(board.pieces_locked(), 1);
        // the locked piece touches the bottom row
        assert!(!board.grid().is_row_empty(7), "{:?} did not reach the floor", kind);
    }

    #[test]
    fn drop_one_moves_then_locks() {
        let mut board = board_with(&["....", "....", "....", "...."], ActivePiece::new(PieceKind::O, 0, 1));
        assert_eq!(drop_one(&mut board), DropOutcome::Moved);
        assert!(matches!(drop_one(&mut board), DropOutcome::Locked(_)));
        assert_eq!(board.grid().column_height(0), 2);
    }
}
