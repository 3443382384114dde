//! Grid and line clearing tests

use tetris_fleet::core::lock::lock_and_clear;
use tetris_fleet::core::{ActivePiece, Grid};
use tetris_fleet::types::PieceKind;

#[test]
fn test_clear_without_full_rows_changes_nothing() {
    let mut grid = Grid::from_ascii(&[
        ".....",
        "#....",
        "##.##",
        "####.",
    ]);
    let before = grid.clone();
    assert_eq!(grid.clear_full_rows(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_clear_k_rows_shifts_the_rest_down() {
    let mut grid = Grid::from_ascii(&[
        "#....",
        "#####",
        ".#...",
        "#####",
        "#####",
        "..#..",
    ]);
    assert_eq!(grid.clear_full_rows(), 3);
    assert_eq!((grid.width(), grid.height()), (5, 6));
    assert_eq!(
        grid.to_ascii(),
        vec![".....", ".....", ".....", "#....", ".#...", "..#.."]
    );
}

#[test]
fn test_clear_every_row() {
    let mut grid = Grid::from_ascii(&["####", "####", "####", "####"]);
    assert_eq!(grid.clear_full_rows(), 4);
    assert!(grid.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_out_of_bounds_access() {
    let mut grid = Grid::new(4, 4);
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, 4), None);
    assert!(!grid.set(4, 0, Some(PieceKind::T.color())));
    assert!(!grid.is_occupied(-1, -1));
}

#[test]
fn test_vertical_i_completes_four_rows() {
    let mut grid = Grid::from_ascii(&[
        "......",
        "......",
        "##.###",
        "##.###",
        "##.###",
        "##.###",
    ]);
    // Vertical I: column 2 of its 4x4 matrix, so x = 0 lands it in column 2
    let mut piece = ActivePiece::new(PieceKind::I, 0, 2);
    piece.shape = tetris_fleet::core::rotate_clockwise(&piece.shape);
    let outcome = lock_and_clear(&mut grid, &piece);
    assert_eq!(outcome.lines_cleared, 4);
    assert!(grid.cells().iter().all(|c| c.is_none()));
}
