//! Heuristic placement planner
//!
//! Tries every distinct rotation of the active piece at every column where it
//! fits, drops it straight down on a scratch copy of the grid, and scores the
//! resulting surface. The board itself is never touched.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::lock::lock_piece;
use crate::movement::would_collide;
use crate::piece::ActivePiece;
use crate::shape::rotate_clockwise;
use crate::types::{MoveTarget, PieceKind};

/// Linear weights applied to [`GridFeatures`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerWeights {
    pub lines: i32,
    pub height: i32,
    pub holes: i32,
    pub bumpiness: i32,
}

impl Default for PlannerWeights {
    fn default() -> Self {
        Self {
            lines: 1000,
            height: -10,
            holes: -50,
            bumpiness: -5,
        }
    }
}

/// Surface features of a grid after a candidate has been stamped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridFeatures {
    /// Rows with every cell occupied
    pub full_rows: u32,
    /// Tallest column height
    pub max_height: u32,
    /// Empty cells with at least one occupied cell above them in the same column
    pub holes: u32,
    /// Sum of absolute height differences between neighbouring columns
    pub bumpiness: u32,
}

impl GridFeatures {
    pub fn measure(grid: &Grid) -> Self {
        let mut features = GridFeatures {
            full_rows: (0..grid.height()).filter(|&y| grid.is_row_full(y)).count() as u32,
            ..Self::default()
        };

        let mut prev_height: Option<u32> = None;
        for x in 0..grid.width() as i32 {
            let mut height = 0u32;
            let mut seen_top = false;
            for y in 0..grid.height() as i32 {
                if grid.is_occupied(x, y) {
                    if !seen_top {
                        seen_top = true;
                        height = (grid.height() as i32 - y) as u32;
                    }
                } else if seen_top {
                    features.holes += 1;
                }
            }
            features.max_height = features.max_height.max(height);
            if let Some(prev) = prev_height {
                features.bumpiness += prev.abs_diff(height);
            }
            prev_height = Some(height);
        }

        features
    }

    pub fn score(&self, weights: &PlannerWeights) -> i64 {
        weights.lines as i64 * self.full_rows as i64
            + weights.height as i64 * self.max_height as i64
            + weights.holes as i64 * self.holes as i64
            + weights.bumpiness as i64 * self.bumpiness as i64
    }
}

/// Best placement for `piece` on `grid`, or `None` if the piece fits nowhere
/// at the top row.
///
/// Rotations are counted from the piece's current shape. Ties keep the first
/// candidate found (rotation ascending, then x ascending).
pub fn plan_best_placement(
    grid: &Grid,
    piece: &ActivePiece,
    weights: &PlannerWeights,
) -> Option<MoveTarget> {
    let rotations = if piece.kind == PieceKind::O { 1 } else { 4 };
    let width = grid.width() as i32;

    let mut scratch = grid.clone();
    let mut candidate = piece.clone();
    let mut best: Option<(i64, MoveTarget)> = None;

    for rotation in 0..rotations {
        if rotation > 0 {
            candidate.shape = rotate_clockwise(&candidate.shape);
        }
        let Some((min_c, max_c)) = candidate.shape.column_bounds() else {
            continue;
        };

        for x in -min_c..=(width - 1 - max_c) {
            candidate.x = x;
            candidate.y = 0;
            if would_collide(&candidate, grid) {
                continue;
            }
            while !would_collide(&candidate, grid) {
                candidate.y += 1;
            }
            candidate.y -= 1;

            scratch.clone_from(grid);
            lock_piece(&mut scratch, &candidate);
            let score = GridFeatures::measure(&scratch).score(weights);

            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, MoveTarget { x, rotation }));
            }
        }
    }

    best.map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_of_empty_grid() {
        assert_eq!(GridFeatures::measure(&Grid::new(10, 20)), GridFeatures::default());
    }

    #[test]
    fn features_count_holes_and_bumps() {
        let grid = Grid::from_ascii(&[
            "....",
            ".#..",
            "....",
            "##.#",
        ]);
        let f = GridFeatures::measure(&grid);
        assert_eq!(f.full_rows, 0);
        assert_eq!(f.max_height, 3);
        // column 1 has one covered cell
        assert_eq!(f.holes, 1);
        // heights 1, 3, 0, 1
        assert_eq!(f.bumpiness, 2 + 3 + 1);
    }

    #[test]
    fn score_is_linear() {
        let f = GridFeatures {
            full_rows: 2,
            max_height: 5,
            holes: 1,
            bumpiness: 3,
        };
        assert_eq!(f.score(&PlannerWeights::default()), 2000 - 50 - 50 - 15);
    }

    #[test]
    fn empty_grid_lays_i_flat() {
        let grid = Grid::new(10, 20);
        let piece = ActivePiece::new(PieceKind::I, 3, 0);
        let target = plan_best_placement(&grid, &piece, &PlannerWeights::default());
        assert_eq!(target, Some(MoveTarget { x: 0, rotation: 0 }));
    }

    #[test]
    fn i_fills_the_single_gap() {
        let mut rows = vec![".........."; 19];
        rows.push("#####.####");
        let grid = Grid::from_ascii(&rows);
        let piece = ActivePiece::new(PieceKind::I, 3, 0);

        let target = plan_best_placement(&grid, &piece, &PlannerWeights::default()).unwrap();
        // vertical I occupies matrix column 2, so its left edge sits at 3
        assert_eq!(target, MoveTarget { x: 3, rotation: 1 });
    }

    #[test]
    fn o_piece_only_tries_one_rotation() {
        let grid = Grid::new(6, 6);
        let piece = ActivePiece::new(PieceKind::O, 0, 0);
        let target = plan_best_placement(&grid, &piece, &PlannerWeights::default()).unwrap();
        assert_eq!(target.rotation, 0);
    }

    #[test]
    fn no_placement_when_the_top_is_blocked() {
        let grid = Grid::from_ascii(&["####", "####", "....", "...."]);
        let piece = ActivePiece::new(PieceKind::T, 0, 0);
        assert_eq!(plan_best_placement(&grid, &piece, &PlannerWeights::default()), None);
    }

    #[test]
    fn planning_does_not_touch_the_grid() {
        let grid = Grid::from_ascii(&["......", "......", "......", "##..##"]);
        let before = grid.clone();
        let piece = ActivePiece::new(PieceKind::S, 2, 0);
        plan_best_placement(&grid, &piece, &PlannerWeights::default());
        assert_eq!(grid, before);
    }

    #[test]
    fn rotation_counts_from_current_shape() {
        // From a vertical I, odd turn counts lay it flat
        let grid = Grid::new(10, 20);
        let mut piece = ActivePiece::new(PieceKind::I, 3, 0);
        piece.shape = rotate_clockwise(&piece.shape);
        let target = plan_best_placement(&grid, &piece, &PlannerWeights::default()).unwrap();
        assert_eq!(target.rotation % 2, 1);
    }
}
