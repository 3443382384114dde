//! Piece catalog - canonical shape matrices and the generic clockwise rotation
//!
//! A shape is a small rectangular boolean matrix (row 0 at the top). The seven
//! canonical matrices are 4x4 (I), 2x2 (O) and 3x3 (the rest); rotation works
//! on any rectangle, so no per-kind rotation tables are needed.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest matrix area a shape may have (4x4)
pub const MAX_SHAPE_AREA: usize = 16;

/// One orientation of a piece, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: ArrayVec<bool, MAX_SHAPE_AREA>,
}

impl Shape {
    /// Build a shape from text rows, `#` marks an occupied cell.
    ///
    /// Panics if the rows are ragged or the area exceeds [`MAX_SHAPE_AREA`].
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        assert!(
            rows.iter().all(|r| r.chars().count() == width),
            "shape rows must all have the same width"
        );
        assert!(width * height <= MAX_SHAPE_AREA, "shape too large");

        let mut cells = ArrayVec::new();
        for row in rows {
            for ch in row.chars() {
                cells.push(ch == '#');
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (`col`, `row`) is occupied; false when out of range
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.cells[row * self.width + col]
    }

    /// Occupied cells as (col, row) offsets from the top-left corner
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }

    /// Leftmost and rightmost occupied column, or `None` for an empty matrix
    pub fn column_bounds(&self) -> Option<(i32, i32)> {
        self.occupied().fold(None, |acc, (col, _)| match acc {
            None => Some((col, col)),
            Some((lo, hi)) => Some((lo.min(col), hi.max(col))),
        })
    }

    /// Text rows, the inverse of [`Shape::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| if self.is_filled(col, row) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

fn canonical_rows(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &["....", "####", "....", "...."],
        PieceKind::O => &["##", "##"],
        PieceKind::T => &[".#.", "###", "..."],
        PieceKind::S => &[".##", "##.", "..."],
        PieceKind::Z => &["##.", ".##", "..."],
        PieceKind::J => &["#..", "###", "..."],
        PieceKind::L => &["..#", "###", "..."],
    }
}

/// Fresh copy of the canonical (spawn) matrix for a piece kind
pub fn shape_for(kind: PieceKind) -> Shape {
    Shape::from_rows(canonical_rows(kind))
}

/// Rotate a matrix 90° clockwise.
///
/// `out[r][c] = in[h-1-c][r]`; a `w`×`h` input becomes `h`×`w`.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let (w, h) = (shape.width, shape.height);
    let mut cells = ArrayVec::new();
    for r in 0..w {
        for c in 0..h {
            cells.push(shape.cells[(h - 1 - c) * w + r]);
        }
    }
    Shape {
        width: h,
        height: w,
        cells,
    }
}
