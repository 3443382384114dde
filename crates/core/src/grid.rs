//! Grid module - the W×H matrix of locked cells
//!
//! Each cell is either empty or holds the color token of the piece that locked
//! there. Uses a flat row-major vector sized once at construction; dimensions
//! never change afterwards.
//! Coordinates: (x, y) with x growing to the right and y growing downwards,
//! row 0 at the top.

use crate::types::{Cell, ColorToken};

/// Color used by [`Grid::from_ascii`] for pre-filled cells
pub const FILLER_COLOR: ColorToken = ColorToken::rgb(128, 128, 128);

/// Locked cells of one board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build a grid from text rows (top row first). `.` is empty, anything
    /// else is a locked cell with [`FILLER_COLOR`].
    ///
    /// Panics if the rows are ragged.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "ragged grid row {}", y);
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    grid.cells[y * width + x] = Some(FILLER_COLOR);
                }
            }
        }
        grid
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled. A zero-width row is never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).map_or(false, |row| {
            !row.is_empty() && row.iter().all(|cell| cell.is_some())
        })
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .map_or(false, |row| row.iter().all(|cell| cell.is_none()))
    }

    /// Cells of row `y`, or `None` past the bottom
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Remove row `y`, shift every row above it down by one and leave an empty
    /// row at the top.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let width = self.width;

        // copy_within handles the overlapping ranges
        if y > 0 {
            self.cells.copy_within(0..y * width, width);
        }
        self.cells[..width].fill(None);
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans from the bottom up; after a removal the same index is examined
    /// again because the row above has shifted into it.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Height of column `x` measured from the bottom (0 when empty)
    pub fn column_height(&self, x: usize) -> usize {
        (0..self.height)
            .find(|&y| self.cells[y * self.width + x].is_some())
            .map_or(0, |top| self.height - top)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Text rows, `#` for locked cells
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| if c.is_some() { '#' } else { '.' }).collect())
            .collect()
    }
}
