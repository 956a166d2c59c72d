//! Hangboard grid description parsing.
//!
//! A board is described as plain text: one line per row of holds, holds
//! separated by runs of whitespace. Each token becomes one [`Cell`] whose
//! width is proportional to the token's character count within its row. Every
//! input line gets the same share of the board height, even when it holds no
//! tokens at all.

use tracing::debug;

/// One hold on the board, in normalized `[0, 1]` board space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Cell {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixel rectangle `[x, y, w, h]` for this cell when the board is stretched
    /// to `scale_x` x `scale_y` pixels, inset by `px`/`py` on each side.
    pub fn scaled_size(&self, scale_x: f64, scale_y: f64, px: f64, py: f64) -> [f64; 4] {
        [
            self.x * scale_x + px,
            self.y * scale_y + py,
            self.width * scale_x - 2.0 * px,
            self.height * scale_y - 2.0 * py,
        ]
    }

    /// Pixel centre of the (un-inset) cell.
    pub fn scaled_center(&self, scale_x: f64, scale_y: f64) -> (f64, f64) {
        (
            (self.x + self.width / 2.0) * scale_x,
            (self.y + self.height / 2.0) * scale_y,
        )
    }
}

/// Ordered set of cells parsed from one grid description. Cells are addressed
/// by index only; a re-parse produces a brand new board.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    cells: Vec<Cell>,
    rows: usize,
}

impl Board {
    /// Parse a grid description. Never fails: malformed text just yields fewer
    /// cells.
    pub fn parse(text: &str) -> Self {
        // `split('\n')` always yields at least one row, so the empty string is a
        // single empty row.
        let rows: Vec<&str> = text.split('\n').collect();
        let height = 1.0 / rows.len() as f64;
        let mut cells = Vec::new();
        let mut y = 0.0;
        for row in &rows {
            let tokens: Vec<usize> = row
                .split_whitespace()
                .map(|t| t.chars().count())
                .collect();
            let total: usize = tokens.iter().sum();
            let mut x = 0.0;
            for len in tokens {
                let width = len as f64 / total as f64;
                cells.push(Cell::new(x, y, width, height));
                x += width;
            }
            y += height;
        }
        debug!(rows = rows.len(), cells = cells.len(), "parsed hangboard grid");
        Self {
            cells,
            rows: rows.len(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Number of cells (holds) on the board.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of input rows, including rows that produced no cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
