//! Scoring module - points for a line clear
//!
//! A clear of `k` rows on a board `W` cells wide is worth `W * k` points.
//! Clearing exactly [`SQUARED_CLEAR_ROWS`] rows in one go squares that value.

use crate::types::SQUARED_CLEAR_ROWS;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Number of rows removed.
    pub rows: u32,
    /// Points awarded for the removal.
    pub points: u32,
}

impl LineClear {
    pub fn new(width: u32, rows: u32) -> Self {
        Self {
            rows,
            points: calculate_line_score(width, rows),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Calculate line clear score
/// width: board width in cells
/// rows: number of rows cleared at once
pub fn calculate_line_score(width: u32, rows: u32) -> u32 {
    let points = width.saturating_mul(rows);
    if rows == SQUARED_CLEAR_ROWS {
        points.saturating_mul(points)
    } else {
        points
    }
}
