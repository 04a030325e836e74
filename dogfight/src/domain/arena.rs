// Fixed rectangular playfield. Bounds are the border cells themselves; the
// playable interior is strictly between them.

use crate::domain::errors::ArenaError;
use crate::domain::vector::{Cell, Vector};

// Smallest border-to-border distance that still leaves room to manoeuvre.
const MIN_ROWS: i64 = 6;
const MIN_COLS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub top: i64,
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
}

impl Arena {
    pub fn new(top: i64, left: i64, bottom: i64, right: i64) -> Result<Self, ArenaError> {
        if bottom - top < MIN_ROWS || right - left < MIN_COLS {
            return Err(ArenaError::TooSmall {
                rows: bottom - top,
                cols: right - left,
            });
        }
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    /// Insets the arena by `margin` cells from every terminal edge.
    pub fn from_terminal(rows: u16, cols: u16, margin: u16) -> Result<Self, ArenaError> {
        let margin = i64::from(margin);
        Self::new(
            margin,
            margin,
            i64::from(rows) - 1 - margin,
            i64::from(cols) - 1 - margin,
        )
    }

    /// Rows strictly inside the border; the distance a wrap translates by.
    pub fn height_span(&self) -> f64 {
        (self.bottom - self.top - 1) as f64
    }

    /// Columns strictly inside the border.
    pub fn width_span(&self) -> f64 {
        (self.right - self.left - 1) as f64
    }

    /// Returns `(touches_y, touches_x)` for a cell.
    pub fn touches(&self, cell: Cell) -> (bool, bool) {
        let touches_y = cell.row <= self.top || cell.row >= self.bottom;
        let touches_x = cell.col <= self.left || cell.col >= self.right;
        (touches_y, touches_x)
    }

    pub fn on_boundary(&self, cell: Cell) -> bool {
        let (y, x) = self.touches(cell);
        y || x
    }

    pub fn contains(&self, cell: Cell) -> bool {
        !self.on_boundary(cell)
    }

    /// Teleports each out-of-range axis by one span so the point re-enters
    /// from the opposite edge. Axes that are in range are left untouched.
    ///
    /// The fractional part is kept unless it would round back onto the far
    /// border (a half-cell tie), in which case the resolved cell is shifted.
    pub fn wrap(&self, coordinates: Vector) -> Vector {
        let cell = coordinates.resolve();
        Vector::new(
            wrap_axis(coordinates.y, cell.row, self.top, self.bottom, self.height_span()),
            wrap_axis(coordinates.x, cell.col, self.left, self.right, self.width_span()),
        )
    }
}

fn wrap_axis(value: f64, cell: i64, low: i64, high: i64, span: f64) -> f64 {
    let shift = if cell <= low {
        span
    } else if cell >= high {
        -span
    } else {
        return value;
    };

    let shifted = value + shift;
    let landed = shifted.round_ties_even() as i64;
    if landed <= low || landed >= high {
        cell as f64 + shift
    } else {
        shifted
    }
}
