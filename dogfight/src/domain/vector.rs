// 2D vector math shared by every moving thing in the arena.
//
// Axis convention follows screen rows/columns: `y` is the row (forward/back,
// driven by cosine) and `x` is the column (left/right, driven by sine).

use std::ops::{Add, AddAssign, Mul, Sub};

// Decimal places kept when resolving an angle into a direction.
const DIRECTION_PRECISION: i32 = 5;

/// Continuous position or direction in arena space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub y: f64,
    pub x: f64,
}

/// Integer terminal cell (row, column) a vector resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i64,
    pub col: i64,
}

impl Vector {
    pub const fn new(y: f64, x: f64) -> Self {
        Self { y, x }
    }

    /// Rounds both components to the nearest cell (ties to even).
    pub fn resolve(self) -> Cell {
        Cell {
            row: self.y.round_ties_even() as i64,
            col: self.x.round_ties_even() as i64,
        }
    }

    /// Component-wise rounding that stays in vector space.
    pub fn rounded(self) -> Vector {
        Vector::new(self.y.round_ties_even(), self.x.round_ties_even())
    }
}

impl Cell {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl From<Cell> for Vector {
    fn from(cell: Cell) -> Self {
        Vector::new(cell.row as f64, cell.col as f64)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.y + other.y, self.x + other.x)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Vector) {
        self.y += other.y;
        self.x += other.x;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.y - other.y, self.x - other.x)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector::new(self.y * scalar, self.x * scalar)
    }
}

impl Mul for Vector {
    type Output = Vector;

    fn mul(self, other: Vector) -> Vector {
        Vector::new(self.y * other.y, self.x * other.x)
    }
}

/// Converts an angle (radians) into a unit step: `(round(cos, 5), round(sin, 5))`.
pub fn resolve_direction(angle: f64) -> Vector {
    Vector::new(
        round_to(angle.cos(), DIRECTION_PRECISION),
        round_to(angle.sin(), DIRECTION_PRECISION),
    )
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
