//! Grid coordinates: [`Position`].
//!
//! Positions are `(row, col)` pairs. Rows grow downwards and columns grow to
//! the right, so a position maps onto screen space as `(y, x)`.

use std::fmt;
use std::ops::{Add, Sub};

/// A 0-indexed cell coordinate on a [`Grid`](crate::Grid).
///
/// Ordering is row-major: rows are compared first, then columns. Search
/// frontiers rely on this order to break priority ties deterministically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Orthogonal steps in expansion order: up, down, left, right.
    pub const CARDINALS: [Position; 4] = [
        Position::new(-1, 0),
        Position::new(1, 0),
        Position::new(0, -1),
        Position::new(0, 1),
    ];

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours, in [`CARDINALS`](Self::CARDINALS) order.
    ///
    /// Neighbours may lie outside any particular grid.
    #[inline]
    pub fn neighbors_4(self) -> [Position; 4] {
        Self::CARDINALS.map(|d| self.shift(d.row, d.col))
    }

    /// Translate pointer coordinates in pixels into the cell under them.
    ///
    /// `x` selects the column and `y` the row. Returns `None` for a
    /// non-positive `cell_size` or negative coordinates. The result is not
    /// bounds-checked against any grid.
    pub fn from_pixel(x: i32, y: i32, cell_size: i32) -> Option<Self> {
        if cell_size <= 0 || x < 0 || y < 0 {
            return None;
        }
        Some(Self::new(y / cell_size, x / cell_size))
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}
