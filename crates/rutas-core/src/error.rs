use std::fmt;

use crate::geom::Position;

/// Errors raised by [`Grid`](crate::Grid) construction and terrain mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A mutation targeted a cell outside the grid. The grid is unchanged.
    InvalidCoordinate {
        pos: Position,
        rows: i32,
        columns: i32,
    },
    /// The grid was asked to have zero or negative rows or columns.
    InvalidDimensions { rows: i32, columns: i32 },
    /// A stored terrain buffer does not hold exactly one cell per position.
    CellCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { pos, rows, columns } => {
                write!(f, "invalid coordinate {pos} for a {rows}x{columns} grid")
            }
            Self::InvalidDimensions { rows, columns } => {
                write!(f, "invalid grid dimensions {rows}x{columns}: both must be positive")
            }
            Self::CellCountMismatch { expected, found } => {
                write!(f, "terrain buffer has {found} cells, grid needs {expected} cells")
            }
        }
    }
}

impl std::error::Error for GridError {}
