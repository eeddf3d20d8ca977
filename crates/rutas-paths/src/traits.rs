use rutas_core::{Grid, Position};

use crate::distance::manhattan;

/// Minimal search interface: a bounded rectangle of cells plus neighbour
/// enumeration. Every step between neighbours costs 1.
pub trait Pather {
    /// `(rows, columns)` of the searchable area. Positions outside it are
    /// never visited.
    fn dimensions(&self) -> (i32, i32);

    /// Append the cells reachable in one step from `p` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>);

    /// Flat row-major index of `p`, or `None` if outside
    /// [`dimensions`](Self::dimensions).
    #[inline]
    fn index(&self, p: Position) -> Option<usize> {
        let (rows, cols) = self.dimensions();
        if p.row < 0 || p.col < 0 || p.row >= rows || p.col >= cols {
            return None;
        }
        Some(p.row as usize * cols as usize + p.col as usize)
    }

    /// Number of cells in the searchable area.
    #[inline]
    fn area(&self) -> usize {
        let (rows, cols) = self.dimensions();
        (rows.max(0) as usize) * (cols.max(0) as usize)
    }
}

/// Pather with an admissible heuristic for A*.
pub trait AstarPather: Pather {
    /// Estimate of the steps left from `from` to `to`. Must never overestimate.
    fn estimate(&self, from: Position, to: Position) -> i32;
}

impl Pather for Grid {
    fn dimensions(&self) -> (i32, i32) {
        Grid::dimensions(self)
    }

    fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_traversable(n)));
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Position, to: Position) -> i32 {
        manhattan(from, to)
    }
}
