use rutas_core::Position;

/// Manhattan (L1) distance between two positions.
///
/// This is the exact step count between `a` and `b` on an obstacle-free grid
/// with orthogonal moves, and a lower bound on it everywhere else.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
