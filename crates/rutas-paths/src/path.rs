use rutas_core::Position;

/// Number of moves in a path: one less than its number of cells.
#[inline]
pub fn path_steps(path: &[Position]) -> usize {
    path.len().saturating_sub(1)
}

/// Whether each consecutive pair of cells is one orthogonal step apart.
pub fn is_connected(path: &[Position]) -> bool {
    path.windows(2).all(|w| w[0].is_adjacent(w[1]))
}
