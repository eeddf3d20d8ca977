//! Text rendering of a grid with a route overlay.

use rutas_core::{Grid, Position};
use rutas_paths::path_steps;

/// Glyph for route cells not covered by a marker or obstacle.
pub const PATH_GLYPH: char = '*';

/// Draw `grid` as its layout, with the cells of `path` shown as
/// [`PATH_GLYPH`]. Start and end markers stay visible on top of the route.
pub fn render(grid: &Grid, path: Option<&[Position]>) -> String {
    let path = path.unwrap_or(&[]);
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for r in 0..grid.rows() {
        for c in 0..grid.columns() {
            let p = Position::new(r, c);
            let marked = grid.start() == Some(p) || grid.end() == Some(p);
            let ch = if !marked && grid.is_traversable(p) && path.contains(&p) {
                Some(PATH_GLYPH)
            } else {
                grid.glyph_at(p)
            };
            out.extend(ch);
        }
        out.push('\n');
    }
    out
}

/// One-line description of a search result.
pub fn summary(start: Position, end: Position, path: Option<&[Position]>) -> String {
    match path {
        Some(p) => format!("route {start} -> {end}: {} steps", path_steps(p)),
        None => format!("route {start} -> {end}: no path"),
    }
}
