//! ASCII layouts for grids.
//!
//! A layout is one line per row and one glyph per column:
//!
//! ```text
//! S..#
//! .~~.
//! ..oE
//! ```
//!
//! Terrain glyphs are those of [`TerrainKind::glyph`]. `S` and `E` mark the
//! start and end cells, which are open terrain underneath. Blank lines before
//! and after the map and whitespace around each line are ignored.

use std::fmt;

use crate::error::GridError;
use crate::geom::Position;
use crate::grid::Grid;
use crate::terrain::TerrainKind;

/// Glyph marking the start cell.
pub const START_GLYPH: char = 'S';
/// Glyph marking the end cell.
pub const END_GLYPH: char = 'E';

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout has no rows.
    Empty,
    /// A row is not as wide as the first one. `line` is 0-based.
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is neither terrain nor a marker.
    InvalidGlyph { ch: char, pos: Position },
    /// `S` or `E` appears more than once.
    DuplicateMarker { ch: char, pos: Position },
    /// The parsed size was rejected by [`Grid::new`].
    Grid(GridError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: no rows"),
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "layout contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "layout: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
            Self::Grid(e) => write!(f, "layout: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LayoutError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl Grid {
    /// Build a grid from an ASCII layout.
    pub fn from_layout(s: &str) -> Result<Self, LayoutError> {
        let lines: Vec<Vec<char>> = s
            .trim()
            .lines()
            .map(|l| l.trim().chars().collect())
            .collect();
        let width = match lines.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LayoutError::Empty),
        };
        for (line, row) in lines.iter().enumerate() {
            if row.len() != width {
                return Err(LayoutError::Ragged {
                    line,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut grid = Grid::new(lines.len() as i32, width as i32)?;
        for (r, row) in lines.iter().enumerate() {
            for (c, &ch) in row.iter().enumerate() {
                let pos = Position::new(r as i32, c as i32);
                match ch {
                    START_GLYPH => {
                        if grid.start().is_some() {
                            return Err(LayoutError::DuplicateMarker { ch, pos });
                        }
                        grid.set_start(pos);
                    }
                    END_GLYPH => {
                        if grid.end().is_some() {
                            return Err(LayoutError::DuplicateMarker { ch, pos });
                        }
                        grid.set_end(pos);
                    }
                    _ => {
                        let kind = TerrainKind::from_glyph(ch)
                            .ok_or(LayoutError::InvalidGlyph { ch, pos })?;
                        grid.set_terrain(pos, kind)?;
                    }
                }
            }
        }
        Ok(grid)
    }

    /// Glyph drawn for a single cell.
    ///
    /// Obstacles are drawn over endpoint markers, so an endpoint recorded on
    /// an obstacle shows the obstacle. Start wins over end when both are
    /// the same open cell.
    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        let kind = self.terrain(pos)?;
        if !kind.is_open() {
            return Some(kind.glyph());
        }
        if self.start() == Some(pos) {
            Some(START_GLYPH)
        } else if self.end() == Some(pos) {
            Some(END_GLYPH)
        } else {
            Some(kind.glyph())
        }
    }

    /// Write the grid back out as a layout, one `\n`-terminated line per row.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.len() + self.rows() as usize);
        for r in 0..self.rows() {
            for c in 0..self.columns() {
                if let Some(ch) = self.glyph_at(Position::new(r, c)) {
                    out.push(ch);
                }
            }
            out.push('\n');
        }
        out
    }
}
