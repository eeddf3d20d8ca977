//! The terrain grid.
//!
//! [`Grid`] owns a fixed-size matrix of [`TerrainKind`] values stored in a
//! flat row-major buffer, plus the designated start and end cells. Dimensions
//! are set once at construction; terrain can be rewritten freely afterwards.

use log::debug;

use crate::error::GridError;
use crate::geom::Position;
use crate::terrain::TerrainKind;

/// A rows × columns terrain matrix with optional start and end markers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    rows: i32,
    columns: i32,
    cells: Vec<TerrainKind>,
    start: Option<Position>,
    end: Option<Position>,
}

impl Grid {
    /// Create a grid with every cell [`Open`](TerrainKind::Open) and no
    /// endpoints set.
    pub fn new(rows: i32, columns: i32) -> Result<Self, GridError> {
        if rows <= 0 || columns <= 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![TerrainKind::Open; (rows as usize) * (columns as usize)],
            start: None,
            end: None,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.columns)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.columns
    }

    /// Flat row-major index of `pos`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.row as usize * self.columns as usize + pos.col as usize)
    }

    /// Inverse of [`index`](Self::index). The index is not range-checked.
    #[inline]
    pub fn position(&self, idx: usize) -> Position {
        let cols = self.columns as usize;
        Position::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Terrain at `pos`, or `None` if out of bounds.
    pub fn terrain(&self, pos: Position) -> Option<TerrainKind> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrite the terrain at `pos`.
    ///
    /// Out-of-bounds positions leave the grid untouched and return
    /// [`GridError::InvalidCoordinate`].
    pub fn set_terrain(&mut self, pos: Position, kind: TerrainKind) -> Result<(), GridError> {
        let Some(i) = self.index(pos) else {
            debug!("rejected terrain {kind:?} at {pos}: out of bounds");
            return Err(GridError::InvalidCoordinate {
                pos,
                rows: self.rows,
                columns: self.columns,
            });
        };
        self.cells[i] = kind;
        Ok(())
    }

    /// Reset the cell at `pos` to open terrain. Same bounds contract as
    /// [`set_terrain`](Self::set_terrain).
    pub fn clear_terrain(&mut self, pos: Position) -> Result<(), GridError> {
        self.set_terrain(pos, TerrainKind::Open)
    }

    /// True iff `pos` is in bounds and open.
    #[inline]
    pub fn is_traversable(&self, pos: Position) -> bool {
        self.terrain(pos).is_some_and(TerrainKind::is_open)
    }

    /// Record the start cell. No validation is performed here; callers that
    /// care about accessibility check [`is_traversable`](Self::is_traversable)
    /// first.
    pub fn set_start(&mut self, pos: Position) {
        self.start = Some(pos);
    }

    /// Record the end cell. Same contract as [`set_start`](Self::set_start).
    pub fn set_end(&mut self, pos: Position) {
        self.end = Some(pos);
    }

    /// The recorded start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// The recorded end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Forget both endpoints.
    pub fn clear_endpoints(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Set every cell to `kind`.
    pub fn fill(&mut self, kind: TerrainKind) {
        self.cells.fill(kind);
    }

    /// Count cells of the given kind.
    pub fn count(&self, kind: TerrainKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Iterate over `(Position, TerrainKind)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TerrainKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &kind)| (self.position(i), kind))
    }
}

/// Unchecked wire form of [`Grid`]. Deserialized grids are validated
/// through [`TryFrom`] before use.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    rows: i32,
    columns: i32,
    cells: Vec<TerrainKind>,
    start: Option<Position>,
    end: Option<Position>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let mut grid = Grid::new(repr.rows, repr.columns)?;
        if repr.cells.len() != grid.len() {
            return Err(GridError::CellCountMismatch {
                expected: grid.len(),
                found: repr.cells.len(),
            });
        }
        for pos in repr.start.into_iter().chain(repr.end) {
            if !grid.contains(pos) {
                return Err(GridError::InvalidCoordinate {
                    pos,
                    rows: grid.rows,
                    columns: grid.columns,
                });
            }
        }
        grid.cells = repr.cells;
        grid.start = repr.start;
        grid.end = repr.end;
        Ok(grid)
    }
}
