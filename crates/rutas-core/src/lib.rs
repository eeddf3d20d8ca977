//! **rutas-core**: terrain model for grid route planning.
//!
//! This crate provides the types shared across the *rutas* workspace:
//! grid coordinates, terrain kinds, the obstacle [`Grid`] with its start and
//! end markers, and an ASCII layout format for loading and printing grids.
//!
//! A grid is owned by one phase at a time (obstacle editing, endpoint
//! selection, search) and mutated through `&mut` access only.

pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;
pub mod terrain;

pub use error::GridError;
pub use geom::Position;
pub use grid::Grid;
pub use layout::{END_GLYPH, LayoutError, START_GLYPH};
pub use terrain::TerrainKind;
