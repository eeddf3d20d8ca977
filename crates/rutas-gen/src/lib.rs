//! Random obstacle generation for rutas grids.
//!
//! Provides two generators:
//! - **Scatter**: turns randomly chosen open cells into obstacles until a
//!   target share of the grid is blocked.
//! - **Random-walk blob**: paints a connected clump of one terrain kind by
//!   walking in random orthogonal steps, for lakes and city blocks.

mod mapgen;

pub use mapgen::MapGen;
