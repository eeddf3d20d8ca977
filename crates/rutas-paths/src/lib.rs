//! Shortest-path search on rutas terrain grids.
//!
//! - **A\*** with the Manhattan heuristic ([`PathFinder`], [`find_path`])
//! - **BFS** unweighted distance maps ([`bfs_map`], [`bfs_distance`]), used as
//!   the reference for optimal path lengths
//!
//! Movement is orthogonal only and every step costs 1. A cell can be entered
//! iff it is inside the grid and [`Open`](rutas_core::TerrainKind::Open).
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`AstarPather`] : [`Pather`] | A* |
//!
//! [`Grid`](rutas_core::Grid) implements both.

mod astar;
mod bfs;
mod distance;
mod frontier;
mod path;
mod traits;

pub use astar::{PathFinder, find_path};
pub use bfs::{bfs_distance, bfs_map};
pub use distance::manhattan;
pub use frontier::SearchStats;
pub use path::{is_connected, path_steps};
pub use traits::{AstarPather, Pather};
