//! Headless route planner built on the rutas crates.
//!
//! A run loads or generates a grid, replays an obstacle-editing script,
//! picks the endpoints, searches once and prints the map with the route.

pub mod app;
pub mod cli;
pub mod config;
pub mod editor;
pub mod render;
