//! Runtime configuration, read from TOML.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "rutas.toml";

/// Settings for generated maps and pointer translation.
///
/// Every field is optional in the file; missing ones take the
/// [`Default`] value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows of a generated grid (ignored when a map file is given).
    pub rows: i32,
    /// Columns of a generated grid (ignored when a map file is given).
    pub columns: i32,
    /// Pixel size of one cell, for edit-script coordinates.
    pub cell_size: i32,
    /// Share of a generated grid to cover with scattered obstacles.
    pub obstacle_density: f64,
    /// Number of random-walk water blobs on a generated grid.
    pub lakes: usize,
    /// Steps per lake walk.
    pub lake_size: usize,
    /// RNG seed for generated grids. Random when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            cell_size: 60,
            obstacle_density: 0.0,
            lakes: 0,
            lake_size: 12,
            seed: None,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, or
    /// fall back to defaults. Read and parse failures are logged and fall
    /// back to defaults as well.
    pub fn load(path: Option<&str>) -> Self {
        match path {
            Some(path) => match fs::read_to_string(path) {
                Ok(contents) => match Self::from_toml(&contents) {
                    Ok(cfg) => {
                        info!("Loaded config from {}", path);
                        cfg
                    }
                    Err(e) => {
                        warn!("Failed to parse config {}: {}", path, e);
                        Config::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read config {}: {}", path, e);
                    Config::default()
                }
            },
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    return Self::load(Some(DEFAULT_CONFIG_FILE));
                }
                Config::default()
            }
        }
    }
}
