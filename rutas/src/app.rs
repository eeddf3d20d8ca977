//! One run of the route planner: build the grid, edit it, pick the
//! endpoints, search once, report.

use std::fmt;
use std::fs;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rutas_core::{Grid, GridError, LayoutError, Position, TerrainKind};
use rutas_gen::MapGen;
use rutas_paths::{PathFinder, SearchStats, bfs_distance, path_steps};

use crate::cli::Args;
use crate::config::Config;
use crate::editor::{Editor, ScriptError, parse_script};
use crate::render::{render, summary};

/// Anything that stops a run before a search result exists.
#[derive(Debug)]
pub enum AppError {
    Io { path: String, source: std::io::Error },
    Layout(LayoutError),
    Grid(GridError),
    Script(ScriptError),
    /// Neither the map, the script nor the command line chose both endpoints.
    MissingEndpoints,
    /// A command-line endpoint lies outside the grid.
    EndpointOutOfBounds(Position),
    /// `--verify` found a route whose length disagrees with BFS.
    VerifyMismatch {
        astar: Option<usize>,
        bfs: Option<i32>,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{path}: {source}"),
            Self::Layout(e) => write!(f, "{e}"),
            Self::Grid(e) => write!(f, "{e}"),
            Self::Script(e) => write!(f, "{e}"),
            Self::MissingEndpoints => write!(f, "start and end cells were not selected"),
            Self::EndpointOutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
            Self::VerifyMismatch { astar, bfs } => write!(
                f,
                "verification failed: A* found {astar:?} steps, breadth-first search {bfs:?}"
            ),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Layout(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Script(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayoutError> for AppError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<GridError> for AppError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ScriptError> for AppError {
    fn from(e: ScriptError) -> Self {
        Self::Script(e)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct Report {
    pub grid: Grid,
    pub start: Position,
    pub end: Position,
    pub path: Option<Vec<Position>>,
    pub stats: SearchStats,
}

impl Report {
    /// The map with the route drawn on it, followed by a summary line.
    pub fn to_text(&self) -> String {
        let mut out = render(&self.grid, self.path.as_deref());
        out.push_str(&summary(self.start, self.end, self.path.as_deref()));
        out.push('\n');
        out
    }
}

/// Where a run gets its inputs from, already loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub map: Option<String>,
    pub script: Option<String>,
    pub start: Option<Position>,
    pub end: Option<Position>,
    pub verify: bool,
}

impl Inputs {
    /// Read the files named on the command line.
    pub fn load(args: &Args) -> Result<Self, AppError> {
        let read = |path: &String| {
            fs::read_to_string(path).map_err(|source| AppError::Io {
                path: path.clone(),
                source,
            })
        };
        Ok(Self {
            map: args.map_path.as_ref().map(read).transpose()?,
            script: args.script_path.as_ref().map(read).transpose()?,
            start: args.start,
            end: args.end,
            verify: args.verify,
        })
    }
}

/// Build the starting grid: the given layout, or a generated one.
pub fn build_grid(map: Option<&str>, config: &Config) -> Result<Grid, AppError> {
    if let Some(text) = map {
        let grid = Grid::from_layout(text)?;
        info!("Loaded {}x{} map", grid.rows(), grid.columns());
        return Ok(grid);
    }

    let grid = Grid::new(config.rows, config.columns)?;
    if config.obstacle_density <= 0.0 && config.lakes == 0 {
        return Ok(grid);
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "Generating {}x{} map (seed {seed}, density {})",
        config.rows, config.columns, config.obstacle_density
    );
    let mut mg = MapGen::with_grid(grid, StdRng::seed_from_u64(seed));
    for _ in 0..config.lakes {
        if let Some(origin) = mg.random_open_position() {
            mg.random_walk_blob(TerrainKind::Water, origin, config.lake_size, &[]);
        }
    }
    mg.scatter(config.obstacle_density, &TerrainKind::OBSTACLES, &[]);
    Ok(mg.into_grid())
}

/// Run editing, endpoint selection and the one search.
///
/// Endpoints given on the command line win over script clicks, which win
/// over `S`/`E` markers in the map.
pub fn run(inputs: &Inputs, config: &Config) -> Result<Report, AppError> {
    let mut grid = build_grid(inputs.map.as_deref(), config)?;

    if let Some(script) = inputs.script.as_deref() {
        let cmds = parse_script(script)?;
        let mut editor = Editor::new(grid, config.cell_size);
        let applied = editor.apply_all(&cmds);
        debug!(
            "applied {applied} of {} edit commands, ended in {:?}",
            cmds.len(),
            editor.phase()
        );
        grid = editor.into_grid();
    }

    let start = inputs.start.or(grid.start());
    let end = inputs.end.or(grid.end());
    let (Some(start), Some(end)) = (start, end) else {
        return Err(AppError::MissingEndpoints);
    };
    for p in [start, end] {
        if !grid.contains(p) {
            return Err(AppError::EndpointOutOfBounds(p));
        }
    }

    let mut finder = PathFinder::new();
    let path = finder.find_path(&mut grid, start, end);
    let stats = finder.stats();
    match &path {
        Some(p) => info!("Route {start} -> {end}: {} steps", path_steps(p)),
        None => info!("Route {start} -> {end}: no path"),
    }

    if inputs.verify {
        let bfs = bfs_distance(&grid, start, end);
        let astar = path.as_deref().map(path_steps);
        if astar.map(|s| s as i32) != bfs {
            return Err(AppError::VerifyMismatch { astar, bfs });
        }
        info!("Verified against breadth-first search");
    }

    Ok(Report {
        grid,
        start,
        end,
        path,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(map: &str) -> Inputs {
        Inputs {
            map: Some(map.to_string()),
            ..Inputs::default()
        }
    }

    #[test]
    fn map_markers_drive_the_search() {
        let report = run(&inputs("S..\n.#.\n..E\n"), &Config::default()).unwrap();
        assert_eq!(report.path.as_ref().map(|p| path_steps(p)), Some(4));
        assert!(report.to_text().ends_with("4 steps\n"));
    }

    #[test]
    fn no_path_is_a_normal_result() {
        let mut i = inputs("S#.\n##.\n..E\n");
        i.verify = true;
        let report = run(&i, &Config::default()).unwrap();
        assert_eq!(report.path, None);
        assert!(report.to_text().ends_with("no path\n"));
        assert_eq!(report.grid.start(), Some(Position::new(0, 0)));
    }

    #[test]
    fn script_edits_and_selects() {
        let i = Inputs {
            script: Some(
                "place 60 0 building\nplace 60 60 building\ndone\nclick 0 0\nclick 60 120\n"
                    .to_string(),
            ),
            verify: true,
            ..Inputs::default()
        };
        let config = Config {
            rows: 3,
            columns: 3,
            ..Config::default()
        };
        let report = run(&i, &config).unwrap();
        assert_eq!(report.start, Position::new(0, 0));
        assert_eq!(report.end, Position::new(2, 1));
        let path = report.path.unwrap();
        assert_eq!(path_steps(&path), 3);
        assert!(!path.contains(&Position::new(1, 1)));
    }

    #[test]
    fn command_line_endpoints_override_markers() {
        let mut i = inputs("S...\n....\n...E\n");
        i.start = Some(Position::new(2, 0));
        i.end = Some(Position::new(2, 1));
        let report = run(&i, &Config::default()).unwrap();
        assert_eq!(report.path.map(|p| p.len()), Some(2));
        // the search stamps the endpoints it used
        assert_eq!(report.grid.start(), Some(Position::new(2, 0)));

        i.end = Some(Position::new(9, 9));
        assert!(matches!(
            run(&i, &Config::default()),
            Err(AppError::EndpointOutOfBounds(_))
        ));
    }

    #[test]
    fn missing_endpoints_and_bad_input() {
        assert!(matches!(
            run(&inputs("...\n...\n"), &Config::default()),
            Err(AppError::MissingEndpoints)
        ));
        assert!(matches!(
            run(&inputs("S.x\n"), &Config::default()),
            Err(AppError::Layout(_))
        ));
        let config = Config {
            rows: 0,
            ..Config::default()
        };
        assert!(matches!(
            run(&Inputs::default(), &config),
            Err(AppError::Grid(GridError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn bundled_samples_run() {
        let mut i = inputs(include_str!("../maps/barrio.txt"));
        i.verify = true;
        let report = run(&i, &Config::default()).unwrap();
        assert_eq!(report.grid.dimensions(), (10, 10));
        assert!(report.path.is_some());

        let i = Inputs {
            script: Some(include_str!("../maps/edits.txt").to_string()),
            verify: true,
            ..Inputs::default()
        };
        let report = run(&i, &Config::default()).unwrap();
        assert_eq!(report.grid.terrain(Position::new(5, 5)), Some(TerrainKind::Water));
        assert_eq!(report.grid.terrain(Position::new(5, 6)), Some(TerrainKind::Building));
        assert!(report.grid.is_traversable(Position::new(6, 5)));
        assert_eq!((report.start, report.end), (Position::new(0, 0), Position::new(9, 9)));
        assert_eq!(report.path.map(|p| path_steps(&p)), Some(18));
    }

    #[test]
    fn generated_grid_is_reproducible() {
        let config = Config {
            rows: 12,
            columns: 12,
            obstacle_density: 0.3,
            lakes: 2,
            seed: Some(42),
            ..Config::default()
        };
        let a = build_grid(None, &config).unwrap();
        let b = build_grid(None, &config).unwrap();
        assert_eq!(a, b);
        assert!(a.count(TerrainKind::Open) <= 12 * 12 - 43);
    }
}
