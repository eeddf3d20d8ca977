//! Headless obstacle editor and endpoint picker.
//!
//! The editor goes through three phases in order: obstacles are placed
//! and erased, then two clicks pick the start and end, then the grid is
//! handed over for searching. Input arrives as [`EditCommand`]s carrying
//! pointer coordinates in pixels, which are translated to cells with
//! [`Position::from_pixel`].

use std::fmt;

use log::{debug, warn};
use rutas_core::{Grid, Position, TerrainKind};

/// Where the editor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    EditingObstacles,
    SelectingEndpoints,
    Done,
}

/// One user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Put an obstacle under the pointer.
    Place { x: i32, y: i32, kind: TerrainKind },
    /// Reset the cell under the pointer to open terrain.
    Erase { x: i32, y: i32 },
    /// Leave obstacle editing.
    FinishEditing,
    /// Pick an endpoint under the pointer.
    Click { x: i32, y: i32 },
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The grid or phase changed.
    Applied,
    /// The command targeted a cell it may not touch.
    Vetoed,
    /// The command has no meaning in the current phase.
    Ignored,
}

/// A malformed line in an edit script. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

impl EditCommand {
    /// Parse one script line.
    ///
    /// Accepted forms are `place X Y KIND` (`KIND` is a terrain name or
    /// hotkey `1`-`3`), `erase X Y`, `done` and `click X Y`. Blank lines and
    /// `#` comments give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let coord = |i: usize| -> Result<i32, String> {
            let w = words
                .get(i)
                .ok_or_else(|| format!("missing coordinate in \u{201c}{line}\u{201d}"))?;
            w.parse()
                .map_err(|_| format!("bad coordinate \u{201c}{w}\u{201d}"))
        };
        let cmd = match words[0].to_ascii_lowercase().as_str() {
            "place" => {
                let name = words
                    .get(3)
                    .ok_or_else(|| format!("missing terrain in \u{201c}{line}\u{201d}"))?;
                let kind = TerrainKind::from_name(name)
                    .or_else(|| name.chars().next().and_then(TerrainKind::from_hotkey))
                    .filter(|k| !k.is_open())
                    .ok_or_else(|| format!("unknown obstacle \u{201c}{name}\u{201d}"))?;
                EditCommand::Place {
                    x: coord(1)?,
                    y: coord(2)?,
                    kind,
                }
            }
            "erase" => EditCommand::Erase {
                x: coord(1)?,
                y: coord(2)?,
            },
            "done" => EditCommand::FinishEditing,
            "click" => EditCommand::Click {
                x: coord(1)?,
                y: coord(2)?,
            },
            other => return Err(format!("unknown command \u{201c}{other}\u{201d}")),
        };
        Ok(Some(cmd))
    }
}

/// Parse a whole edit script, one command per line.
pub fn parse_script(text: &str) -> Result<Vec<EditCommand>, ScriptError> {
    let mut cmds = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match EditCommand::parse(line) {
            Ok(Some(cmd)) => cmds.push(cmd),
            Ok(None) => {}
            Err(message) => return Err(ScriptError { line: i + 1, message }),
        }
    }
    Ok(cmds)
}

/// Owns a grid while it is being edited.
pub struct Editor {
    grid: Grid,
    cell_size: i32,
    phase: Phase,
}

impl Editor {
    /// Start editing `grid`. Pointer coordinates are divided by
    /// `cell_size` to find the cell.
    pub fn new(grid: Grid, cell_size: i32) -> Self {
        Self {
            grid,
            cell_size,
            phase: Phase::EditingObstacles,
        }
    }

    /// The current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the grid, for drawing.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Hand the grid over.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Both endpoints, once selected.
    pub fn endpoints(&self) -> Option<(Position, Position)> {
        Some((self.grid.start()?, self.grid.end()?))
    }

    /// Apply every command in order, returning how many were applied.
    pub fn apply_all(&mut self, cmds: &[EditCommand]) -> usize {
        cmds.iter()
            .filter(|&&cmd| self.apply(cmd) == EditOutcome::Applied)
            .count()
    }

    /// Apply one command.
    pub fn apply(&mut self, cmd: EditCommand) -> EditOutcome {
        match (self.phase, cmd) {
            (Phase::EditingObstacles, EditCommand::Place { x, y, kind }) => {
                // Only open cells take an obstacle.
                let Some(p) = self.cell(x, y).filter(|&p| self.grid.is_traversable(p)) else {
                    debug!("place {kind:?} at pixel ({x}, {y}) vetoed");
                    return EditOutcome::Vetoed;
                };
                match self.grid.set_terrain(p, kind) {
                    Ok(()) => EditOutcome::Applied,
                    Err(e) => {
                        warn!("{e}");
                        EditOutcome::Vetoed
                    }
                }
            }
            (Phase::EditingObstacles, EditCommand::Erase { x, y }) => {
                let Some(p) = self.cell(x, y) else {
                    return EditOutcome::Vetoed;
                };
                match self.grid.clear_terrain(p) {
                    Ok(()) => EditOutcome::Applied,
                    Err(e) => {
                        warn!("{e}");
                        EditOutcome::Vetoed
                    }
                }
            }
            (Phase::EditingObstacles, EditCommand::FinishEditing) => {
                self.phase = if self.endpoints().is_some() {
                    Phase::Done
                } else {
                    Phase::SelectingEndpoints
                };
                debug!("obstacle editing finished, now {:?}", self.phase);
                EditOutcome::Applied
            }
            (Phase::SelectingEndpoints, EditCommand::Click { x, y }) => {
                let Some(p) = self.cell(x, y).filter(|&p| self.grid.is_traversable(p)) else {
                    debug!("click at pixel ({x}, {y}) vetoed");
                    return EditOutcome::Vetoed;
                };
                if self.grid.start().is_none() {
                    self.grid.set_start(p);
                    debug!("start set to {p}");
                } else {
                    self.grid.set_end(p);
                    self.phase = Phase::Done;
                    debug!("end set to {p}");
                }
                EditOutcome::Applied
            }
            _ => EditOutcome::Ignored,
        }
    }

    fn cell(&self, x: i32, y: i32) -> Option<Position> {
        Position::from_pixel(x, y, self.cell_size)
    }
}
