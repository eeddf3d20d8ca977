use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use rutas_core::{Grid, Position, TerrainKind};

/// Obstacle generator operating on an owned [`Grid`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MapGen<R> {
    /// Create a new MapGen with the given grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Give the grid back.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Turn random open cells into obstacles drawn from `kinds` until
    /// `fill_pct` (0.0–1.0) of all cells are obstacles.
    ///
    /// Cells in `keep_open` are never touched. Existing obstacles count
    /// towards the target. Returns the number of cells changed.
    pub fn scatter(&mut self, fill_pct: f64, kinds: &[TerrainKind], keep_open: &[Position]) -> usize {
        if kinds.is_empty() {
            return 0;
        }
        let total = self.grid.len();
        let target = (total as f64 * fill_pct.clamp(0.0, 1.0)) as usize;
        let blocked = total - self.grid.count(TerrainKind::Open);
        if blocked >= target {
            return 0;
        }

        let mut candidates: Vec<Position> = self
            .grid
            .iter()
            .filter(|&(p, k)| k.is_open() && !keep_open.contains(&p))
            .map(|(p, _)| p)
            .collect();
        candidates.shuffle(&mut self.rng);

        let mut placed = 0;
        for p in candidates.into_iter().take(target - blocked) {
            let kind = kinds[self.rng.random_range(0..kinds.len())];
            if self.grid.set_terrain(p, kind).is_ok() {
                placed += 1;
            }
        }
        debug!("scatter: placed {placed} obstacles (target {target} of {total})");
        placed
    }

    /// Paint a blob of `kind` by a random walk of `steps` moves from
    /// `origin`.
    ///
    /// Moves that would leave the grid stay put. Cells in `keep_open` are
    /// walked through but not painted. Returns the number of cells whose
    /// terrain changed.
    pub fn random_walk_blob(
        &mut self,
        kind: TerrainKind,
        origin: Position,
        steps: usize,
        keep_open: &[Position],
    ) -> usize {
        if !self.grid.contains(origin) {
            return 0;
        }
        let mut painted = 0;
        let mut pos = origin;
        for _ in 0..=steps {
            if !keep_open.contains(&pos)
                && self.grid.terrain(pos) != Some(kind)
                && self.grid.set_terrain(pos, kind).is_ok()
            {
                painted += 1;
            }
            let next = pos + Position::CARDINALS[self.rng.random_range(0..4)];
            if self.grid.contains(next) {
                pos = next;
            }
        }
        painted
    }

    /// A uniformly chosen open cell, or `None` if there is none.
    pub fn random_open_position(&mut self) -> Option<Position> {
        let open: Vec<Position> = self
            .grid
            .iter()
            .filter(|(_, k)| k.is_open())
            .map(|(p, _)| p)
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[self.rng.random_range(0..open.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rutas_paths::{bfs_distance, find_path, path_steps};

    fn mapgen(rows: i32, columns: i32, seed: u64) -> MapGen<StdRng> {
        MapGen::with_grid(Grid::new(rows, columns).unwrap(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn scatter_reaches_target_and_spares_kept_cells() {
        let mut mg = mapgen(10, 10, 1);
        let keep = [Position::new(0, 0), Position::new(9, 9)];
        let placed = mg.scatter(0.3, &TerrainKind::OBSTACLES, &keep);
        assert_eq!(placed, 30);
        assert_eq!(mg.grid.count(TerrainKind::Open), 70);
        for p in keep {
            assert!(mg.grid.is_traversable(p));
        }
        // already at target
        assert_eq!(mg.scatter(0.2, &TerrainKind::OBSTACLES, &keep), 0);
    }

    #[test]
    fn scatter_only_uses_given_kinds() {
        let mut mg = mapgen(6, 6, 2);
        mg.scatter(0.5, &[TerrainKind::Pothole], &[]);
        assert_eq!(mg.grid.count(TerrainKind::Pothole), 18);
        assert_eq!(mg.grid.count(TerrainKind::Water), 0);
        assert_eq!(mg.scatter(1.0, &[], &[]), 0);
    }

    #[test]
    fn blob_is_connected_to_origin() {
        let mut mg = mapgen(12, 12, 3);
        let origin = Position::new(6, 6);
        let painted = mg.random_walk_blob(TerrainKind::Water, origin, 40, &[]);
        assert!(painted >= 1);
        assert_eq!(mg.grid.count(TerrainKind::Water), painted);

        // Every water cell is reachable from the origin through water.
        let mut inverted = Grid::new(12, 12).unwrap();
        for (p, k) in mg.grid.iter() {
            if k != TerrainKind::Water {
                inverted.set_terrain(p, TerrainKind::Building).unwrap();
            }
        }
        for (p, k) in mg.grid.iter() {
            if k == TerrainKind::Water {
                assert!(bfs_distance(&inverted, origin, p).is_some());
            }
        }
    }

    #[test]
    fn blob_respects_keep_open_and_bounds() {
        let mut mg = mapgen(3, 3, 4);
        let keep = [Position::new(1, 1)];
        mg.random_walk_blob(TerrainKind::Building, Position::new(1, 1), 50, &keep);
        assert!(mg.grid.is_traversable(Position::new(1, 1)));
        assert_eq!(
            mg.random_walk_blob(TerrainKind::Building, Position::new(5, 5), 5, &[]),
            0
        );
    }

    #[test]
    fn random_open_position_avoids_obstacles() {
        let mut mg = mapgen(4, 4, 5);
        mg.grid.fill(TerrainKind::Building);
        assert_eq!(mg.random_open_position(), None);
        mg.grid.clear_terrain(Position::new(2, 3)).unwrap();
        assert_eq!(mg.random_open_position(), Some(Position::new(2, 3)));
    }

    #[test]
    fn generated_maps_are_searchable() {
        let mut mg = mapgen(20, 20, 6);
        let (s, e) = (Position::new(0, 0), Position::new(19, 19));
        mg.random_walk_blob(TerrainKind::Water, Position::new(10, 10), 60, &[s, e]);
        mg.scatter(0.2, &TerrainKind::OBSTACLES, &[s, e]);
        let mut grid = mg.into_grid();
        let expected = bfs_distance(&grid, s, e);
        let got = find_path(&mut grid, s, e).map(|p| path_steps(&p) as i32);
        assert_eq!(got, expected);
    }
}
