//! A* shortest-path search.

use std::collections::BinaryHeap;

use log::{debug, trace};
use rutas_core::{Grid, Position};

use crate::frontier::{FrontierEntry, NO_PARENT, Node, SearchStats};
use crate::traits::AstarPather;

/// A* search over 4-connected unit-cost cells.
///
/// `PathFinder` owns its per-cell arrays and reuses them between calls, so
/// repeated searches on same-sized grids do not reallocate. It holds no
/// reference to any grid between calls.
#[derive(Debug, Default)]
pub struct PathFinder {
    nodes: Vec<Node>,
    generation: u32,
    nbuf: Vec<Position>,
    stats: SearchStats,
}

impl PathFinder {
    /// Create a finder with empty caches. They grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Record `start` and `end` on the grid, then search between them.
    ///
    /// Endpoints are stamped before searching so that display code reading
    /// the grid sees the pair that was searched, whatever the outcome.
    pub fn find_path(
        &mut self,
        grid: &mut Grid,
        start: Position,
        end: Position,
    ) -> Option<Vec<Position>> {
        grid.set_start(start);
        grid.set_end(end);
        self.search(&*grid, start, end)
    }

    /// Compute a shortest path from `start` to `end`.
    ///
    /// Returns the cells of the path, both endpoints included, or `None` if
    /// `end` cannot be reached. `start == end` yields `[start]`. Neither
    /// endpoint is checked for traversability: the start's neighbours are
    /// always expanded, while an obstacle `end` is never entered. Endpoints
    /// outside the pather's bounds yield `None`.
    pub fn search<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Position,
        end: Position,
    ) -> Option<Vec<Position>> {
        self.stats = SearchStats::default();
        let (rows, columns) = pather.dimensions();
        let (Some(start_idx), Some(end_idx)) = (pather.index(start), pather.index(end)) else {
            debug!("search {start} -> {end}: endpoint outside {rows}x{columns} area");
            return None;
        };
        let cur_gen = self.begin(pather.area());

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.closed = false;
        }

        let mut open = BinaryHeap::new();
        open.push(FrontierEntry {
            priority: 0,
            pos: start,
        });
        self.stats.pushed = 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(FrontierEntry { priority, pos }) = open.pop() else {
                break 'search false;
            };
            if pos == end {
                break 'search true;
            }

            let Some(ci) = pather.index(pos) else {
                continue;
            };
            // Superseded entry for a cell that was already expanded.
            if self.nodes[ci].closed {
                self.stats.skipped += 1;
                continue;
            }
            self.nodes[ci].closed = true;
            self.stats.expanded += 1;
            let current_g = self.nodes[ci].g;
            trace!("expand {pos} g={current_g} f={priority}");

            nbuf.clear();
            pather.neighbors(pos, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = pather.index(np) else {
                    continue;
                };
                let tentative_g = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen && tentative_g >= n.g {
                    continue;
                }
                n.generation = cur_gen;
                n.g = tentative_g;
                n.parent = ci;
                // An improved cell must be expanded again.
                n.closed = false;

                open.push(FrontierEntry {
                    priority: tentative_g + pather.estimate(np, end),
                    pos: np,
                });
                self.stats.pushed += 1;
            }
        };

        self.nbuf = nbuf;

        if !found {
            debug!(
                "search {start} -> {end}: no path ({} expanded, {} pushed)",
                self.stats.expanded, self.stats.pushed
            );
            return None;
        }

        let mut path = Vec::with_capacity(self.nodes[end_idx].g as usize + 1);
        if start_idx == end_idx {
            path.push(start);
        } else {
            let mut ci = end_idx;
            while ci != NO_PARENT {
                path.push(position_of(ci, columns));
                ci = self.nodes[ci].parent;
            }
            path.reverse();
        }
        debug!(
            "search {start} -> {end}: {} steps ({} expanded, {} pushed)",
            path.len() - 1,
            self.stats.expanded,
            self.stats.pushed
        );
        Some(path)
    }

    /// Prepare the node array for a search over `len` cells and return the
    /// generation that marks nodes reached by it.
    fn begin(&mut self, len: usize) -> u32 {
        if self.nodes.len() < len {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with new ones.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }
}

#[inline]
fn position_of(idx: usize, columns: i32) -> Position {
    let cols = columns as usize;
    Position::new((idx / cols) as i32, (idx % cols) as i32)
}

/// One-shot search: stamp `start`/`end` onto `grid` and return a shortest
/// path between them, or `None` if there is none.
///
/// Equivalent to [`PathFinder::find_path`] on a fresh finder.
pub fn find_path(grid: &mut Grid, start: Position, end: Position) -> Option<Vec<Position>> {
    PathFinder::new().find_path(grid, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::bfs_distance;
    use crate::distance::manhattan;
    use crate::path::{is_connected, path_steps};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rutas_core::TerrainKind;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn random_grid(rng: &mut StdRng, rows: i32, columns: i32, density: f64) -> Grid {
        let mut g = Grid::new(rows, columns).unwrap();
        for r in 0..rows {
            for c in 0..columns {
                if rng.random_bool(density) {
                    let kind = TerrainKind::OBSTACLES[rng.random_range(0..3)];
                    g.set_terrain(p(r, c), kind).unwrap();
                }
            }
        }
        g
    }

    fn random_open(rng: &mut StdRng, g: &Grid) -> Option<Position> {
        let open: Vec<_> = g
            .iter()
            .filter(|(_, k)| k.is_open())
            .map(|(pos, _)| pos)
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }

    #[test]
    fn three_by_three_corner_to_corner() {
        let mut g = Grid::new(3, 3).unwrap();
        let path = find_path(&mut g, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path_steps(&path), 4);
        assert_eq!(path.first(), Some(&p(0, 0)));
        assert_eq!(path.last(), Some(&p(2, 2)));
        assert!(is_connected(&path));
        // Ties resolve to the row-major smallest cell, which walks the top
        // row first.
        assert_eq!(path, vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
    }

    #[test]
    fn single_gap_in_wall() {
        let mut g = Grid::new(5, 5).unwrap();
        for c in 0..5 {
            if c != 2 {
                g.set_terrain(p(2, c), TerrainKind::Building).unwrap();
            }
        }
        let path = find_path(&mut g, p(0, 2), p(4, 2)).unwrap();
        assert_eq!(path_steps(&path), 4);
        let in_row_2: Vec<_> = path.iter().filter(|q| q.row == 2).collect();
        assert_eq!(in_row_2, vec![&p(2, 2)]);
    }

    #[test]
    fn start_equals_end() {
        let mut g = Grid::new(4, 4).unwrap();
        let mut pf = PathFinder::new();
        assert_eq!(pf.find_path(&mut g, p(1, 2), p(1, 2)), Some(vec![p(1, 2)]));
        assert_eq!(pf.stats().expanded, 0);
        assert_eq!(pf.stats().pushed, 1);

        // Holds even on an obstacle.
        g.set_terrain(p(3, 3), TerrainKind::Water).unwrap();
        assert_eq!(pf.find_path(&mut g, p(3, 3), p(3, 3)), Some(vec![p(3, 3)]));
    }

    #[test]
    fn boxed_in_start_has_no_path() {
        let mut g = Grid::new(5, 5).unwrap();
        let start = p(2, 2);
        for (n, kind) in start.neighbors_4().into_iter().zip([
            TerrainKind::Water,
            TerrainKind::Building,
            TerrainKind::Pothole,
            TerrainKind::Water,
        ]) {
            g.set_terrain(n, kind).unwrap();
        }
        let mut pf = PathFinder::new();
        assert_eq!(pf.find_path(&mut g, start, p(0, 0)), None);
        assert_eq!(pf.stats().expanded, 1);
    }

    #[test]
    fn obstacle_end_is_unreachable() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_terrain(p(2, 2), TerrainKind::Pothole).unwrap();
        assert_eq!(find_path(&mut g, p(0, 0), p(2, 2)), None);
    }

    #[test]
    fn obstacle_start_still_expands() {
        let mut g = Grid::new(1, 3).unwrap();
        g.set_terrain(p(0, 0), TerrainKind::Building).unwrap();
        assert_eq!(
            find_path(&mut g, p(0, 0), p(0, 2)),
            Some(vec![p(0, 0), p(0, 1), p(0, 2)])
        );
    }

    #[test]
    fn endpoints_are_stamped_on_grid() {
        let mut g = Grid::new(3, 3).unwrap();
        g.fill(TerrainKind::Water);
        assert_eq!(find_path(&mut g, p(0, 0), p(2, 2)), None);
        assert_eq!(g.start(), Some(p(0, 0)));
        assert_eq!(g.end(), Some(p(2, 2)));
    }

    #[test]
    fn search_does_not_touch_grid() {
        let g = Grid::new(3, 3).unwrap();
        let mut pf = PathFinder::new();
        assert!(pf.search(&g, p(0, 0), p(1, 1)).is_some());
        assert_eq!((g.start(), g.end()), (None, None));
    }

    #[test]
    fn out_of_bounds_endpoints_yield_none() {
        let g = Grid::new(3, 3).unwrap();
        let mut pf = PathFinder::new();
        assert_eq!(pf.search(&g, p(-1, 0), p(1, 1)), None);
        assert_eq!(pf.search(&g, p(0, 0), p(3, 0)), None);
    }

    #[test]
    fn detour_around_wall() {
        let mut g = Grid::from_layout(
            "
            S...
            ###.
            E...
            ",
        )
        .unwrap();
        let (s, e) = (g.start().unwrap(), g.end().unwrap());
        let path = find_path(&mut g, s, e).unwrap();
        assert_eq!(path_steps(&path), 8);
        assert!(path.contains(&p(1, 3)));
        assert!(path.iter().all(|&q| g.is_traversable(q)));
    }

    #[test]
    fn open_grid_paths_have_manhattan_length() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut g = Grid::new(9, 13).unwrap();
        let mut pf = PathFinder::new();
        for _ in 0..200 {
            let s = p(rng.random_range(0..9), rng.random_range(0..13));
            let e = p(rng.random_range(0..9), rng.random_range(0..13));
            let path = pf.find_path(&mut g, s, e).unwrap();
            assert_eq!(path_steps(&path) as i32, manhattan(s, e));
            assert!(is_connected(&path));
        }
    }

    #[test]
    fn matches_bfs_on_random_layouts() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut pf = PathFinder::new();
        for round in 0..300 {
            let rows = rng.random_range(1..12);
            let columns = rng.random_range(1..12);
            let mut g = random_grid(&mut rng, rows, columns, 0.3);
            let (Some(s), Some(e)) = (random_open(&mut rng, &g), random_open(&mut rng, &g)) else {
                continue;
            };
            let expected = bfs_distance(&g, s, e);
            let got = pf.find_path(&mut g, s, e);
            match (expected, got) {
                (None, None) => {}
                (Some(d), Some(path)) => {
                    assert_eq!(path_steps(&path) as i32, d, "round {round}");
                    assert_eq!(path.first(), Some(&s));
                    assert_eq!(path.last(), Some(&e));
                    assert!(is_connected(&path));
                    assert!(path.iter().all(|&q| g.is_traversable(q)));
                    // admissibility of the estimate
                    assert!(manhattan(s, e) <= d);
                }
                (d, path) => panic!("round {round}: bfs {d:?} vs astar {path:?}"),
            }
        }
    }

    #[test]
    fn repeated_search_is_identical() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = random_grid(&mut rng, 15, 15, 0.25);
        g.clear_terrain(p(0, 0)).unwrap();
        g.clear_terrain(p(14, 14)).unwrap();
        let mut pf = PathFinder::new();
        let first = pf.find_path(&mut g, p(0, 0), p(14, 14));
        for _ in 0..5 {
            assert_eq!(pf.find_path(&mut g, p(0, 0), p(14, 14)), first);
        }
        // A fresh finder agrees too.
        assert_eq!(find_path(&mut g, p(0, 0), p(14, 14)), first);
    }

    #[test]
    fn finder_reuse_across_grid_sizes() {
        let mut pf = PathFinder::new();
        let mut small = Grid::new(2, 2).unwrap();
        let mut big = Grid::new(6, 7).unwrap();
        assert_eq!(
            pf.find_path(&mut small, p(0, 0), p(1, 1)).map(|v| v.len()),
            Some(3)
        );
        assert_eq!(
            pf.find_path(&mut big, p(5, 6), p(0, 0)).map(|v| v.len()),
            Some(12)
        );
        assert_eq!(
            pf.find_path(&mut small, p(1, 1), p(0, 0)).map(|v| v.len()),
            Some(3)
        );
    }

    #[test]
    fn generation_wrap_resets_nodes() {
        let mut g = Grid::new(3, 3).unwrap();
        let mut pf = PathFinder::new();
        pf.find_path(&mut g, p(0, 0), p(2, 2));
        pf.generation = u32::MAX;
        let path = pf.find_path(&mut g, p(2, 2), p(0, 0)).unwrap();
        assert_eq!(path_steps(&path), 4);
        assert_eq!(pf.generation, 1);
    }
}
