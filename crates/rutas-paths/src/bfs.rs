//! Unweighted breadth-first distances.
//!
//! These use the same neighbour predicate as A* and serve as the reference
//! for optimal path lengths.

use std::collections::VecDeque;

use rutas_core::Position;

use crate::traits::Pather;

/// Step distances from `source` to every cell, in row-major order.
///
/// Unreached cells are `None`. The source itself is always at distance 0
/// when in bounds, whatever its terrain; its neighbours are expanded like
/// any other cell. An out-of-bounds source reaches nothing.
pub fn bfs_map<P: Pather>(pather: &P, source: Position) -> Vec<Option<i32>> {
    let mut dist = vec![None; pather.area()];
    let Some(si) = pather.index(source) else {
        return dist;
    };
    dist[si] = Some(0);

    let mut queue = VecDeque::from([(source, 0)]);
    let mut nbuf = Vec::with_capacity(4);

    while let Some((cp, cd)) = queue.pop_front() {
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = pather.index(np) else {
                continue;
            };
            if dist[ni].is_some() {
                continue;
            }
            dist[ni] = Some(cd + 1);
            queue.push_back((np, cd + 1));
        }
    }
    dist
}

/// Step distance from `from` to `to`, or `None` if `to` is unreachable.
pub fn bfs_distance<P: Pather>(pather: &P, from: Position, to: Position) -> Option<i32> {
    let ti = pather.index(to)?;
    bfs_map(pather, from)[ti]
}
