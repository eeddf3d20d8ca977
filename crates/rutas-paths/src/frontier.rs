//! Search bookkeeping: frontier entries, per-cell nodes, statistics.

use std::cmp::Ordering;

use rutas_core::Position;

/// Parent sentinel for the start node.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// One frontier entry. Stale entries (for cells improved after the push)
/// stay in the heap and are skipped when popped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) priority: i32,
    pub(crate) pos: Position,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first,
        // ties going to the row-major smallest position.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-cell search state. A node only counts as reached when its
/// `generation` matches the finder's current one, so arrays are reused
/// across searches without clearing.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells whose neighbours were examined.
    pub expanded: usize,
    /// Entries pushed onto the frontier, the start entry included.
    pub pushed: usize,
    /// Stale entries popped and discarded.
    pub skipped: usize,
}
