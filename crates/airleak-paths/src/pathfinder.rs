//! Boundary-seeking best-first search.

use std::collections::HashSet;

use airleak_core::{Bounds, Cell, Context, Progress, Segment};

use crate::distance::boundary_distance;
use crate::frontier::{Crumb, CrumbId, PriorityFrontier};
use crate::traits::ConnectivityOracle;

/// Counters for the most recent [`Pathfinder::search`] run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells moved from the frontier into the visited set.
    pub expanded: u64,
    /// Crumbs inserted into the frontier, duplicates included.
    pub inserted: u64,
    /// Largest frontier length seen.
    pub peak_frontier: usize,
}

/// Finds a route from an interior cell to anywhere outside a structure's
/// bounds.
///
/// The frontier is ordered by moves-so-far plus [`boundary_distance`], so the
/// search heads for the nearest face and stops as soon as it can step
/// outside. This is not a shortest-path search between two fixed points.
///
/// A `Pathfinder` owns its crumb pool and visited set and reuses them across
/// runs. Crumb ids returned by [`search`](Self::search) stay valid until the
/// next run or [`release`](Self::release).
pub struct Pathfinder {
    frontier: PriorityFrontier,
    visited: HashSet<Cell>,
    stats: SearchStats,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pathfinder {
    pub fn new() -> Self {
        Self {
            frontier: PriorityFrontier::new(),
            visited: HashSet::new(),
            stats: SearchStats::default(),
        }
    }

    /// Search outward from `start`.
    ///
    /// Returns the crumb of the last interior cell on the route (or the start
    /// crumb itself when `start` is already outside), whose `next` chain leads
    /// back to `start`. Returns `None` when the structure is fully enclosed or
    /// when `ctx` is cancelled; cancellation is checked once per expansion.
    ///
    /// A face lying on `i32::MIN` or `i32::MAX` has no cell beyond it and
    /// never yields an exit.
    pub fn search<O>(
        &mut self,
        start: Cell,
        bounds: &Bounds,
        oracle: &O,
        ctx: &Context,
        progress: &Progress,
    ) -> Option<CrumbId>
    where
        O: ConnectivityOracle + ?Sized,
    {
        self.frontier.reset_pool();
        self.visited.clear();
        self.stats = SearchStats::default();

        let h = boundary_distance(bounds, start);
        self.push(start, h, 0, None);

        let found = 'search: loop {
            if ctx.is_done() {
                break None;
            }
            let Some(id) = self.frontier.pop_min() else {
                break None;
            };

            let (pos, path_cost) = {
                let c = self.frontier.get(id);
                (c.position, c.path_cost)
            };
            if boundary_distance(bounds, pos) < 0 {
                break Some(id);
            }
            if !self.visited.insert(pos) {
                continue;
            }
            self.stats.expanded += 1;
            progress.incr();

            for n in pos.neighbors_6() {
                if oracle.is_blocked(pos, n) {
                    continue;
                }
                let h = boundary_distance(bounds, n);
                if h < 0 {
                    // Open face: the current cell is the exit.
                    break 'search Some(id);
                }
                if bounds.contains(n) {
                    let pc = path_cost.saturating_add(1);
                    self.push(n, pc.saturating_add(h), pc, Some(id));
                }
            }
        };

        self.stats.peak_frontier = self.frontier.peak_len();
        self.frontier.clear();
        self.visited.clear();

        log::trace!(
            "search from {start}: expanded {} cells, found={}",
            self.stats.expanded,
            found.is_some()
        );
        found
    }

    #[inline]
    fn push(&mut self, pos: Cell, cost: i32, path_cost: i32, backlink: Option<CrumbId>) {
        self.frontier.insert(pos, cost, path_cost, backlink);
        self.stats.inserted += 1;
    }

    #[inline]
    pub fn crumb(&self, id: CrumbId) -> &Crumb {
        self.frontier.get(id)
    }

    /// Cells on the route from `id` back to the start cell, inclusive.
    pub fn cells(&self, id: CrumbId) -> Vec<Cell> {
        self.frontier.chain(id).map(|c| c.position).collect()
    }

    /// Route from `id` back to the start cell as segments, exit end first.
    /// Empty when `id` is the start crumb.
    pub fn segments(&self, id: CrumbId) -> Vec<Segment> {
        self.cells(id)
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Crumbs currently held by the pool.
    #[inline]
    pub fn pooled(&self) -> usize {
        self.frontier.pooled()
    }

    /// Drop pooled crumbs and the visited set's storage.
    pub fn release(&mut self) {
        self.frontier.release_pool();
        self.visited = HashSet::new();
    }
}
