//! Pooled, cost-sorted open list.

use airleak_core::Cell;

/// Stable handle to a [`Crumb`] in a [`PriorityFrontier`]'s pool.
///
/// Valid until the pool is reset for the next run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CrumbId(u32);

impl CrumbId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A search node: a cell, its cost bookkeeping and a backlink toward the
/// start cell.
#[derive(Clone, Debug)]
pub struct Crumb {
    pub position: Cell,
    /// `path_cost` plus the heuristic at `position`.
    pub cost: i32,
    /// Number of moves from the start cell.
    pub path_cost: i32,
    /// The crumb this one was reached from; `None` for the start crumb.
    pub next: Option<CrumbId>,
    /// Open-list link. Meaningless outside the frontier.
    pub(crate) link: Option<CrumbId>,
}

/// Sorted singly-linked open list over an arena of reusable crumbs.
///
/// The head always holds the minimum cost. Insertion scans linearly from the
/// head, which is cheap because most inserts land near it. A new crumb goes
/// in front of existing crumbs of equal cost, so the most recent expansion
/// is explored first among ties.
///
/// Crumbs are never freed individually. [`reset_pool`](Self::reset_pool)
/// rewinds the allocation cursor so the next run overwrites old crumbs in
/// place; [`release_pool`](Self::release_pool) drops the storage.
pub struct PriorityFrontier {
    pool: Vec<Crumb>,
    cursor: usize,
    head: Option<CrumbId>,
    len: usize,
    peak: usize,
}

impl Default for PriorityFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self {
            pool: Vec::new(),
            cursor: 0,
            head: None,
            len: 0,
            peak: 0,
        }
    }

    /// Allocate a crumb and link it into sorted position.
    pub fn insert(
        &mut self,
        position: Cell,
        cost: i32,
        path_cost: i32,
        backlink: Option<CrumbId>,
    ) -> CrumbId {
        let id = self.alloc(Crumb {
            position,
            cost,
            path_cost,
            next: backlink,
            link: None,
        });

        match self.head {
            Some(h) if cost > self.pool[h.index()].cost => {
                let mut prev = h;
                while let Some(n) = self.pool[prev.index()].link {
                    if cost <= self.pool[n.index()].cost {
                        break;
                    }
                    prev = n;
                }
                self.pool[id.index()].link = self.pool[prev.index()].link;
                self.pool[prev.index()].link = Some(id);
            }
            head => {
                self.pool[id.index()].link = head;
                self.head = Some(id);
            }
        }

        self.len += 1;
        self.peak = self.peak.max(self.len);
        id
    }

    /// Remove and return the minimum-cost crumb.
    pub fn pop_min(&mut self) -> Option<CrumbId> {
        let h = self.head?;
        let crumb = &mut self.pool[h.index()];
        self.head = crumb.link.take();
        self.len -= 1;
        Some(h)
    }

    /// Cost of the head, if any.
    #[inline]
    pub fn min_cost(&self) -> Option<i32> {
        self.head.map(|h| self.pool[h.index()].cost)
    }

    /// Detach every crumb from the open list. Pooled crumbs stay allocated
    /// and still reachable through [`get`](Self::get).
    #[inline]
    pub fn clear(&mut self) {
        self.head = None;
        self.len = 0;
    }

    /// Rewind the pool for a new run. Previously issued ids become stale.
    pub fn reset_pool(&mut self) {
        self.clear();
        self.cursor = 0;
        self.peak = 0;
    }

    /// Drop all pooled crumbs and their storage.
    pub fn release_pool(&mut self) {
        self.reset_pool();
        self.pool = Vec::new();
    }

    #[inline]
    pub fn get(&self, id: CrumbId) -> &Crumb {
        &self.pool[id.index()]
    }

    /// Number of crumbs currently linked into the open list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Largest open-list length since the last pool reset.
    #[inline]
    pub fn peak_len(&self) -> usize {
        self.peak
    }

    /// Crumbs handed out since the last pool reset.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.cursor
    }

    /// Crumbs held by the pool, live or reusable.
    #[inline]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Open-list members from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &Crumb> + '_ {
        std::iter::successors(self.head, move |id| self.pool[id.index()].link)
            .map(move |id| &self.pool[id.index()])
    }

    /// Follow `next` backlinks from `id` to the start crumb, inclusive.
    pub fn chain(&self, id: CrumbId) -> impl Iterator<Item = &Crumb> + '_ {
        std::iter::successors(Some(id), move |id| self.pool[id.index()].next)
            .map(move |id| &self.pool[id.index()])
    }

    fn alloc(&mut self, crumb: Crumb) -> CrumbId {
        let id = CrumbId(self.cursor as u32);
        if self.cursor < self.pool.len() {
            self.pool[self.cursor] = crumb;
        } else {
            self.pool.push(crumb);
        }
        self.cursor += 1;
        id
    }
}
