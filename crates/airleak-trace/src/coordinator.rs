//! The search state machine: [`SearchCoordinator`].
//!
//! One coordinator owns at most one background search. The search state
//! (crumb pool, visited set) is moved into the worker while `Computing` and
//! handed back when the worker returns, so the main context and the worker
//! never touch it at the same time.

use std::fmt;

use airleak_core::{
    Bounds, Cell, Context, Progress, Scheduler, Segment, Task, TaskResult, WorkerFault,
};
use airleak_paths::{ConnectivityOracle, CrumbId, Pathfinder, SearchStats};

// ---------------------------------------------------------------------------
// SearchOwner
// ---------------------------------------------------------------------------

/// The structure a search runs in.
pub trait SearchOwner {
    /// Snapshot handed to the worker; queried only while `Computing`.
    type Oracle: ConnectivityOracle + Send + 'static;

    /// Inclusive cell bounds of the structure.
    fn bounds(&self) -> Bounds;

    fn oracle(&self) -> Self::Oracle;

    /// The area is already known to be airtight; nothing to search.
    fn is_sealed(&self) -> bool {
        false
    }

    /// Whether the requester may search this structure at all.
    fn can_search(&self) -> bool {
        true
    }

    /// `false` once the structure is closed, destroyed or out of range.
    fn is_valid(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Status, notices, errors
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`SearchCoordinator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    #[default]
    Idle,
    Computing,
    Drawing,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "Idle",
            Self::Computing => "Computing",
            Self::Drawing => "Drawing",
        })
    }
}

/// Something the host UI may want to tell the user about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A route outside was found and is now being drawn.
    LeakFound { segments: usize, ttl_ticks: u32 },
    /// The search finished without finding a way out.
    NoLeak,
    /// The background search failed; treated like [`Notice::NoLeak`].
    Faulted(WorkerFault),
    /// The drawn path reached the end of its lifetime.
    Expired,
    /// The structure became invalid and the search or drawing was dropped.
    Invalidated,
}

/// Why [`SearchCoordinator::start`] refused to start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartError {
    /// Leak searching is switched off in the configuration.
    Disabled,
    /// The owner reports the area as already sealed.
    Sealed,
    /// The owner does not allow this search.
    NotEligible,
    /// The start cell is not inside the structure.
    OutsideBounds { start: Cell, bounds: Bounds },
    /// A face of the structure lies on the edge of the coordinate range, so
    /// nothing can be outside it.
    NoExterior { bounds: Bounds },
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("leak search is disabled"),
            Self::Sealed => f.write_str("area is already sealed"),
            Self::NotEligible => f.write_str("structure cannot be searched"),
            Self::OutsideBounds { start, bounds } => {
                write!(f, "start cell {start} is outside structure bounds {bounds}")
            }
            Self::NoExterior { bounds } => {
                write!(f, "structure bounds {bounds} reach the coordinate limit")
            }
        }
    }
}

impl std::error::Error for StartError {}

// ---------------------------------------------------------------------------
// CoordinatorConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`SearchCoordinator`]. Durations are in ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CoordinatorConfig {
    pub enabled: bool,
    pub ticks_per_second: u32,
    /// Shortest time a found path stays drawn.
    pub ttl_min_ticks: u32,
    /// Longest time a found path stays drawn.
    pub ttl_max_ticks: u32,
    /// Drawing time added per path segment before clamping.
    pub ttl_ticks_per_segment: u32,
    /// Idle time after a clear before the pooled search buffers are dropped.
    pub pool_release_delay_ticks: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ticks_per_second: 60,
            ttl_min_ticks: 10 * 60,
            ttl_max_ticks: 60 * 60,
            ttl_ticks_per_segment: 30,
            pool_release_delay_ticks: 10 * 60,
        }
    }
}

impl CoordinatorConfig {
    /// Drawing lifetime for a path of `segments` segments. Non-decreasing in
    /// `segments` and always within `[ttl_min_ticks, ttl_max_ticks]`.
    pub fn ttl_for(&self, segments: usize) -> u32 {
        let n = u32::try_from(segments).unwrap_or(u32::MAX);
        let lo = self.ttl_min_ticks.min(self.ttl_max_ticks);
        n.saturating_mul(self.ttl_ticks_per_segment)
            .clamp(lo, self.ttl_max_ticks)
    }
}

// ---------------------------------------------------------------------------
// SearchCoordinator
// ---------------------------------------------------------------------------

/// What the worker hands back: the search state it borrowed plus the result.
struct RunOutput {
    pathfinder: Pathfinder,
    found: Option<CrumbId>,
}

/// Owns one in-flight leak search and the path it produced.
///
/// ```text
/// Idle --start--> Computing --found--> Drawing --expired/clear--> Idle
///                     |--no leak / fault / cancel----------------> Idle
/// ```
pub struct SearchCoordinator<S: Scheduler> {
    config: CoordinatorConfig,
    scheduler: S,
    status: SearchStatus,
    /// `None` while lent to the worker.
    pathfinder: Option<Pathfinder>,
    task: Option<Task<RunOutput>>,
    ctx: Context,
    progress: Progress,
    volume: u64,
    segments: Vec<Segment>,
    ttl: u32,
    generation: u64,
    last_stats: Option<SearchStats>,
    release_in: Option<u32>,
}

impl<S: Scheduler> SearchCoordinator<S> {
    pub fn new(scheduler: S, config: CoordinatorConfig) -> Self {
        Self {
            config,
            scheduler,
            status: SearchStatus::Idle,
            pathfinder: Some(Pathfinder::new()),
            task: None,
            ctx: Context::new(),
            progress: Progress::new(),
            volume: 0,
            segments: Vec::new(),
            ttl: 0,
            generation: 0,
            last_stats: None,
            release_in: None,
        }
    }

    /// Begin searching `owner` from `start`.
    ///
    /// Any previous search or drawing is cleared first. On error the
    /// coordinator stays `Idle`.
    pub fn start<O: SearchOwner>(&mut self, owner: &O, start: Cell) -> Result<(), StartError> {
        self.clear();

        let checked = if !self.config.enabled {
            Err(StartError::Disabled)
        } else if !owner.can_search() {
            Err(StartError::NotEligible)
        } else if owner.is_sealed() {
            Err(StartError::Sealed)
        } else {
            Ok(owner.bounds())
        };
        let bounds = checked.and_then(|bounds| {
            if !bounds.has_exterior() {
                Err(StartError::NoExterior { bounds })
            } else if !bounds.contains(start) {
                Err(StartError::OutsideBounds { start, bounds })
            } else {
                Ok(bounds)
            }
        });
        let bounds = match bounds {
            Ok(b) => b,
            Err(e) => {
                log::warn!("leak search not started: {e}");
                return Err(e);
            }
        };

        let oracle = owner.oracle();
        let mut pathfinder = self.pathfinder.take().unwrap_or_default();
        self.ctx = Context::new();
        self.progress.reset();
        self.volume = bounds.volume();
        self.release_in = None;

        let ctx = self.ctx.clone();
        let progress = self.progress.clone();
        self.task = Some(self.scheduler.submit("leak-search", move || {
            let found = pathfinder.search(start, &bounds, &oracle, &ctx, &progress);
            RunOutput { pathfinder, found }
        }));
        self.status = SearchStatus::Computing;
        log::debug!(
            "leak search started at {start} in {bounds} ({} cells)",
            self.volume
        );
        Ok(())
    }

    /// Cancel any running search, drop the current path and return to `Idle`.
    ///
    /// While `Computing` this blocks until the worker has observed the
    /// cancellation and returned, so no background thread touches the search
    /// state once `clear` returns.
    pub fn clear(&mut self) {
        if let Some(task) = self.task.take() {
            self.ctx.cancel();
            match task.wait() {
                Ok(out) => self.pathfinder = Some(out.pathfinder),
                Err(fault) => log::warn!("leak search failed during cancel: {fault}"),
            }
            log::debug!("leak search cancelled");
        }

        self.status = SearchStatus::Idle;
        self.segments.clear();
        self.ttl = 0;
        if self.release_in.is_none() {
            self.release_in = Some(self.config.pool_release_delay_ticks);
        }
    }

    /// Structure-validity signal: drop everything if not already `Idle`.
    /// Returns whether anything was dropped.
    pub fn invalidate(&mut self) -> bool {
        if self.status == SearchStatus::Idle {
            return false;
        }
        log::debug!("structure invalidated while {}", self.status);
        self.clear();
        true
    }

    /// Advance one tick on the main context.
    ///
    /// Picks up a finished search, counts down the drawing lifetime, and in
    /// `Idle` counts down the deferred buffer release.
    pub fn tick(&mut self) -> Option<Notice> {
        match self.status {
            SearchStatus::Idle => {
                self.tick_release();
                None
            }
            SearchStatus::Computing => {
                let result = self.task.as_mut()?.try_take()?;
                self.task = None;
                self.complete(result)
            }
            SearchStatus::Drawing => {
                self.ttl = self.ttl.saturating_sub(1);
                if self.ttl == 0 {
                    log::debug!("leak path expired");
                    self.clear();
                    Some(Notice::Expired)
                } else {
                    None
                }
            }
        }
    }

    /// [`tick`](Self::tick), after checking that `owner` is still valid.
    pub fn tick_with_owner<O: SearchOwner>(&mut self, owner: &O) -> Option<Notice> {
        if self.status != SearchStatus::Idle && !owner.is_valid() {
            self.invalidate();
            return Some(Notice::Invalidated);
        }
        self.tick()
    }

    fn complete(&mut self, result: TaskResult<RunOutput>) -> Option<Notice> {
        let out = match result {
            Ok(out) => out,
            Err(fault) => {
                log::warn!("{fault}");
                self.clear();
                return Some(Notice::Faulted(fault));
            }
        };

        let pathfinder = self.pathfinder.insert(out.pathfinder);
        let stats = pathfinder.stats();
        self.last_stats = Some(stats);

        if self.ctx.is_done() {
            self.clear();
            return None;
        }

        let segments = match out.found {
            Some(id) => pathfinder.segments(id),
            None => Vec::new(),
        };
        if segments.is_empty() {
            log::info!("no leak found ({} cells checked)", stats.expanded);
            self.clear();
            return Some(Notice::NoLeak);
        }

        self.ttl = self.config.ttl_for(segments.len());
        self.segments = segments;
        self.generation += 1;
        self.status = SearchStatus::Drawing;
        log::info!(
            "leak found: {} segments, drawing for {} ticks",
            self.segments.len(),
            self.ttl
        );
        Some(Notice::LeakFound {
            segments: self.segments.len(),
            ttl_ticks: self.ttl,
        })
    }

    fn tick_release(&mut self) {
        let Some(n) = self.release_in else {
            return;
        };
        if n > 1 {
            self.release_in = Some(n - 1);
            return;
        }
        self.release_in = None;
        if let Some(pf) = self.pathfinder.as_mut() {
            pf.release();
            log::debug!("released pooled leak-search buffers");
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The current path, exit end first. Empty unless `Drawing`.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Remaining drawing lifetime in ticks.
    #[inline]
    pub fn ttl_remaining(&self) -> u32 {
        self.ttl
    }

    /// Increases every time a new path enters `Drawing`.
    #[inline]
    pub fn path_generation(&self) -> u64 {
        self.generation
    }

    /// Counters from the last search that ran to completion.
    #[inline]
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    #[inline]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Crumbs held for reuse by the next search.
    pub fn pooled(&self) -> usize {
        self.pathfinder.as_ref().map_or(0, Pathfinder::pooled)
    }

    /// Coarse search progress in `0.0..=1.0`: cells expanded over the
    /// bounding volume. Zero unless `Computing`.
    pub fn progress(&self) -> f32 {
        if self.status != SearchStatus::Computing || self.volume == 0 {
            return 0.0;
        }
        (self.progress.get() as f64 / self.volume as f64).min(1.0) as f32
    }

    /// Human-readable status line.
    pub fn progress_text(&self) -> String {
        match self.status {
            SearchStatus::Idle => "Idle".to_string(),
            SearchStatus::Computing => format!("Computing... {:.0}%", self.progress() * 100.0),
            SearchStatus::Drawing => {
                let tps = self.config.ticks_per_second.max(1);
                format!("Drawing ({}s left)", self.ttl.div_ceil(tps))
            }
        }
    }
}

impl<S: Scheduler> Drop for SearchCoordinator<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.ctx.cancel();
            let _ = task.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airleak_core::{InlineScheduler, ThreadScheduler};
    use std::cell::Cell as Flag;

    /// A cube whose outer moves are all blocked except `holes`.
    struct Hull {
        bounds: Bounds,
        holes: Vec<(Cell, Cell)>,
        sealed: bool,
        eligible: bool,
        valid: Flag<bool>,
        explode: bool,
    }

    impl Hull {
        fn new(size: i32) -> Self {
            Self {
                bounds: Bounds::new(Cell::ZERO, Cell::new(size - 1, size - 1, size - 1)),
                holes: Vec::new(),
                sealed: false,
                eligible: true,
                valid: Flag::new(true),
                explode: false,
            }
        }

        fn with_hole(mut self, from: Cell, to: Cell) -> Self {
            self.holes.push((from, to));
            self
        }
    }

    struct HullOracle {
        bounds: Bounds,
        holes: Vec<(Cell, Cell)>,
        explode: bool,
    }

    impl ConnectivityOracle for HullOracle {
        fn is_blocked(&self, from: Cell, to: Cell) -> bool {
            if self.explode {
                panic!("oracle lost its structure");
            }
            !self.bounds.contains(to) && !self.holes.contains(&(from, to))
        }
    }

    impl SearchOwner for Hull {
        type Oracle = HullOracle;

        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn oracle(&self) -> HullOracle {
            HullOracle {
                bounds: self.bounds,
                holes: self.holes.clone(),
                explode: self.explode,
            }
        }

        fn is_sealed(&self) -> bool {
            self.sealed
        }

        fn can_search(&self) -> bool {
            self.eligible
        }

        fn is_valid(&self) -> bool {
            self.valid.get()
        }
    }

    fn leaky() -> Hull {
        Hull::new(5).with_hole(Cell::new(4, 2, 2), Cell::new(5, 2, 2))
    }

    fn inline() -> SearchCoordinator<InlineScheduler> {
        SearchCoordinator::new(InlineScheduler, CoordinatorConfig::default())
    }

    const MID: Cell = Cell::new(2, 2, 2);

    #[test]
    fn found_path_enters_drawing() {
        let mut c = inline();
        c.start(&leaky(), MID).unwrap();
        assert_eq!(c.status(), SearchStatus::Computing);

        let notice = c.tick();
        let ttl = c.config().ttl_for(2);
        assert_eq!(
            notice,
            Some(Notice::LeakFound {
                segments: 2,
                ttl_ticks: ttl
            })
        );
        assert_eq!(c.status(), SearchStatus::Drawing);
        assert_eq!(c.segments()[0].from, Cell::new(4, 2, 2));
        assert_eq!(c.segments()[1].to, MID);
        assert_eq!(c.ttl_remaining(), ttl);
        assert_eq!(c.path_generation(), 1);
    }

    #[test]
    fn enclosed_reports_no_leak() {
        let mut c = inline();
        c.start(&Hull::new(5), MID).unwrap();
        assert_eq!(c.progress_text(), "Computing... 100%");
        assert_eq!(c.tick(), Some(Notice::NoLeak));
        assert_eq!(c.status(), SearchStatus::Idle);
        assert!(c.segments().is_empty());
        assert_eq!(c.last_stats().unwrap().expanded, 125);
    }

    #[test]
    fn refused_starts_stay_idle() {
        let mut c = SearchCoordinator::new(
            InlineScheduler,
            CoordinatorConfig {
                enabled: false,
                ..CoordinatorConfig::default()
            },
        );
        assert_eq!(c.start(&leaky(), MID), Err(StartError::Disabled));
        assert_eq!(c.status(), SearchStatus::Idle);

        let mut c = inline();
        let mut sealed = leaky();
        sealed.sealed = true;
        assert_eq!(c.start(&sealed, MID), Err(StartError::Sealed));

        let mut locked = leaky();
        locked.eligible = false;
        assert_eq!(c.start(&locked, MID), Err(StartError::NotEligible));

        let outside = Cell::new(9, 0, 0);
        let err = c.start(&leaky(), outside).unwrap_err();
        assert!(matches!(err, StartError::OutsideBounds { start, .. } if start == outside));
        assert!(err.to_string().contains("outside"));
        assert_eq!(c.status(), SearchStatus::Idle);
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn bounds_on_coordinate_limit_are_refused() {
        let mut c = inline();
        let mut at_max = Hull::new(5);
        at_max.bounds = Bounds::new(Cell::new(i32::MAX - 4, 0, 0), Cell::new(i32::MAX, 4, 4));
        let err = c.start(&at_max, Cell::new(i32::MAX - 2, 2, 2)).unwrap_err();
        assert_eq!(err, StartError::NoExterior { bounds: at_max.bounds });
        assert_eq!(c.status(), SearchStatus::Idle);

        let mut full_x = Hull::new(5);
        full_x.bounds = Bounds::new(Cell::new(i32::MIN, 0, 0), Cell::new(i32::MAX, 4, 4));
        assert!(matches!(c.start(&full_x, MID), Err(StartError::NoExterior { .. })));
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn leak_found_beside_coordinate_limit() {
        let lo = Cell::new(i32::MAX - 5, 0, 0);
        let hi = Cell::new(i32::MAX - 1, 4, 4);
        let exit = Cell::new(i32::MAX - 1, 2, 2);
        let mut hull = Hull::new(5).with_hole(exit, Cell::new(i32::MAX, 2, 2));
        hull.bounds = Bounds::new(lo, hi);

        let mut c = inline();
        c.start(&hull, Cell::new(i32::MAX - 3, 2, 2)).unwrap();
        assert!(matches!(c.tick(), Some(Notice::LeakFound { segments: 2, .. })));
        assert_eq!(c.segments()[0].from, exit);

        let mut wide = Hull::new(5).with_hole(Cell::new(0, 0, 2), Cell::new(0, -1, 2));
        wide.bounds = Bounds::new(Cell::new(i32::MIN + 1, 0, 0), Cell::new(i32::MAX - 1, 4, 4));
        c.start(&wide, Cell::new(0, 2, 2)).unwrap();
        assert!(matches!(c.tick(), Some(Notice::LeakFound { segments: 2, .. })));
    }

    #[test]
    fn clear_is_idempotent_from_every_state() {
        let mut c = inline();
        c.clear();
        c.clear();
        assert_eq!(c.status(), SearchStatus::Idle);

        c.start(&leaky(), MID).unwrap();
        c.clear();
        assert_eq!(c.status(), SearchStatus::Idle);
        c.clear();
        assert_eq!(c.status(), SearchStatus::Idle);

        c.start(&leaky(), MID).unwrap();
        c.tick();
        assert_eq!(c.status(), SearchStatus::Drawing);
        c.clear();
        let after_first: Vec<Segment> = c.segments().to_vec();
        c.clear();
        assert_eq!(c.status(), SearchStatus::Idle);
        assert_eq!(c.segments(), after_first.as_slice());
        assert!(after_first.is_empty());
    }

    #[test]
    fn drawing_expires_after_ttl() {
        let mut c = SearchCoordinator::new(
            InlineScheduler,
            CoordinatorConfig {
                ttl_min_ticks: 3,
                ttl_max_ticks: 3,
                ..CoordinatorConfig::default()
            },
        );
        c.start(&leaky(), MID).unwrap();
        assert!(matches!(c.tick(), Some(Notice::LeakFound { ttl_ticks: 3, .. })));
        assert_eq!(c.progress_text(), "Drawing (1s left)");
        assert_eq!(c.tick(), None);
        assert_eq!(c.tick(), None);
        assert_eq!(c.tick(), Some(Notice::Expired));
        assert_eq!(c.status(), SearchStatus::Idle);
        assert_eq!(c.progress_text(), "Idle");
    }

    #[test]
    fn ttl_is_monotonic_and_clamped() {
        let cfg = CoordinatorConfig::default();
        let mut prev = 0;
        for n in 0..5000 {
            let ttl = cfg.ttl_for(n);
            assert!(ttl >= prev);
            assert!((cfg.ttl_min_ticks..=cfg.ttl_max_ticks).contains(&ttl));
            prev = ttl;
        }
        assert_eq!(cfg.ttl_for(0), cfg.ttl_min_ticks);
        assert_eq!(cfg.ttl_for(usize::MAX), cfg.ttl_max_ticks);
    }

    #[test]
    fn invalid_owner_forces_clear() {
        let mut c = inline();
        let hull = leaky();
        c.start(&hull, MID).unwrap();
        c.tick_with_owner(&hull);
        assert_eq!(c.status(), SearchStatus::Drawing);

        hull.valid.set(false);
        assert_eq!(c.tick_with_owner(&hull), Some(Notice::Invalidated));
        assert_eq!(c.status(), SearchStatus::Idle);
        assert!(!c.invalidate());
    }

    #[test]
    fn worker_fault_returns_to_idle() {
        let mut c = SearchCoordinator::new(ThreadScheduler, CoordinatorConfig::default());
        let mut hull = leaky();
        hull.explode = true;
        c.start(&hull, MID).unwrap();

        let notice = loop {
            if let Some(n) = c.tick() {
                break n;
            }
            std::thread::yield_now();
        };
        assert!(matches!(notice, Notice::Faulted(ref f) if f.message.contains("lost its structure")));
        assert_eq!(c.status(), SearchStatus::Idle);

        // A fresh search state replaces the one lost with the worker.
        c.start(&leaky(), MID).unwrap();
        let notice = loop {
            if let Some(n) = c.tick() {
                break n;
            }
            std::thread::yield_now();
        };
        assert!(matches!(notice, Notice::LeakFound { segments: 2, .. }));
    }

    #[test]
    fn clear_cancels_and_joins_running_search() {
        let mut c = SearchCoordinator::new(ThreadScheduler, CoordinatorConfig::default());
        // Large enclosed volume: far too slow to finish before the clear.
        let big = Hull::new(400);
        c.start(&big, Cell::new(200, 200, 200)).unwrap();
        assert_eq!(c.status(), SearchStatus::Computing);
        c.clear();
        assert_eq!(c.status(), SearchStatus::Idle);
        assert!(c.pooled() > 0);
        assert_eq!(c.tick(), None);
    }

    #[test]
    fn restart_replaces_running_search() {
        let mut c = SearchCoordinator::new(ThreadScheduler, CoordinatorConfig::default());
        c.start(&Hull::new(400), Cell::new(200, 200, 200)).unwrap();
        c.start(&leaky(), MID).unwrap();
        let notice = loop {
            if let Some(n) = c.tick() {
                break n;
            }
            std::thread::yield_now();
        };
        assert!(matches!(notice, Notice::LeakFound { segments: 2, .. }));
    }

    #[test]
    fn pool_released_after_idle_delay() {
        let mut c = SearchCoordinator::new(
            InlineScheduler,
            CoordinatorConfig {
                pool_release_delay_ticks: 3,
                ..CoordinatorConfig::default()
            },
        );
        c.start(&Hull::new(5), MID).unwrap();
        assert_eq!(c.tick(), Some(Notice::NoLeak));
        let pooled = c.pooled();
        assert!(pooled > 0);

        c.tick();
        c.tick();
        assert_eq!(c.pooled(), pooled);

        // A retry before the delay elapses keeps the buffers.
        c.start(&Hull::new(5), MID).unwrap();
        c.tick();
        c.tick();
        c.tick();
        assert_eq!(c.pooled(), pooled);

        c.tick();
        c.tick();
        c.tick();
        assert_eq!(c.pooled(), 0);
    }
}
