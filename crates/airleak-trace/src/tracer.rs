//! Host-facing glue: [`LeakTracer`] ties a coordinator to a playback.

use airleak_core::{Cell, Scheduler};

use crate::coordinator::{
    CoordinatorConfig, Notice, SearchCoordinator, SearchOwner, SearchStatus, StartError,
};
use crate::playback::{PathPlayback, PlaybackConfig};
use crate::render::{Camera, PathRenderer};

/// One leak tracer per search owner: a [`SearchCoordinator`] plus the
/// [`PathPlayback`] that animates whatever it finds.
///
/// Call [`frame`](Self::frame) once per rendered frame on the main context.
pub struct LeakTracer<S: Scheduler> {
    coordinator: SearchCoordinator<S>,
    playback: PathPlayback,
    shown: u64,
}

impl<S: Scheduler> LeakTracer<S> {
    pub fn new(scheduler: S, coordinator: CoordinatorConfig, playback: PlaybackConfig) -> Self {
        Self {
            coordinator: SearchCoordinator::new(scheduler, coordinator),
            playback: PathPlayback::new(playback),
            shown: 0,
        }
    }

    pub fn start<O: SearchOwner>(&mut self, owner: &O, start: Cell) -> Result<(), StartError> {
        self.coordinator.start(owner, start)
    }

    pub fn clear(&mut self) {
        self.coordinator.clear();
    }

    pub fn invalidate(&mut self) -> bool {
        self.coordinator.invalidate()
    }

    /// Tick the coordinator and, while `Drawing`, draw one playback frame.
    pub fn frame<R: PathRenderer + ?Sized>(
        &mut self,
        camera: &Camera,
        out: &mut R,
    ) -> Option<Notice> {
        let notice = self.coordinator.tick();
        self.draw(camera, out);
        notice
    }

    /// [`frame`](Self::frame), dropping everything if `owner` has become
    /// invalid.
    pub fn frame_with_owner<O, R>(
        &mut self,
        owner: &O,
        camera: &Camera,
        out: &mut R,
    ) -> Option<Notice>
    where
        O: SearchOwner,
        R: PathRenderer + ?Sized,
    {
        let notice = self.coordinator.tick_with_owner(owner);
        self.draw(camera, out);
        notice
    }

    fn draw<R: PathRenderer + ?Sized>(&mut self, camera: &Camera, out: &mut R) {
        if self.coordinator.status() != SearchStatus::Drawing {
            return;
        }
        let generation = self.coordinator.path_generation();
        if generation != self.shown {
            self.playback.reset();
            self.shown = generation;
        }
        self.playback.draw(
            self.coordinator.segments(),
            self.coordinator.ttl_remaining(),
            camera,
            out,
        );
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.coordinator.status()
    }

    pub fn progress_text(&self) -> String {
        self.coordinator.progress_text()
    }

    #[inline]
    pub fn coordinator(&self) -> &SearchCoordinator<S> {
        &self.coordinator
    }

    #[inline]
    pub fn playback(&self) -> &PathPlayback {
        &self.playback
    }
}
