//! Per-frame animation of a found path: [`PathPlayback`].
//!
//! Markers are spawned at the exit end of the segment chain and walk toward
//! the start end, each leaving a short fading trail. Once the first marker
//! completes its walk no further markers are spawned; markers already in
//! flight finish and their trails fade out.

use std::collections::VecDeque;

use airleak_core::{Color, Segment, Vec3};

use crate::render::{Camera, PathRenderer};

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Timing and look of the path animation. Durations are in frames.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlaybackConfig {
    /// Local-space size of one cell.
    pub cell_size: f32,
    /// Frames between marker spawns.
    pub spawn_interval: u32,
    /// Segments a marker advances per frame.
    pub walk_speed: f32,
    /// How far before the exit end a new marker starts, in segments.
    pub walk_easing: f32,
    /// Fraction of the remaining distance to its target a marker covers per
    /// frame.
    pub smoothing: f32,
    /// Lifetime of one trail point.
    pub trail_ticks: u32,
    /// Remaining path lifetime below which everything fades out.
    pub fade_window_ticks: u32,
    /// Nothing farther than this from the camera is drawn.
    pub max_draw_distance: f32,
    pub marker_color: Color,
    pub trail_color: Color,
    pub exit_color: Color,
    pub start_color: Color,
    pub marker_size: f32,
    pub endpoint_size: f32,
    pub trail_thickness: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            spawn_interval: 30,
            walk_speed: 0.1,
            walk_easing: 0.5,
            smoothing: 0.35,
            trail_ticks: 20,
            fade_window_ticks: 120,
            max_draw_distance: 500.0,
            marker_color: Color::CYAN,
            trail_color: Color::from_rgba(0, 200, 255, 180),
            exit_color: Color::RED,
            start_color: Color::GREEN,
            marker_size: 0.25,
            endpoint_size: 0.4,
            trail_thickness: 0.08,
        }
    }
}

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug)]
struct TrailPoint {
    pos: Vec3,
    expires: u64,
}

#[derive(Clone, Debug)]
struct Marker {
    /// Fractional segment index; negative while easing in before the exit.
    walk: f32,
    pos: Vec3,
    trail: VecDeque<TrailPoint>,
    finished: bool,
}

/// Position `walk` segments along the chain, clamped to its ends.
fn position_at(segments: &[Segment], walk: f32, cell_size: f32) -> Vec3 {
    let w = walk.clamp(0.0, segments.len() as f32);
    let i = (w.floor() as usize).min(segments.len() - 1);
    segments[i].lerp(w - i as f32, cell_size)
}

// ---------------------------------------------------------------------------
// PathPlayback
// ---------------------------------------------------------------------------

/// Animates one segment chain. Reads the path, never mutates search state.
pub struct PathPlayback {
    config: PlaybackConfig,
    markers: Vec<Marker>,
    frame: u64,
    spawn_timer: u32,
    spawning: bool,
    spawned: u32,
    completed: u32,
}

impl PathPlayback {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            markers: Vec::new(),
            frame: 0,
            spawn_timer: 0,
            spawning: true,
            spawned: 0,
            completed: 0,
        }
    }

    /// Forget all markers and start over, e.g. for a newly found path.
    pub fn reset(&mut self) {
        self.markers.clear();
        self.frame = 0;
        self.spawn_timer = 0;
        self.spawning = true;
        self.spawned = 0;
        self.completed = 0;
    }

    /// Advance one frame and draw.
    ///
    /// `segments` must be non-empty; an empty chain draws nothing.
    pub fn draw<R: PathRenderer + ?Sized>(
        &mut self,
        segments: &[Segment],
        ttl_remaining: u32,
        camera: &Camera,
        out: &mut R,
    ) {
        if segments.is_empty() {
            return;
        }
        self.frame += 1;
        self.advance(segments);
        self.render(segments, ttl_remaining, camera, out);
    }

    fn advance(&mut self, segments: &[Segment]) {
        if self.spawning {
            if self.spawn_timer == 0 {
                self.spawn(segments);
                self.spawn_timer = self.config.spawn_interval.max(1);
            }
            self.spawn_timer -= 1;
        }

        let len = segments.len() as f32;
        let frame = self.frame;
        let cfg = &self.config;
        let mut finished_now = 0;
        for m in &mut self.markers {
            while m.trail.front().is_some_and(|p| p.expires <= frame) {
                m.trail.pop_front();
            }
            if m.finished {
                continue;
            }
            m.walk += cfg.walk_speed;
            let target = position_at(segments, m.walk, cfg.cell_size);
            m.pos = m.pos.lerp(target, cfg.smoothing);
            if m.walk >= len {
                m.finished = true;
                finished_now += 1;
            } else {
                m.trail.push_back(TrailPoint {
                    pos: m.pos,
                    expires: frame + u64::from(cfg.trail_ticks),
                });
            }
        }

        if finished_now > 0 {
            self.completed += finished_now;
            if self.spawning {
                self.spawning = false;
                log::debug!(
                    "marker reached path start after {} frames, spawning stopped",
                    self.frame
                );
            }
        }
        self.markers.retain(|m| !m.finished || !m.trail.is_empty());
    }

    fn spawn(&mut self, segments: &[Segment]) {
        self.markers.push(Marker {
            walk: -self.config.walk_easing,
            pos: position_at(segments, 0.0, self.config.cell_size),
            trail: VecDeque::new(),
            finished: false,
        });
        self.spawned += 1;
    }

    fn render<R: PathRenderer + ?Sized>(
        &self,
        segments: &[Segment],
        ttl_remaining: u32,
        camera: &Camera,
        out: &mut R,
    ) {
        let cfg = &self.config;
        let fade = self.fade(ttl_remaining);
        if fade <= 0.0 {
            return;
        }
        let max = cfg.max_draw_distance;

        let (first, last) = (segments[0], segments[segments.len() - 1]);
        let exit = first.from.to_vec3(cfg.cell_size);
        let start = last.to.to_vec3(cfg.cell_size);
        if camera.sees(exit, max) {
            out.point(exit, cfg.exit_color.scale(fade), cfg.endpoint_size);
        }
        if camera.sees(start, max) {
            out.point(start, cfg.start_color.scale(fade), cfg.endpoint_size);
        }

        let trail_ticks = cfg.trail_ticks.max(1) as f32;
        for m in &self.markers {
            for (a, b) in m.trail.iter().zip(m.trail.iter().skip(1)) {
                if !camera.sees(a.pos, max) && !camera.sees(b.pos, max) {
                    continue;
                }
                let life = (b.expires - self.frame) as f32 / trail_ticks;
                out.line(
                    a.pos,
                    b.pos,
                    cfg.trail_color.scale(fade * life),
                    cfg.trail_thickness,
                );
            }
            if !m.finished && camera.sees(m.pos, max) {
                out.point(m.pos, cfg.marker_color.scale(fade), cfg.marker_size);
            }
        }
    }

    /// Fade factor for the remaining path lifetime: 1 until the fade window,
    /// then linearly down to 0.
    pub fn fade(&self, ttl_remaining: u32) -> f32 {
        match self.config.fade_window_ticks {
            0 => 1.0,
            w => (ttl_remaining as f32 / w as f32).min(1.0),
        }
    }

    /// Frames one marker needs to walk a chain of `segments` segments.
    pub fn walk_frames(&self, segments: usize) -> u32 {
        let distance = segments as f32 + self.config.walk_easing;
        (distance / self.config.walk_speed.max(f32::EPSILON)).ceil() as u32
    }

    /// `false` once a marker has completed the full walk.
    #[inline]
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Nothing left to spawn or draw.
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.spawning && self.markers.is_empty()
    }

    #[inline]
    pub fn completed_walks(&self) -> u32 {
        self.completed
    }

    #[inline]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Current positions of markers still walking.
    pub fn marker_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.markers.iter().filter(|m| !m.finished).map(|m| m.pos)
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }
}

impl Default for PathPlayback {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
