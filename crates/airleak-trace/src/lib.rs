//! Leak tracing for cell structures: search coordination and playback.
//!
//! - [`SearchCoordinator`] runs at most one background
//!   [`Pathfinder`](airleak_paths::Pathfinder) search per owner and moves
//!   through `Idle` → `Computing` → `Drawing` → `Idle`.
//! - [`PathPlayback`] animates the found path with travelling, fading
//!   markers.
//! - [`LeakTracer`] combines the two behind a single per-frame call.
//!
//! Rendering goes through the [`PathRenderer`] trait; the host supplies the
//! actual line and point primitives.

pub mod coordinator;
pub mod playback;
pub mod render;
pub mod tracer;

pub use coordinator::{
    CoordinatorConfig, Notice, SearchCoordinator, SearchOwner, SearchStatus, StartError,
};
pub use playback::{PathPlayback, PlaybackConfig};
pub use render::{Camera, DrawCmd, PathRenderer};
pub use tracer::LeakTracer;
