//! Leak search over 3D cell structures.
//!
//! Given a structure's inclusive [`Bounds`](airleak_core::Bounds), a start
//! cell and a [`ConnectivityOracle`], [`Pathfinder::search`] looks for any
//! route that leaves the bounding box. The open list is a
//! [`PriorityFrontier`]: a pooled, cost-sorted linked list whose crumbs are
//! reused from run to run.
//!
//! The search runs on a background worker and polls a
//! [`Context`](airleak_core::Context) once per expansion, so it can be
//! cancelled promptly from the main context.

mod distance;
mod frontier;
mod pathfinder;
mod traits;

pub use distance::{boundary_distance, manhattan};
pub use frontier::{Crumb, CrumbId, PriorityFrontier};
pub use pathfinder::{Pathfinder, SearchStats};
pub use traits::ConnectivityOracle;
