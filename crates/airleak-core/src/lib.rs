//! **airleak-core**: shared types for the airleak leak tracer.
//!
//! This crate provides the foundational types used across the *airleak*
//! crates: structure-local cell geometry, colours, and the cancellable
//! background-task plumbing that keeps the search off the main context.

pub mod color;
pub mod geom;
pub mod task;

pub use color::Color;
pub use geom::{Bounds, Cell, Segment, Vec3};
pub use task::{
    Context, InlineScheduler, Progress, Scheduler, Task, TaskResult, ThreadScheduler, WorkerFault,
};
