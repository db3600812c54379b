//! Shared task spawning primitives.
//!
//! All work started by the catalog goes through these helpers so every spawn
//! carries a [`TaskClass`] in its trace events and lands on the active Tokio
//! runtime (or a shared fallback runtime when none is active).

mod class;
mod join_set;
mod spawn;

pub use class::TaskClass;
pub use join_set::WorkerJoinSet;
pub use spawn::{spawn, spawn_blocking};
