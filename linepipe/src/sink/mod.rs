//! Line sinks receiving the transformed lines.
//!
//! The sink writer is the only task touching a [`LineSink`], so implementations need no internal
//! synchronization for writing.

mod base;
pub mod file;
pub mod memory;
pub mod stdout;

pub use base::LineSink;
