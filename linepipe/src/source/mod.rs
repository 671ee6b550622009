//! Line sources feeding the pipeline.
//!
//! A [`LineSource`] produces a lazy, finite sequence of text lines. The source reader opens it
//! once per pipeline run and pushes every line onto the first stage queue.

mod base;
pub mod file;
pub mod memory;
pub mod stdin;

pub use base::{LineSource, LineStream};
