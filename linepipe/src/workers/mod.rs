//! Tasks running the three pipeline stages.
//!
//! One [`reader::SourceReader`] feeds the first stage queue, a [`pool::TransformWorkerPool`] of
//! [`transform::TransformWorker`]s competes for its entries and feeds the second stage queue, and
//! one [`writer::SinkWriter`] drains it into the sink.

pub mod base;
pub mod pool;
pub mod reader;
pub mod transform;
pub mod writer;
