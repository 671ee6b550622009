//! Core data types flowing through the pipeline.

mod entry;
mod report;
mod worker;

pub use entry::{Entry, TransformedLine};
pub use report::{PipelineReport, ReaderStats, TransformWorkerStats, WriterStats};
pub use worker::WorkerId;
