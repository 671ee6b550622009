//! A concurrent three stage line pipeline.
//!
//! Lines flow from a [`source::LineSource`] through a pool of transform workers into a
//! [`sink::LineSink`]. The stages are connected by two stage queues and terminate through
//! termination markers: the reader sends one marker per worker, every worker forwards exactly one,
//! and the writer finishes the sink once it counted one marker per worker.
//!
//! ```no_run
//! use config::shared::{PipelineConfig, SinkConfig, SourceConfig};
//! use linepipe::pipeline::Pipeline;
//! use linepipe::sink::file::FileSink;
//! use linepipe::source::file::FileSource;
//! use linepipe::transform::CaseTransform;
//!
//! # async fn run() -> linepipe::error::PipeResult<()> {
//! let config = PipelineConfig::new(
//!     4,
//!     SourceConfig::File { path: "input.txt".into() },
//!     SinkConfig::File { path: "output.txt".into() },
//! );
//! let pipeline = Pipeline::new(
//!     config,
//!     FileSource::new("input.txt"),
//!     FileSink::new("output.txt"),
//!     CaseTransform::default(),
//! );
//!
//! let report = pipeline.run().await?;
//! println!("{} lines written", report.writer.lines_written);
//! # Ok(())
//! # }
//! ```

pub mod concurrency;
pub mod error;
pub mod failpoints;
mod macros;
pub mod pipeline;
pub mod sink;
pub mod source;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod transform;
pub mod types;
pub mod workers;
