//! Shared configuration types for linepipe pipelines.

mod base;
mod pipeline;
mod queue;
mod transform;

pub use base::ValidationError;
pub use pipeline::{PipelineConfig, SinkConfig, SourceConfig};
pub use queue::QueueConfig;
pub use transform::{Case, TransformConfig};
