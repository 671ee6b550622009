use config::shared::{PipelineConfig, QueueConfig, SinkConfig, SourceConfig};

use crate::pipeline::Pipeline;
use crate::sink::LineSink;
use crate::source::LineSource;
use crate::transform::CaseTransform;

/// Returns a configuration with `workers` workers and unbounded queues.
///
/// The source and sink settings are placeholders, tests hand their own source and sink to the
/// pipeline.
pub fn test_pipeline_config(workers: usize) -> PipelineConfig {
    PipelineConfig::new(workers, SourceConfig::Stdin, SinkConfig::Memory)
}

/// Same as [`test_pipeline_config`] with both queues bounded to `capacity`.
pub fn bounded_pipeline_config(workers: usize, capacity: usize) -> PipelineConfig {
    let mut config = test_pipeline_config(workers);
    config.queue = QueueConfig::bounded(capacity);
    config
}

/// Creates an upper casing pipeline with `workers` workers.
pub fn create_pipeline<S, K>(workers: usize, source: S, sink: K) -> Pipeline<S, K, CaseTransform>
where
    S: LineSource + Send + Sync + 'static,
    K: LineSink + Send + 'static,
{
    Pipeline::new(
        test_pipeline_config(workers),
        source,
        sink,
        CaseTransform::default(),
    )
}
