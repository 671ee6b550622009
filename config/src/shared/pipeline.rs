use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::{QueueConfig, TransformConfig, ValidationError};

/// Where the pipeline reads its lines from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// A text file read line by line.
    File {
        /// Path of the input file.
        path: PathBuf,
    },
    /// The process standard input.
    Stdin,
}

/// Where the pipeline writes its transformed lines to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkConfig {
    /// A text file, created or truncated when the pipeline starts.
    File {
        /// Path of the output file.
        path: PathBuf,
    },
    /// The process standard output.
    Stdout,
    /// An in-memory buffer, useful for dry runs.
    Memory,
}

/// Configuration of a line pipeline.
///
/// All values are fixed when the pipeline is constructed and cannot change while it runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of transform workers, which is also the number of termination markers every
    /// upstream producer emits.
    pub workers: usize,
    /// Line source.
    pub source: SourceConfig,
    /// Line sink.
    pub sink: SinkConfig,
    /// Per-line transformation.
    #[serde(default)]
    pub transform: TransformConfig,
    /// Capacity of the stage queues.
    #[serde(default)]
    pub queue: QueueConfig,
}

impl PipelineConfig {
    /// Default number of transform workers.
    pub const DEFAULT_WORKERS: usize = 4;

    /// Creates a configuration with default transform and queue settings.
    pub fn new(workers: usize, source: SourceConfig, sink: SinkConfig) -> Self {
        Self {
            workers,
            source,
            sink,
            transform: TransformConfig::default(),
            queue: QueueConfig::default(),
        }
    }

    /// Validates the pipeline configuration.
    ///
    /// Rejects a zero worker count, a zero queue capacity and empty file paths.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.workers == 0 {
            return Err(ValidationError::WorkersZero);
        }

        if let SourceConfig::File { path } = &self.source
            && path.as_os_str().is_empty()
        {
            return Err(ValidationError::EmptyPath("source.file"));
        }

        if let SinkConfig::File { path } = &self.sink
            && path.as_os_str().is_empty()
        {
            return Err(ValidationError::EmptyPath("sink.file"));
        }

        self.queue.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(workers: usize) -> PipelineConfig {
        PipelineConfig::new(
            workers,
            SourceConfig::File {
                path: "input.txt".into(),
            },
            SinkConfig::File {
                path: "output.txt".into(),
            },
        )
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(file_config(PipelineConfig::DEFAULT_WORKERS).validate(), Ok(()));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert_eq!(file_config(0).validate(), Err(ValidationError::WorkersZero));
    }

    #[test]
    fn empty_paths_are_rejected() {
        let mut config = file_config(1);
        config.sink = SinkConfig::File { path: "".into() };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyPath("sink.file"))
        );

        config.source = SourceConfig::File { path: "".into() };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyPath("source.file"))
        );
    }

    #[test]
    fn zero_queue_capacity_is_rejected() {
        let mut config = file_config(1);
        config.queue.capacity = Some(0);
        assert_eq!(config.validate(), Err(ValidationError::QueueCapacityZero));
    }
}
