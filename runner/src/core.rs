use config::shared::{PipelineConfig, SinkConfig, SourceConfig};
use linepipe::pipeline::Pipeline;
use linepipe::sink::LineSink;
use linepipe::sink::file::FileSink;
use linepipe::sink::memory::MemorySink;
use linepipe::sink::stdout::StdoutSink;
use linepipe::source::LineSource;
use linepipe::source::file::FileSource;
use linepipe::source::stdin::StdinSource;
use linepipe::transform::{CaseTransform, Transform};
use linepipe::types::PipelineReport;
use tracing::{error, info};

use crate::config::RunnerConfig;
use crate::error::RunnerResult;

// Macro to statically dispatch pipeline creation and starting
macro_rules! start_pipeline_dispatch {
    ($pipeline_config:expr, $source:expr, $sink:expr, $transform:expr) => {{
        let pipeline = Pipeline::new($pipeline_config, $source, $sink, $transform);
        start_pipeline(pipeline).await
    }};
}

/// Builds the configured source, sink and transform and runs the pipeline to completion.
pub async fn start_runner_with_config(config: RunnerConfig) -> RunnerResult<PipelineReport> {
    let pipeline_config = config.pipeline;

    // Every source and sink combination is dispatched statically, at the cost of some verbosity.
    match pipeline_config.source.clone() {
        SourceConfig::File { path } => {
            let source = FileSource::new(path);
            dispatch_sink(pipeline_config, source).await
        }
        SourceConfig::Stdin => dispatch_sink(pipeline_config, StdinSource::new()).await,
    }
}

async fn dispatch_sink<S>(pipeline_config: PipelineConfig, source: S) -> RunnerResult<PipelineReport>
where
    S: LineSource + Send + Sync + 'static,
{
    let transform = CaseTransform::from(&pipeline_config.transform);

    match pipeline_config.sink.clone() {
        SinkConfig::File { path } => {
            let sink = FileSink::new(path);
            start_pipeline_dispatch!(pipeline_config, source, sink, transform)
        }
        SinkConfig::Stdout => {
            let sink = StdoutSink::new();
            start_pipeline_dispatch!(pipeline_config, source, sink, transform)
        }
        SinkConfig::Memory => {
            let sink = MemorySink::new();
            let report =
                start_pipeline_dispatch!(pipeline_config, source, sink.clone(), transform)?;

            info!(
                lines = sink.lines().await.len(),
                "memory sink discarded collected lines"
            );

            Ok(report)
        }
    }
}

async fn start_pipeline<S, K, T>(mut pipeline: Pipeline<S, K, T>) -> RunnerResult<PipelineReport>
where
    S: LineSource + Send + Sync + 'static,
    K: LineSink + Send + 'static,
    T: Transform + 'static,
{
    pipeline.start()?;

    // Spawn a task to listen for Ctrl+C and trigger shutdown.
    let shutdown_tx = pipeline.shutdown_tx();
    let shutdown_handle = tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {:?}", err);
            return;
        }

        info!("Ctrl+C received, shutting down pipeline");
        shutdown_tx.shutdown();
    });

    let result = pipeline.wait().await;

    // The listener is still running when the pipeline finished on its own.
    shutdown_handle.abort();
    let _ = shutdown_handle.await;

    let report = result?;

    info!(
        lines_read = report.reader.lines_read,
        lines_written = report.writer.lines_written,
        workers = report.workers.len(),
        "pipeline finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn runs_file_to_file_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        tokio::fs::write(&input, "one\ntwo\nthree\n").await.unwrap();

        let config = RunnerConfig {
            pipeline: PipelineConfig::new(
                3,
                SourceConfig::File {
                    path: input.clone(),
                },
                SinkConfig::File {
                    path: output.clone(),
                },
            ),
        };

        let report = start_runner_with_config(config).await.unwrap();

        let mut written: Vec<String> = tokio::fs::read_to_string(&output)
            .await
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();
        written.sort();
        assert_eq!(written, vec!["ONE", "THREE", "TWO"]);
        assert_eq!(report.writer.lines_written, 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_input_is_reported_as_pipeline_error() {
        let dir = tempfile::tempdir().unwrap();

        let config = RunnerConfig {
            pipeline: PipelineConfig::new(
                2,
                SourceConfig::File {
                    path: dir.path().join("missing.txt"),
                },
                SinkConfig::Memory,
            ),
        };

        let err = start_runner_with_config(config).await.unwrap_err();

        assert_eq!(err.category(), "pipeline error");
    }
}
