use std::sync::Arc;

use config::shared::PipelineConfig;
use tracing::{error, info};

use crate::bail;
use crate::concurrency::queue::create_stage_queue;
use crate::concurrency::shutdown::{ShutdownTx, create_shutdown_channel};
use crate::error::{ErrorKind, PipeResult};
use crate::sink::LineSink;
use crate::source::LineSource;
use crate::transform::Transform;
use crate::types::{PipelineReport, ReaderStats, WorkerId, WriterStats};
use crate::workers::base::{Worker, WorkerHandle};
use crate::workers::pool::TransformWorkerPool;
use crate::workers::reader::SourceReader;
use crate::workers::transform::TransformWorker;
use crate::workers::writer::SinkWriter;

#[derive(Debug)]
enum PipelineState<S, K> {
    NotStarted { source: S, sink: K },
    Starting,
    Started {
        reader: WorkerHandle<ReaderStats>,
        pool: TransformWorkerPool,
        writer: WorkerHandle<WriterStats>,
    },
}

/// A three stage pipeline moving lines from a [`LineSource`] through a pool of transform workers
/// into a [`LineSink`].
///
/// The reader and the writer each run on their own task, next to `config.workers` transform
/// worker tasks. Output lines reach the sink in an order that depends on scheduling and may differ
/// from the input order; the set of output lines is always the transformed set of input lines.
#[derive(Debug)]
pub struct Pipeline<S, K, T> {
    config: Arc<PipelineConfig>,
    transform: Arc<T>,
    state: PipelineState<S, K>,
    shutdown_tx: ShutdownTx,
}

impl<S, K, T> Pipeline<S, K, T>
where
    S: LineSource + Send + Sync + 'static,
    K: LineSink + Send + 'static,
    T: Transform + 'static,
{
    /// Creates a pipeline. Only `workers` and `queue` of `config` are used, the source and sink
    /// are the ones given.
    pub fn new(config: PipelineConfig, source: S, sink: K, transform: T) -> Self {
        let (shutdown_tx, _) = create_shutdown_channel();

        Self {
            config: Arc::new(config),
            transform: Arc::new(transform),
            state: PipelineState::NotStarted { source, sink },
            shutdown_tx,
        }
    }

    /// Returns a sender to shut the pipeline down from another task.
    pub fn shutdown_tx(&self) -> ShutdownTx {
        self.shutdown_tx.clone()
    }

    /// Starts every stage of the pipeline and returns without waiting for them.
    ///
    /// The writer starts first, then the transform workers, then the reader, so that every
    /// consumer is in place before its producer. Fails with [`ErrorKind::ConfigError`] on an
    /// invalid configuration, with [`ErrorKind::InvalidState`] if already started and with
    /// [`ErrorKind::TaskInterrupted`] if shutdown was requested before starting, in which case no
    /// stage is spawned.
    pub fn start(&mut self) -> PipeResult<()> {
        self.config.validate()?;

        if self.shutdown_tx.is_shutdown() {
            bail!(
                ErrorKind::TaskInterrupted,
                "Pipeline shut down before start",
                "shutdown was requested before the pipeline started"
            );
        }

        let (source, sink) = match std::mem::replace(&mut self.state, PipelineState::Starting) {
            PipelineState::NotStarted { source, sink } => (source, sink),
            state => {
                self.state = state;

                bail!(
                    ErrorKind::InvalidState,
                    "Pipeline already started",
                    "a pipeline can only be started once"
                );
            }
        };

        let workers = self.config.workers;
        info!(
            workers,
            source = S::name(),
            sink = K::name(),
            queue_capacity = ?self.config.queue.capacity,
            "starting pipeline"
        );

        let (input_tx, input_rx) =
            create_stage_queue(self.config.queue.capacity, self.shutdown_tx.subscribe());
        let (output_tx, output_rx) =
            create_stage_queue(self.config.queue.capacity, self.shutdown_tx.subscribe());

        let writer = SinkWriter::new(sink, workers, output_rx, self.shutdown_tx.clone()).start();

        let mut pool = TransformWorkerPool::new();
        for worker_id in WorkerId::range(workers) {
            pool.spawn(TransformWorker::new(
                worker_id,
                self.transform.clone(),
                input_rx.clone(),
                output_tx.clone(),
            ));
        }
        // Only the workers may keep the queues alive, so a stage that dies is noticed downstream.
        drop(input_rx);
        drop(output_tx);

        let reader =
            SourceReader::new(source, workers, input_tx, self.shutdown_tx.subscribe()).start();

        self.state = PipelineState::Started {
            reader,
            pool,
            writer,
        };

        Ok(())
    }

    /// Waits for every stage to complete.
    ///
    /// Returns the [`PipelineReport`] when every stage succeeded. Otherwise returns all stage
    /// errors aggregated, after every stage has stopped. Waiting on a pipeline that was never
    /// started returns an empty report.
    pub async fn wait(self) -> PipeResult<PipelineReport> {
        let PipelineState::Started {
            reader,
            pool,
            writer,
        } = self.state
        else {
            info!("pipeline was not started, nothing to wait for");

            return Ok(PipelineReport::default());
        };

        let mut errors = vec![];

        info!("waiting for source reader to complete");
        let reader_stats = reader.wait().await.map_err(|err| errors.push(err)).ok();

        info!("waiting for transform workers to complete");
        let workers_stats = pool.wait_all().await.map_err(|err| errors.push(err)).ok();

        info!("waiting for sink writer to complete");
        let writer_stats = writer.wait().await.map_err(|err| errors.push(err)).ok();

        match (reader_stats, workers_stats, writer_stats) {
            (Some(reader), Some(workers), Some(writer)) => {
                let report = PipelineReport {
                    reader,
                    workers,
                    writer,
                };

                info!(
                    lines_read = report.reader.lines_read,
                    lines_written = report.writer.lines_written,
                    "pipeline completed"
                );

                Ok(report)
            }
            _ => {
                error!(failed_stages = errors.len(), "pipeline completed with errors");

                Err(errors.into())
            }
        }
    }

    /// Signals every stage to stop as soon as possible.
    ///
    /// When called before [`Pipeline::start`], the pipeline never starts. Stages blocked on a queue or on the source are released and report
    /// [`ErrorKind::TaskInterrupted`]. The sink is left unfinished.
    pub fn shutdown(&self) {
        info!("shutting down the pipeline");

        self.shutdown_tx.shutdown();
    }

    pub async fn shutdown_and_wait(self) -> PipeResult<PipelineReport> {
        self.shutdown();
        self.wait().await
    }

    /// Starts the pipeline and waits for it to complete.
    pub async fn run(mut self) -> PipeResult<PipelineReport> {
        self.start()?;
        self.wait().await
    }
}
