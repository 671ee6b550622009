use tracing::{debug, error, info, trace};

use crate::concurrency::queue::StageRx;
use crate::concurrency::shutdown::ShutdownTx;
use crate::error::{ErrorKind, PipeResult};
use crate::failpoints::{SINK_WRITER_BEFORE_WRITE, pipe_fail_point};
use crate::sink::LineSink;
use crate::types::{Entry, TransformedLine, WriterStats};
use crate::workers::base::{Worker, WorkerType};

/// Writes every transformed line into a [`LineSink`].
///
/// The writer keeps going until it counted one termination marker per transform worker, then
/// finishes the sink. A single marker never ends it, since other workers may still be producing.
///
/// When the sink fails, the writer signals shutdown so that producers blocked on a full queue,
/// or waiting on an empty one, are released instead of waiting for a consumer that is gone.
#[derive(Debug)]
pub struct SinkWriter<K> {
    sink: K,
    workers: usize,
    input_rx: StageRx<TransformedLine>,
    shutdown_tx: ShutdownTx,
}

impl<K> SinkWriter<K>
where
    K: LineSink + Send + 'static,
{
    pub fn new(
        sink: K,
        workers: usize,
        input_rx: StageRx<TransformedLine>,
        shutdown_tx: ShutdownTx,
    ) -> Self {
        Self {
            sink,
            workers,
            input_rx,
            shutdown_tx,
        }
    }

    async fn write_lines(&mut self) -> PipeResult<WriterStats> {
        self.sink.open().await?;

        debug!(sink = K::name(), "sink opened");

        let mut stats = WriterStats::default();
        while stats.markers_received < self.workers {
            match self.input_rx.pop().await? {
                Entry::Payload(line) => {
                    pipe_fail_point(SINK_WRITER_BEFORE_WRITE)?;

                    self.sink.write_line(&line.text).await?;
                    stats.lines_written += 1;

                    trace!(worker_id = %line.worker_id, "line written");
                }
                Entry::End => {
                    stats.markers_received += 1;

                    debug!(
                        markers_received = stats.markers_received,
                        markers_expected = self.workers,
                        "termination marker received"
                    );
                }
            }
        }

        self.sink.finish().await?;

        Ok(stats)
    }
}

impl<K> Worker for SinkWriter<K>
where
    K: LineSink + Send + 'static,
{
    type Output = WriterStats;

    fn worker_type(&self) -> WorkerType {
        WorkerType::Writer
    }

    async fn run(mut self) -> PipeResult<WriterStats> {
        info!(sink = K::name(), workers = self.workers, "starting sink writer");

        match self.write_lines().await {
            Ok(stats) => {
                info!(
                    lines_written = stats.lines_written,
                    "sink writer completed"
                );

                Ok(stats)
            }
            Err(err) => {
                if matches!(
                    err.kind(),
                    ErrorKind::SinkUnavailable | ErrorKind::SinkWriteFailed
                ) {
                    error!(error = %err, "sink failed, shutting down the pipeline");
                    self.shutdown_tx.shutdown();
                }

                Err(err)
            }
        }
    }
}
