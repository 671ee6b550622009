use futures::StreamExt;
use tracing::{debug, error, info};

use crate::bail;
use crate::concurrency::queue::StageTx;
use crate::concurrency::shutdown::ShutdownRx;
use crate::error::{ErrorKind, PipeError, PipeResult};
use crate::failpoints::{SOURCE_READER_BEFORE_LINE, pipe_fail_point};
use crate::source::LineSource;
use crate::types::{Entry, ReaderStats};
use crate::workers::base::{Worker, WorkerType};

/// Reads every line of a [`LineSource`] into the first stage queue.
///
/// After the last line, or after the source failed, the reader pushes one termination marker
/// per transform worker so that every worker terminates. A shutdown skips the markers, since
/// every consumer is released by the shutdown signal itself, and so does a queue whose workers
/// are all gone.
#[derive(Debug)]
pub struct SourceReader<S> {
    source: S,
    workers: usize,
    queue_tx: StageTx<String>,
    shutdown_rx: ShutdownRx,
}

impl<S> SourceReader<S>
where
    S: LineSource + Send + Sync + 'static,
{
    pub fn new(source: S, workers: usize, queue_tx: StageTx<String>, shutdown_rx: ShutdownRx) -> Self {
        Self {
            source,
            workers,
            queue_tx,
            shutdown_rx,
        }
    }

    async fn forward_lines(&mut self, stats: &mut ReaderStats) -> PipeResult<()> {
        let mut lines = self.source.open().await?;

        debug!(source = S::name(), "source opened");

        loop {
            let next = tokio::select! {
                biased;

                _ = self.shutdown_rx.wait_for_shutdown() => {
                    bail!(
                        ErrorKind::TaskInterrupted,
                        "Source reader interrupted by shutdown"
                    );
                }
                next = lines.next() => next,
            };

            let Some(line) = next else {
                return Ok(());
            };
            let line = line?;

            pipe_fail_point(SOURCE_READER_BEFORE_LINE)?;

            self.queue_tx.push(Entry::Payload(line)).await?;
            stats.lines_read += 1;
        }
    }

    /// Sends the termination markers after a failure that left the workers waiting, then
    /// completes with `err`.
    async fn terminate_workers(&mut self, err: PipeError) -> PipeResult<ReaderStats> {
        if let Err(marker_err) = self.queue_tx.push_markers(self.workers).await {
            return Err(vec![err, marker_err].into());
        }

        Err(err)
    }
}

impl<S> Worker for SourceReader<S>
where
    S: LineSource + Send + Sync + 'static,
{
    type Output = ReaderStats;

    fn worker_type(&self) -> WorkerType {
        WorkerType::Reader
    }

    async fn run(mut self) -> PipeResult<ReaderStats> {
        info!(
            source = S::name(),
            workers = self.workers,
            "starting source reader"
        );

        let mut stats = ReaderStats::default();
        let read_result = self.forward_lines(&mut stats).await;

        match read_result {
            Ok(()) => {
                stats.markers_sent = self.queue_tx.push_markers(self.workers).await?;

                info!(
                    lines_read = stats.lines_read,
                    markers_sent = stats.markers_sent,
                    "source reader completed"
                );

                Ok(stats)
            }
            Err(err) => {
                match err.kind() {
                    ErrorKind::TaskInterrupted => {
                        info!(
                            lines_read = stats.lines_read,
                            "source reader interrupted by shutdown"
                        );
                    }
                    ErrorKind::InvalidState => {
                        error!(
                            error = %err,
                            lines_read = stats.lines_read,
                            "transform workers are gone, stopping source reader"
                        );
                    }
                    ErrorKind::SourceUnavailable | ErrorKind::SourceReadFailed => {
                        error!(
                            error = %err,
                            lines_read = stats.lines_read,
                            "source failed, terminating transform workers early"
                        );

                        return self.terminate_workers(err).await;
                    }
                    _ => {
                        error!(
                            error = %err,
                            lines_read = stats.lines_read,
                            "source reader failed, terminating transform workers early"
                        );

                        return self.terminate_workers(err).await;
                    }
                }

                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concurrency::queue::create_stage_queue;
    use crate::concurrency::shutdown::create_shutdown_channel;
    use crate::source::file::FileSource;
    use crate::source::memory::MemorySource;

    #[tokio::test]
    async fn pushes_lines_then_one_marker_per_worker() {
        let (_shutdown_tx, shutdown_rx) = create_shutdown_channel();
        let (queue_tx, mut queue_rx) = create_stage_queue(None, shutdown_rx.clone());
        let reader = SourceReader::new(MemorySource::new(["a", "b"]), 3, queue_tx, shutdown_rx);

        let stats = reader.start().wait().await.unwrap();

        assert_eq!(
            stats,
            ReaderStats {
                lines_read: 2,
                markers_sent: 3
            }
        );
        assert_eq!(queue_rx.pop().await.unwrap(), Entry::Payload("a".to_string()));
        assert_eq!(queue_rx.pop().await.unwrap(), Entry::Payload("b".to_string()));
        for _ in 0..3 {
            assert_eq!(queue_rx.pop().await.unwrap(), Entry::End);
        }
    }

    #[tokio::test]
    async fn unavailable_source_still_terminates_workers() {
        let dir = tempfile::tempdir().unwrap();
        let (_shutdown_tx, shutdown_rx) = create_shutdown_channel();
        let (queue_tx, mut queue_rx) = create_stage_queue(None, shutdown_rx.clone());
        let source = FileSource::new(dir.path().join("missing.txt"));
        let reader = SourceReader::new(source, 2, queue_tx, shutdown_rx);

        let err = reader.start().wait().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert_eq!(queue_rx.pop().await.unwrap(), Entry::End);
        assert_eq!(queue_rx.pop().await.unwrap(), Entry::End);
    }

    #[tokio::test]
    async fn gone_workers_stop_the_reader_without_markers() {
        let (_shutdown_tx, shutdown_rx) = create_shutdown_channel();
        let (queue_tx, queue_rx) = create_stage_queue::<String>(None, shutdown_rx.clone());
        drop(queue_rx);
        let reader = SourceReader::new(MemorySource::new(["a", "b"]), 2, queue_tx, shutdown_rx);

        let err = reader.start().wait().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(err.errors().is_none());
    }
}
