use std::sync::Arc;

use tracing::{debug, info};

use crate::concurrency::queue::{StageRx, StageTx};
use crate::error::PipeResult;
use crate::transform::Transform;
use crate::types::{Entry, TransformWorkerStats, TransformedLine, WorkerId};
use crate::workers::base::{Worker, WorkerType};

/// Applies a [`Transform`] to lines taken from the first stage queue and pushes the results to
/// the second one.
///
/// The worker stops at the first termination marker it takes and forwards exactly one marker to
/// the writer. Markers are never forwarded on behalf of other workers.
#[derive(Debug)]
pub struct TransformWorker<T> {
    worker_id: WorkerId,
    transform: Arc<T>,
    input_rx: StageRx<String>,
    output_tx: StageTx<TransformedLine>,
}

impl<T> TransformWorker<T>
where
    T: Transform + 'static,
{
    pub fn new(
        worker_id: WorkerId,
        transform: Arc<T>,
        input_rx: StageRx<String>,
        output_tx: StageTx<TransformedLine>,
    ) -> Self {
        Self {
            worker_id,
            transform,
            input_rx,
            output_tx,
        }
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }
}

impl<T> Worker for TransformWorker<T>
where
    T: Transform + 'static,
{
    type Output = TransformWorkerStats;

    fn worker_type(&self) -> WorkerType {
        WorkerType::Transform {
            worker_id: self.worker_id,
        }
    }

    async fn run(mut self) -> PipeResult<TransformWorkerStats> {
        debug!("starting transform worker");

        let mut stats = TransformWorkerStats {
            worker_id: self.worker_id,
            lines_processed: 0,
            markers_forwarded: 0,
        };

        loop {
            match self.input_rx.pop().await? {
                Entry::Payload(line) => {
                    let text = self.transform.apply(&line, self.worker_id);
                    self.output_tx
                        .push(Entry::Payload(TransformedLine::new(self.worker_id, text)))
                        .await?;
                    stats.lines_processed += 1;
                }
                Entry::End => {
                    self.output_tx.push(Entry::End).await?;
                    stats.markers_forwarded = 1;

                    info!(
                        lines_processed = stats.lines_processed,
                        "transform worker completed"
                    );

                    return Ok(stats);
                }
            }
        }
    }
}
