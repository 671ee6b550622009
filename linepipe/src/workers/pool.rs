use tokio::task::JoinSet;
use tracing::{Instrument, debug, error};

use crate::error::{ErrorKind, PipeResult};
use crate::pipe_error;
use crate::transform::Transform;
use crate::types::{TransformWorkerStats, WorkerId};
use crate::workers::base::Worker;
use crate::workers::transform::TransformWorker;

/// Owns the transform workers of a pipeline.
#[derive(Debug, Default)]
pub struct TransformWorkerPool {
    join_set: JoinSet<(WorkerId, PipeResult<TransformWorkerStats>)>,
}

impl TransformWorkerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `worker` into the pool.
    pub fn spawn<T>(&mut self, worker: TransformWorker<T>)
    where
        T: Transform + 'static,
    {
        let worker_id = worker.worker_id();
        let span = worker.worker_type().span();

        self.join_set.spawn(
            async move {
                let result = worker.run().await;
                (worker_id, result)
            }
            .instrument(span),
        );

        debug!(%worker_id, "spawned transform worker in pool");
    }

    pub fn len(&self) -> usize {
        self.join_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.join_set.is_empty()
    }

    /// Waits for every worker in the pool.
    ///
    /// Returns the stats of all workers ordered by id, or every error encountered, including
    /// panics, once all workers are done.
    pub async fn wait_all(mut self) -> PipeResult<Vec<TransformWorkerStats>> {
        let mut stats = Vec::with_capacity(self.join_set.len());
        let mut errors = Vec::new();

        while let Some(result) = self.join_set.join_next().await {
            match result {
                Ok((_, Ok(worker_stats))) => stats.push(worker_stats),
                Ok((worker_id, Err(err))) => {
                    error!(%worker_id, error = %err, "transform worker completed with error");
                    errors.push(err);
                }
                Err(join_err) => {
                    if join_err.is_cancelled() {
                        errors.push(pipe_error!(
                            ErrorKind::TaskInterrupted,
                            "Transform worker was cancelled"
                        ));
                    } else {
                        errors.push(pipe_error!(
                            ErrorKind::TransformWorkerPanic,
                            "Transform worker panicked",
                            join_err
                        ));
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors.into());
        }

        stats.sort_by_key(|worker_stats| worker_stats.worker_id);

        Ok(stats)
    }
}
