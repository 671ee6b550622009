use std::fmt;
use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{Instrument, Span, info_span};

use crate::error::{ErrorKind, PipeResult};
use crate::pipe_error;
use crate::types::WorkerId;

/// Classification of pipeline tasks.
///
/// Used for span names in logs and to classify a task that panicked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorkerType {
    /// Task reading the source into the first stage queue.
    Reader,
    /// Task transforming lines between the two stage queues.
    Transform {
        /// Identity of the worker within its pool.
        worker_id: WorkerId,
    },
    /// Task writing the second stage queue into the sink.
    Writer,
}

impl WorkerType {
    /// Returns the span every log line of the task is recorded in.
    pub fn span(&self) -> Span {
        match self {
            WorkerType::Reader => info_span!("source_reader"),
            WorkerType::Transform { worker_id } => {
                info_span!("transform_worker", worker_id = %worker_id)
            }
            WorkerType::Writer => info_span!("sink_writer"),
        }
    }

    /// Returns the error kind reported when the task panics.
    pub fn panic_kind(&self) -> ErrorKind {
        match self {
            WorkerType::Reader => ErrorKind::ReaderPanic,
            WorkerType::Transform { .. } => ErrorKind::TransformWorkerPanic,
            WorkerType::Writer => ErrorKind::WriterPanic,
        }
    }
}

impl fmt::Display for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerType::Reader => f.write_str("source reader"),
            WorkerType::Transform { worker_id } => write!(f, "transform {worker_id}"),
            WorkerType::Writer => f.write_str("sink writer"),
        }
    }
}

/// Trait for pipeline tasks.
///
/// [`Worker::run`] holds the task body. [`Worker::start`] spawns it on the current tokio runtime,
/// inside the span of its [`WorkerType`], and returns a handle to wait on it.
pub trait Worker: Sized + Send + 'static {
    /// Value produced by a task that ran to completion.
    type Output: Send + 'static;

    fn worker_type(&self) -> WorkerType;

    /// Runs the task to completion.
    fn run(self) -> impl Future<Output = PipeResult<Self::Output>> + Send;

    /// Spawns the task.
    fn start(self) -> WorkerHandle<Self::Output> {
        let worker_type = self.worker_type();
        let span = worker_type.span();
        let handle = tokio::spawn(self.run().instrument(span));

        WorkerHandle {
            worker_type,
            handle,
        }
    }
}

/// Handle of a spawned [`Worker`].
#[derive(Debug)]
pub struct WorkerHandle<T> {
    worker_type: WorkerType,
    handle: JoinHandle<PipeResult<T>>,
}

impl<T> WorkerHandle<T> {
    pub fn worker_type(&self) -> WorkerType {
        self.worker_type
    }

    /// Waits for the task and returns its result.
    ///
    /// A panic is reported with the [`WorkerType::panic_kind`] of the task, a cancelled task as
    /// [`ErrorKind::TaskInterrupted`].
    pub async fn wait(self) -> PipeResult<T> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(pipe_error!(
                ErrorKind::TaskInterrupted,
                "Pipeline task was cancelled",
                self.worker_type
            )),
            Err(join_err) => Err(pipe_error!(
                self.worker_type.panic_kind(),
                "Pipeline task panicked",
                format!("{}: {join_err}", self.worker_type)
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Panicking;

    impl Worker for Panicking {
        type Output = ();

        fn worker_type(&self) -> WorkerType {
            WorkerType::Writer
        }

        async fn run(self) -> PipeResult<()> {
            panic!("writer exploded");
        }
    }

    struct Answering;

    impl Worker for Answering {
        type Output = u8;

        fn worker_type(&self) -> WorkerType {
            WorkerType::Reader
        }

        async fn run(self) -> PipeResult<u8> {
            Ok(42)
        }
    }

    #[tokio::test]
    async fn returns_task_output() {
        assert_eq!(Answering.start().wait().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn panic_is_classified_by_worker_type() {
        let err = Panicking.start().wait().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::WriterPanic);
        assert!(err.detail().unwrap().starts_with("sink writer"));
    }

    #[test]
    fn transform_worker_names_its_id() {
        let worker_type = WorkerType::Transform {
            worker_id: WorkerId(3),
        };

        assert_eq!(worker_type.to_string(), "transform worker-3");
        assert_eq!(worker_type.panic_kind(), ErrorKind::TransformWorkerPanic);
    }
}
