//! Stage queues connecting the pipeline stages.
//!
//! A stage queue is a FIFO of [`Entry`] values with any number of producers ([`StageTx`]) and any
//! number of competing consumers ([`StageRx`]): every entry is delivered to exactly one consumer.
//! The queue is unbounded by default, in which case pushing never waits. When created with a
//! capacity, pushing waits for free room, giving backpressure from slow consumers to producers.
//!
//! Both operations observe the pipeline [`ShutdownRx`] while waiting and fail with
//! [`ErrorKind::TaskInterrupted`] once shutdown is signalled.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::bail;
use crate::concurrency::shutdown::ShutdownRx;
use crate::error::{ErrorKind, PipeResult};
use crate::types::Entry;

#[derive(Debug)]
enum TxInner<T> {
    Unbounded(mpsc::UnboundedSender<Entry<T>>),
    Bounded(mpsc::Sender<Entry<T>>),
}

impl<T> Clone for TxInner<T> {
    fn clone(&self) -> Self {
        match self {
            TxInner::Unbounded(tx) => TxInner::Unbounded(tx.clone()),
            TxInner::Bounded(tx) => TxInner::Bounded(tx.clone()),
        }
    }
}

#[derive(Debug)]
enum RxInner<T> {
    Unbounded(mpsc::UnboundedReceiver<Entry<T>>),
    Bounded(mpsc::Receiver<Entry<T>>),
}

impl<T> RxInner<T> {
    async fn recv(&mut self) -> Option<Entry<T>> {
        match self {
            RxInner::Unbounded(rx) => rx.recv().await,
            RxInner::Bounded(rx) => rx.recv().await,
        }
    }
}

/// Producing handle of a stage queue.
#[derive(Debug)]
pub struct StageTx<T> {
    inner: TxInner<T>,
    shutdown_rx: ShutdownRx,
}

impl<T> Clone for StageTx<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            shutdown_rx: self.shutdown_rx.clone(),
        }
    }
}

impl<T> StageTx<T> {
    /// Appends `entry` to the queue.
    ///
    /// Never waits on an unbounded queue. On a bounded queue, waits until there is room or
    /// shutdown is signalled.
    pub async fn push(&mut self, entry: Entry<T>) -> PipeResult<()> {
        if self.shutdown_rx.is_shutdown() {
            bail!(
                ErrorKind::TaskInterrupted,
                "Push interrupted by shutdown"
            );
        }

        let shutdown_rx = &mut self.shutdown_rx;
        let sent = match &self.inner {
            TxInner::Unbounded(tx) => tx.send(entry).is_ok(),
            TxInner::Bounded(tx) => {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.wait_for_shutdown() => {
                        bail!(
                            ErrorKind::TaskInterrupted,
                            "Push interrupted by shutdown"
                        );
                    }
                    result = tx.send(entry) => result.is_ok(),
                }
            }
        };

        if !sent {
            bail!(
                ErrorKind::InvalidState,
                "Stage queue has no consumers left",
                "every consumer of the queue was dropped before the producer finished"
            );
        }

        Ok(())
    }

    /// Pushes `count` termination markers, one per consumer of the queue.
    pub async fn push_markers(&mut self, count: usize) -> PipeResult<usize> {
        for sent in 0..count {
            if let Err(err) = self.push(Entry::End).await {
                tracing::warn!(sent, expected = count, "stopped sending termination markers");
                return Err(err);
            }
        }

        Ok(count)
    }
}

/// Consuming handle of a stage queue.
///
/// Clones compete for entries: each entry is returned by exactly one [`StageRx::pop`] call across
/// all clones.
#[derive(Debug)]
pub struct StageRx<T> {
    inner: Arc<Mutex<RxInner<T>>>,
    shutdown_rx: ShutdownRx,
}

impl<T> Clone for StageRx<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            shutdown_rx: self.shutdown_rx.clone(),
        }
    }
}

impl<T> StageRx<T> {
    /// Removes and returns the oldest entry, waiting until one is available.
    ///
    /// Fails with [`ErrorKind::TaskInterrupted`] when shutdown is signalled while waiting, and
    /// with [`ErrorKind::InvalidState`] when every producer is gone and the queue is drained,
    /// since no termination marker can arrive anymore.
    pub async fn pop(&mut self) -> PipeResult<Entry<T>> {
        if self.shutdown_rx.is_shutdown() {
            bail!(ErrorKind::TaskInterrupted, "Pop interrupted by shutdown");
        }

        let inner = &self.inner;
        let shutdown_rx = &mut self.shutdown_rx;
        let entry = tokio::select! {
            biased;

            _ = shutdown_rx.wait_for_shutdown() => {
                bail!(ErrorKind::TaskInterrupted, "Pop interrupted by shutdown");
            }
            entry = async { inner.lock().await.recv().await } => entry,
        };

        match entry {
            Some(entry) => Ok(entry),
            None => bail!(
                ErrorKind::InvalidState,
                "Stage queue has no producers left",
                "every producer of the queue was dropped without sending its termination marker"
            ),
        }
    }
}

/// Creates a stage queue.
///
/// With `capacity` set to [`None`] the queue is unbounded, otherwise it holds at most `capacity`
/// entries. A zero capacity is rejected by configuration validation and treated as one here.
pub fn create_stage_queue<T>(
    capacity: Option<usize>,
    shutdown_rx: ShutdownRx,
) -> (StageTx<T>, StageRx<T>) {
    let (tx, rx) = match capacity {
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (TxInner::Unbounded(tx), RxInner::Unbounded(rx))
        }
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (TxInner::Bounded(tx), RxInner::Bounded(rx))
        }
    };

    (
        StageTx {
            inner: tx,
            shutdown_rx: shutdown_rx.clone(),
        },
        StageRx {
            inner: Arc::new(Mutex::new(rx)),
            shutdown_rx,
        },
    )
}
