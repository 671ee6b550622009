use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

use crate::error::PipeResult;
use crate::sink::LineSink;
use crate::test_utils::notify::TimedNotify;

struct Inner<K> {
    wrapped_sink: K,
    lines: Vec<String>,
    line_conditions: Vec<(usize, Arc<Notify>)>,
    open_called: bool,
    finish_called: bool,
}

impl<K> Inner<K> {
    fn check_conditions(&mut self) {
        let written = self.lines.len();
        self.line_conditions.retain(|(count, notify)| {
            let should_retain = written < *count;
            if !should_retain {
                notify.notify_one();
            }
            should_retain
        });
    }
}

/// Wraps a [`LineSink`] and records every call made to it.
///
/// Clones share the recorded state, so a clone kept by the test observes what the pipeline
/// wrote. Lines are recorded only once the wrapped sink accepted them.
#[derive(Clone)]
pub struct TestSinkWrapper<K> {
    inner: Arc<Mutex<Inner<K>>>,
}

impl<K> TestSinkWrapper<K> {
    pub fn wrap(sink: K) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                wrapped_sink: sink,
                lines: Vec::new(),
                line_conditions: Vec::new(),
                open_called: false,
                finish_called: false,
            })),
        }
    }

    /// Returns a notification fired once at least `count` lines were written.
    pub async fn wait_for_lines(&self, count: usize) -> TimedNotify {
        let notify = Arc::new(Notify::new());

        let mut inner = self.inner.lock().await;
        inner.line_conditions.push((count, notify.clone()));
        inner.check_conditions();

        TimedNotify::new(notify)
    }

    pub async fn lines(&self) -> Vec<String> {
        self.inner.lock().await.lines.clone()
    }

    pub async fn open_called(&self) -> bool {
        self.inner.lock().await.open_called
    }

    pub async fn finish_called(&self) -> bool {
        self.inner.lock().await.finish_called
    }
}

impl<K: fmt::Debug> fmt::Debug for TestSinkWrapper<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSinkWrapper").finish_non_exhaustive()
    }
}

impl<K> LineSink for TestSinkWrapper<K>
where
    K: LineSink + Send,
{
    fn name() -> &'static str {
        K::name()
    }

    async fn open(&mut self) -> PipeResult<()> {
        let mut inner = self.inner.lock().await;
        inner.open_called = true;
        inner.wrapped_sink.open().await
    }

    async fn write_line(&mut self, line: &str) -> PipeResult<()> {
        let mut inner = self.inner.lock().await;
        inner.wrapped_sink.write_line(line).await?;
        inner.lines.push(line.to_owned());
        inner.check_conditions();

        Ok(())
    }

    async fn finish(&mut self) -> PipeResult<()> {
        let mut inner = self.inner.lock().await;
        inner.finish_called = true;
        inner.wrapped_sink.finish().await
    }
}
