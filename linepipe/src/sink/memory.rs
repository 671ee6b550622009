use std::sync::Arc;

use tokio::sync::Mutex;

use crate::bail;
use crate::error::{ErrorKind, PipeResult};
use crate::sink::base::LineSink;

#[derive(Debug, Default)]
struct Inner {
    lines: Vec<String>,
    opened: bool,
    finished: bool,
}

/// Collects lines in memory.
///
/// Clones share the same buffer, so a clone kept outside the pipeline can inspect what was
/// written once the pipeline completed.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far, in write order.
    pub async fn lines(&self) -> Vec<String> {
        self.inner.lock().await.lines.clone()
    }

    /// Returns `true` once the sink was finished.
    pub async fn is_finished(&self) -> bool {
        self.inner.lock().await.finished
    }
}

impl LineSink for MemorySink {
    fn name() -> &'static str {
        "memory"
    }

    async fn open(&mut self) -> PipeResult<()> {
        let mut inner = self.inner.lock().await;
        inner.lines.clear();
        inner.opened = true;
        inner.finished = false;

        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> PipeResult<()> {
        let mut inner = self.inner.lock().await;
        if !inner.opened || inner.finished {
            bail!(
                ErrorKind::InvalidState,
                "Memory sink written outside of open and finish"
            );
        }

        inner.lines.push(line.to_owned());

        Ok(())
    }

    async fn finish(&mut self) -> PipeResult<()> {
        self.inner.lock().await.finished = true;

        Ok(())
    }
}
