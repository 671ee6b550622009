use std::sync::Arc;

use futures::StreamExt;
use futures::stream;

use crate::error::PipeResult;
use crate::source::base::{LineSource, LineStream};

/// Serves a fixed list of lines held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Arc<[String]>,
}

impl MemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for MemorySource {
    fn name() -> &'static str {
        "memory"
    }

    async fn open(&self) -> PipeResult<LineStream> {
        let lines = self.lines.clone();
        let stream = stream::iter(0..lines.len()).map(move |index| Ok(lines[index].clone()));

        Ok(stream.boxed())
    }
}
