//! Sources and sinks failing at a chosen point.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;

use crate::error::{ErrorKind, PipeResult};
use crate::sink::LineSink;
use crate::source::{LineSource, LineStream};
use crate::{bail, pipe_error};

/// Where a [`FaultySource`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFault {
    /// Opening the source fails.
    Open,
    /// Reading fails after the given number of lines.
    ReadAfter(usize),
    /// The source never ends after its lines, like an idle standard input.
    Hang,
}

/// A source serving fixed lines and then failing as configured.
#[derive(Debug, Clone)]
pub struct FaultySource {
    lines: Arc<[String]>,
    fault: SourceFault,
}

impl FaultySource {
    pub fn new<I, S>(lines: I, fault: SourceFault) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            fault,
        }
    }
}

impl LineSource for FaultySource {
    fn name() -> &'static str {
        "faulty"
    }

    async fn open(&self) -> PipeResult<LineStream> {
        let lines = self.lines.clone();

        match self.fault {
            SourceFault::Open => bail!(
                ErrorKind::SourceUnavailable,
                "Faulty source could not be opened"
            ),
            SourceFault::ReadAfter(count) => {
                let count = count.min(lines.len());
                let served = stream::iter(0..count).map(move |index| Ok(lines[index].clone()));
                let failure = stream::once(async {
                    Err(pipe_error!(
                        ErrorKind::SourceReadFailed,
                        "Faulty source failed mid stream"
                    ))
                });

                Ok(served.chain(failure).boxed())
            }
            SourceFault::Hang => {
                let served = stream::iter(0..lines.len()).map(move |index| Ok(lines[index].clone()));

                Ok(served.chain(stream::pending()).boxed())
            }
        }
    }
}

/// Where a [`FaultySink`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFault {
    /// Opening the sink fails.
    Open,
    /// Writing fails once the given number of lines was accepted.
    WriteAfter(usize),
}

/// A sink accepting lines and then failing as configured.
#[derive(Debug, Clone)]
pub struct FaultySink {
    fault: SinkFault,
    written: usize,
}

impl FaultySink {
    pub fn new(fault: SinkFault) -> Self {
        Self { fault, written: 0 }
    }
}

impl LineSink for FaultySink {
    fn name() -> &'static str {
        "faulty"
    }

    async fn open(&mut self) -> PipeResult<()> {
        if self.fault == SinkFault::Open {
            bail!(ErrorKind::SinkUnavailable, "Faulty sink could not be opened");
        }

        Ok(())
    }

    async fn write_line(&mut self, _line: &str) -> PipeResult<()> {
        if let SinkFault::WriteAfter(count) = self.fault
            && self.written >= count
        {
            bail!(
                ErrorKind::SinkWriteFailed,
                "Faulty sink failed to write",
                format!("failed after {} lines", self.written)
            );
        }

        self.written += 1;

        Ok(())
    }

    async fn finish(&mut self) -> PipeResult<()> {
        Ok(())
    }
}
