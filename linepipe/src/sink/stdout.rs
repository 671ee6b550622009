use tokio::io::{AsyncWriteExt, BufWriter, Stdout};

use crate::error::{ErrorKind, PipeError, PipeResult};
use crate::pipe_error;
use crate::sink::base::LineSink;

/// Writes lines to the process standard output.
#[derive(Debug)]
pub struct StdoutSink {
    writer: BufWriter<Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

fn write_failed(err: std::io::Error) -> PipeError {
    pipe_error!(
        ErrorKind::SinkWriteFailed,
        "Standard output could not be written",
        source: err
    )
}

impl LineSink for StdoutSink {
    fn name() -> &'static str {
        "stdout"
    }

    async fn open(&mut self) -> PipeResult<()> {
        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> PipeResult<()> {
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(write_failed)?;
        self.writer.write_all(b"\n").await.map_err(write_failed)
    }

    async fn finish(&mut self) -> PipeResult<()> {
        self.writer.flush().await.map_err(write_failed)
    }
}
