use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{ErrorKind, PipeResult};
use crate::sink::base::LineSink;
use crate::{bail, pipe_error};

/// Writes lines to a text file, one per line, each terminated by `\n`.
///
/// The file is created, or truncated when it exists, on [`LineSink::open`]. Writes are buffered
/// and only guaranteed to be on disk once [`LineSink::finish`] returned.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    fn write_failed(&self, err: std::io::Error) -> crate::error::PipeError {
        pipe_error!(
            ErrorKind::SinkWriteFailed,
            "Sink file could not be written",
            self.path.display(),
            source: err
        )
    }
}

impl LineSink for FileSink {
    fn name() -> &'static str {
        "file"
    }

    async fn open(&mut self) -> PipeResult<()> {
        let file = File::create(&self.path).await.map_err(|err| {
            pipe_error!(
                ErrorKind::SinkUnavailable,
                "Sink file could not be created",
                self.path.display(),
                source: err
            )
        })?;

        self.writer = Some(BufWriter::new(file));

        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> PipeResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            bail!(
                ErrorKind::InvalidState,
                "Sink file written before being opened",
                self.path.display()
            );
        };

        let result = match writer.write_all(line.as_bytes()).await {
            Ok(()) => writer.write_all(b"\n").await,
            Err(err) => Err(err),
        };

        result.map_err(|err| self.write_failed(err))
    }

    async fn finish(&mut self) -> PipeResult<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };

        if let Err(err) = writer.flush().await {
            return Err(self.write_failed(err));
        }

        if let Err(err) = writer.get_ref().sync_all().await {
            return Err(self.write_failed(err));
        }

        Ok(())
    }
}
