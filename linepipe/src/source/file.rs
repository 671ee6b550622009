use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::BufReader;

use crate::error::{ErrorKind, PipeResult};
use crate::pipe_error;
use crate::source::base::{LineSource, LineStream, read_lines};

/// Reads lines from a text file.
///
/// Each call to [`LineSource::open`] opens the file again and reads it from the start.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSource for FileSource {
    fn name() -> &'static str {
        "file"
    }

    async fn open(&self) -> PipeResult<LineStream> {
        let file = File::open(&self.path).await.map_err(|err| {
            pipe_error!(
                ErrorKind::SourceUnavailable,
                "Source file could not be opened",
                self.path.display(),
                source: err
            )
        })?;

        Ok(read_lines(BufReader::new(file), Self::name()))
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use super::*;

    #[tokio::test]
    async fn reads_every_line_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        tokio::fs::write(&path, "a\nb\nc\n").await.unwrap();

        let source = FileSource::new(&path);
        let lines: Vec<String> = source.open().await.unwrap().try_collect().await.unwrap();

        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn reopening_restarts_from_the_beginning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        tokio::fs::write(&path, "x\ny").await.unwrap();

        let source = FileSource::new(&path);
        let first: Vec<String> = source.open().await.unwrap().try_collect().await.unwrap();
        let second: Vec<String> = source.open().await.unwrap().try_collect().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.txt"));

        let err = source.open().await.err().unwrap();

        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert!(err.detail().unwrap().ends_with("missing.txt"));
    }
}
