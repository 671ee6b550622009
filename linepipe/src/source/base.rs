use std::future::Future;

use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::{ErrorKind, PipeResult};
use crate::pipe_error;

/// Stream of lines produced by an opened [`LineSource`].
///
/// A read failure is yielded as an `Err` item, after which the stream ends.
pub type LineStream = BoxStream<'static, PipeResult<String>>;

/// Trait for systems the pipeline can read lines from.
///
/// [`LineSource::open`] may be called again to restart reading from the beginning, where the
/// underlying medium allows it. Failing to open reports [`ErrorKind::SourceUnavailable`], failing
/// mid-stream reports [`ErrorKind::SourceReadFailed`]. Neither is fatal to the pipeline: the
/// reader stops and still terminates the downstream stages.
pub trait LineSource {
    /// Returns the name of the source, used in logs.
    fn name() -> &'static str;

    /// Opens the source and returns the stream of its lines.
    fn open(&self) -> impl Future<Output = PipeResult<LineStream>> + Send;
}

/// Turns a buffered reader into a [`LineStream`].
///
/// Line terminators (`\n` or `\r\n`) are stripped from every line.
pub(crate) fn read_lines<R>(reader: R, source_name: &'static str) -> LineStream
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    stream::try_unfold(reader.lines(), move |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Ok(Some((line, lines))),
            Ok(None) => Ok(None),
            Err(err) => Err(pipe_error!(
                ErrorKind::SourceReadFailed,
                "Source read failed",
                source_name,
                source: err
            )),
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use super::*;

    #[tokio::test]
    async fn strips_line_terminators() {
        let input: &'static [u8] = b"first\r\nsecond\n\nlast";

        let lines: Vec<String> = read_lines(input, "test").try_collect().await.unwrap();

        assert_eq!(lines, vec!["first", "second", "", "last"]);
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_read_failure() {
        let input: &'static [u8] = b"ok\n\xff\xfe\n";

        let mut lines = read_lines(input, "test");

        assert_eq!(lines.next().await.unwrap().unwrap(), "ok");
        let err = lines.next().await.unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceReadFailed);
        assert!(lines.next().await.is_none());
    }
}
