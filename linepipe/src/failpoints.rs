use fail::fail_point;

use crate::bail;
use crate::error::{ErrorKind, PipeResult};

pub const SOURCE_READER_BEFORE_LINE: &str = "source_reader.before_line";
pub const SINK_WRITER_BEFORE_WRITE: &str = "sink_writer.before_write";

/// Evaluates the failpoint `name`, returning an error when it is configured to return.
///
/// The return parameter picks the error kind, either `source_read` or `sink_write`. Anything else
/// yields [`ErrorKind::Unknown`].
pub fn pipe_fail_point(name: &str) -> PipeResult<()> {
    fail_point!(name, |parameter| {
        let mut error_kind = ErrorKind::Unknown;
        if let Some(parameter) = parameter {
            error_kind = match parameter.as_str() {
                "source_read" => ErrorKind::SourceReadFailed,
                "sink_write" => ErrorKind::SinkWriteFailed,
                _ => ErrorKind::Unknown,
            }
        }

        bail!(
            error_kind,
            "An error occurred in a fail point",
            format!("The failpoint '{name}' returned an error")
        );
    });

    Ok(())
}
