use std::future::Future;

use crate::error::PipeResult;

/// Trait for systems the pipeline writes lines to.
///
/// The sink writer calls [`LineSink::open`] once before the first line, [`LineSink::write_line`]
/// once per line and [`LineSink::finish`] once after the last termination marker arrived. Lines
/// are written in the order they are handed over; the pipeline gives no guarantee that this
/// order matches the source order.
pub trait LineSink {
    /// Returns the name of the sink, used in logs.
    fn name() -> &'static str;

    /// Prepares the sink for writing, creating or truncating its target.
    fn open(&mut self) -> impl Future<Output = PipeResult<()>> + Send;

    /// Writes one line. The sink appends the line terminator.
    fn write_line(&mut self, line: &str) -> impl Future<Output = PipeResult<()>> + Send;

    /// Flushes everything written and releases the target.
    fn finish(&mut self) -> impl Future<Output = PipeResult<()>> + Send;
}
