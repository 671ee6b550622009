//! Concurrency primitives coordinating the pipeline stages.
//!
//! The pipeline runs one reader task, a pool of transform worker tasks and one writer task, all
//! concurrently. They coordinate through two mechanisms only:
//!
//! - [`queue`]: the stage queues carrying payloads and termination markers from one stage to the
//!   next. Queue A fans out from the reader to the workers (competing consumers), queue B fans in
//!   from the workers to the writer.
//! - [`shutdown`]: a broadcast cancellation signal. Every task blocked on a queue observes it and
//!   exits promptly, which is the only way to stop a pipeline before its markers have flowed
//!   through.
//!
//! Termination never relies on a shared counter. Each producer sends one marker per consumer of
//! the queue it feeds, and the single writer counts the markers it receives locally.

pub mod queue;
pub mod shutdown;
