//! Helpers for testing pipelines.
//!
//! Available to the crate's own tests and, behind the `test-utils` feature, to integration
//! tests. Provides sources and sinks that fail on demand, a sink wrapper that notifies once a
//! number of lines was written, and helpers to compare line sets regardless of order.

#[cfg(feature = "failpoints")]
pub mod failpoints;
pub mod faulty;
pub mod lines;
pub mod notify;
pub mod pipeline;
pub mod test_sink_wrapper;
