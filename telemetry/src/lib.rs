//! Telemetry setup shared by linepipe binaries and tests.

pub mod tracing;
