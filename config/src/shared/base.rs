use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one transform worker is required.
    #[error("`workers` must be at least 1")]
    WorkersZero,
    /// A bounded queue needs room for at least one entry.
    #[error("`queue.capacity` must be greater than 0 when set")]
    QueueCapacityZero,
    /// A file source or sink was configured without a path.
    #[error("`{0}.path` cannot be empty")]
    EmptyPath(&'static str),
}
