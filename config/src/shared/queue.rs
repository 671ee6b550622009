use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Capacity settings shared by both stage queues.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum number of entries buffered per queue.
    ///
    /// `None` keeps the queues unbounded, so pushing never waits. A value bounds both queues and
    /// makes producers wait for free capacity.
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl QueueConfig {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == Some(0) {
            return Err(ValidationError::QueueCapacityZero);
        }

        Ok(())
    }
}
