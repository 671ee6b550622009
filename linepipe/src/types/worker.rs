use std::fmt;

/// Identity of a transform worker, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub usize);

impl WorkerId {
    /// Returns the ids of a pool of `count` workers.
    pub fn range(count: usize) -> impl Iterator<Item = WorkerId> {
        (1..=count).map(WorkerId)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}
