use crate::types::WorkerId;

/// A pure function from an input line to an output line.
///
/// A single instance is shared by every transform worker, hence the `Send + Sync` bound. The
/// worker id is handed over for transformations that tag their output; most ignore it.
pub trait Transform: Send + Sync {
    fn apply(&self, line: &str, worker_id: WorkerId) -> String;
}

impl<F> Transform for F
where
    F: Fn(&str, WorkerId) -> String + Send + Sync,
{
    fn apply(&self, line: &str, worker_id: WorkerId) -> String {
        self(line, worker_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_transforms() {
        let reverse = |line: &str, _: WorkerId| line.chars().rev().collect::<String>();

        assert_eq!(reverse.apply("abc", WorkerId(1)), "cba");
    }
}
