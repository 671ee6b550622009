use config::shared::{Case, TransformConfig};

use crate::transform::base::Transform;
use crate::types::WorkerId;

/// Converts the case of every line, optionally tagging it with the producing worker.
///
/// The default converts to upper case without tagging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseTransform {
    case: Case,
    tag_worker: bool,
}

impl CaseTransform {
    pub fn new(case: Case) -> Self {
        Self {
            case,
            tag_worker: false,
        }
    }

    /// Appends ` [worker-<n>]` to every line.
    pub fn with_worker_tag(mut self) -> Self {
        self.tag_worker = true;
        self
    }
}

impl From<&TransformConfig> for CaseTransform {
    fn from(config: &TransformConfig) -> Self {
        Self {
            case: config.case,
            tag_worker: config.tag_worker,
        }
    }
}

impl Transform for CaseTransform {
    fn apply(&self, line: &str, worker_id: WorkerId) -> String {
        let mut output = match self.case {
            Case::Upper => line.to_uppercase(),
            Case::Lower => line.to_lowercase(),
            Case::Preserve => line.to_owned(),
        };

        if self.tag_worker {
            output.push_str(&format!(" [{worker_id}]"));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uppercases_without_tag() {
        let transform = CaseTransform::default();

        assert_eq!(transform.apply("hello World", WorkerId(3)), "HELLO WORLD");
        assert_eq!(transform.apply("", WorkerId(3)), "");
    }

    #[test]
    fn converts_unicode_case() {
        assert_eq!(
            CaseTransform::new(Case::Upper).apply("straße", WorkerId(1)),
            "STRASSE"
        );
        assert_eq!(
            CaseTransform::new(Case::Lower).apply("ÀB", WorkerId(1)),
            "àb"
        );
    }

    #[test]
    fn same_input_gives_same_output() {
        let transform = CaseTransform::default();

        assert_eq!(
            transform.apply("Mixed Case", WorkerId(1)),
            transform.apply("Mixed Case", WorkerId(2))
        );
    }

    #[test]
    fn worker_tag_is_appended() {
        let transform = CaseTransform::new(Case::Preserve).with_worker_tag();

        assert_eq!(transform.apply("abc", WorkerId(2)), "abc [worker-2]");
    }

    #[test]
    fn built_from_config() {
        let config = TransformConfig {
            case: Case::Lower,
            tag_worker: true,
        };

        assert_eq!(
            CaseTransform::from(&config).apply("ABC", WorkerId(1)),
            "abc [worker-1]"
        );
    }
}
