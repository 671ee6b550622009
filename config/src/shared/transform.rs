use serde::{Deserialize, Serialize};

/// Case conversion applied to every line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Case {
    #[default]
    Upper,
    Lower,
    /// Lines pass through unchanged.
    Preserve,
}

/// Per-line transformation settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub case: Case,
    /// Appends ` [worker-<n>]` to every output line, naming the worker that produced it.
    #[serde(default)]
    pub tag_worker: bool,
}
