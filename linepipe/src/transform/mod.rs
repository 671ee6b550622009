//! Per-line transformations applied by the transform workers.

mod base;
mod case;

pub use base::Transform;
pub use case::CaseTransform;
