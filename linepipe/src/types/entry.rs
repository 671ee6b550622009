use crate::types::WorkerId;

/// An entry carried by a stage queue.
///
/// The termination marker is a dedicated variant rather than a reserved payload value, so every
/// possible line of text, including one reading `EOF`, travels as a normal payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    /// Data for the next stage.
    Payload(T),
    /// No more payloads follow from the sender of this marker.
    End,
}

/// A line produced by a transform worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedLine {
    /// Worker that produced the line. Diagnostic only, the sink never sees it.
    pub worker_id: WorkerId,
    pub text: String,
}

impl TransformedLine {
    pub fn new(worker_id: WorkerId, text: String) -> Self {
        Self { worker_id, text }
    }
}
