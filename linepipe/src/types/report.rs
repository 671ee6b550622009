use crate::types::WorkerId;

/// Outcome of the source reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Lines read from the source and pushed to the workers.
    pub lines_read: u64,
    /// Termination markers pushed to the workers.
    pub markers_sent: usize,
}

/// Outcome of a single transform worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformWorkerStats {
    pub worker_id: WorkerId,
    pub lines_processed: u64,
    /// Markers forwarded to the writer, one when the worker ran to completion.
    pub markers_forwarded: usize,
}

/// Outcome of the sink writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub lines_written: u64,
    pub markers_received: usize,
}

/// Summary of a pipeline run in which every stage completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub reader: ReaderStats,
    /// Per worker outcomes, ordered by worker id.
    pub workers: Vec<TransformWorkerStats>,
    pub writer: WriterStats,
}

impl PipelineReport {
    /// Total number of lines transformed across all workers.
    pub fn lines_processed(&self) -> u64 {
        self.workers.iter().map(|worker| worker.lines_processed).sum()
    }

    /// Total number of markers forwarded by the workers.
    pub fn markers_forwarded(&self) -> usize {
        self.workers.iter().map(|worker| worker.markers_forwarded).sum()
    }
}
