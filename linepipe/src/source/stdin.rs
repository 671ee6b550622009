use tokio::io::BufReader;

use crate::error::PipeResult;
use crate::source::base::{LineSource, LineStream, read_lines};

/// Reads lines from the process standard input.
///
/// Standard input cannot be rewound, so opening it again continues where the previous stream
/// stopped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for StdinSource {
    fn name() -> &'static str {
        "stdin"
    }

    async fn open(&self) -> PipeResult<LineStream> {
        Ok(read_lines(BufReader::new(tokio::io::stdin()), Self::name()))
    }
}
