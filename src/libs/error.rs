/// Errors raised while classifying nodes or reducing worker state.
#[derive(thiserror::Error, Debug)]
pub enum MawError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A word was flushed after the shared sink had been closed by `combine`.
    #[error("Output sink already closed")]
    SinkClosed,
    /// Another worker panicked while holding the sink lock.
    #[error("Output sink lock poisoned")]
    SinkPoisoned,
    /// `jointFreq[t][left][right] > 0` without the matching extension bits.
    #[error("Inconsistent node stats in text {text}: pair ({left}, {right}) counted but not masked")]
    InconsistentStats { text: usize, left: usize, right: usize },
    #[error("Symbol {0} is outside the DNA5 alphabet")]
    BadSymbol(u8),
    /// The driver visited a node whose ancestors were never visited by this worker.
    #[error("Node at depth {depth} visited but only {established} ancestors are on the path")]
    PathOrder { depth: usize, established: usize },
    /// Per-node frequencies are 32-bit counters.
    #[error("Text of {0} symbols is too long for 32-bit frequencies")]
    TextTooLong(usize),
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}
