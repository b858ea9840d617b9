//! Benchmark setup error type.

use graphseg_core::{GridError, SegmentError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The synthetic grid was rejected.
    #[error("synthetic grid construction failed: {0}")]
    Grid(#[from] GridError),
    /// Segmenter configuration failed.
    #[error("segmenter configuration failed: {0}")]
    Segment(#[from] SegmentError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
}
