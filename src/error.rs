//! Crate-wide error type.
//!
//! Every failure in this crate is fatal to the run: the driver propagates
//! errors up to the binary, which reports them and exits non-zero. There is
//! no retry or partial-continuation path.

use std::io;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MareaError>;

/// All fatal conditions a benchmark run can hit.
#[derive(Debug, Error)]
pub enum MareaError {
    /// Underlying I/O failure while reading a dataset.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Malformed or inconsistent dataset contents.
    #[error("dataset error: {0}")]
    Dataset(String),
    /// Batch index beyond the number of batches the dataset was split into.
    #[error("batch {index} out of range ({available} batches loaded)")]
    BatchOutOfRange {
        /// Requested batch index.
        index: usize,
        /// Number of batches actually available.
        available: usize,
    },
    /// Benchmark name not present in the registry.
    #[error("benchmark '{0}' does not exist")]
    UnknownBenchmark(String),
    /// Caller-supplied value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Failure while serializing the stats block.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
