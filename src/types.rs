//! Scalar types shared across the crate.
//!
//! Vertex ids and timestamps stay plain `i64` rather than newtypes: kernel
//! lane indexing and window arithmetic operate on them directly, and the
//! store addresses scratch slots by absolute vertex id.

/// Vertex identifier, `0..max_capacity`.
pub type VertexId = i64;

/// Edge modification timestamp. Larger is more recent.
pub type Timestamp = i64;

/// Edge weight.
pub type Weight = f64;

/// Window threshold meaning "the whole history is in window".
pub const TIMESTAMP_MIN: Timestamp = i64::MIN;
