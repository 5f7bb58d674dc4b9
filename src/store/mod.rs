//! Fixed-capacity temporal graph store.
//!
//! An in-memory, concurrently-insertable adjacency structure keyed by
//! vertex id. Edges carry first/most-recent modification timestamps and are
//! kept in per-vertex chains of fixed-size edge blocks, which is what gives
//! the fragmentation statistics their meaning: deletions tombstone slots in
//! place, and partially-filled or holed blocks are reported per batch.
//!
//! The store's maximum vertex capacity is fixed at creation and never
//! grows; callers address scratch memory by absolute vertex id up to that
//! capacity.

mod block;
mod graph;

pub use graph::{FragmentationStats, TemporalGraph};
