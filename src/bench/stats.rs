//! Per-batch structural statistics.
//!
//! Emitted to stdout as a JSON block after every batch for observability;
//! nothing downstream reads it back. The filtered edge count applies the
//! same window threshold the kernels just ran under.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::store::{FragmentationStats, TemporalGraph};
use crate::types::Timestamp;

/// Snapshot of the graph's structure after one batch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatchStats {
    /// Active vertex range, `highest_active_vertex + 1`.
    pub num_vertices: i64,
    /// Edges whose recent timestamp falls inside the current window.
    pub num_filtered_edges: i64,
    /// Storage health counters over the active range.
    #[serde(flatten)]
    pub fragmentation: FragmentationStats,
}

/// Count edges that satisfy the window filter across `0..nv`.
pub fn filtered_edge_count(graph: &TemporalGraph, nv: usize, modified_after: Timestamp) -> i64 {
    (0..nv as i64)
        .into_par_iter()
        .map(|v| graph.out_degree_modified_after(v, modified_after) as i64)
        .sum()
}

/// Gather the post-batch stats block.
pub fn batch_stats(graph: &TemporalGraph, nv: usize, modified_after: Timestamp) -> BatchStats {
    BatchStats {
        num_vertices: nv as i64,
        num_filtered_edges: filtered_edge_count(graph, nv, modified_after),
        fragmentation: graph.fragmentation_stats(nv),
    }
}

/// Print one stats block to stdout.
pub fn print_stats(stats: &BatchStats) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
