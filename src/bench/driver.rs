//! Trial controller and batch insertion.
//!
//! Drives the whole run: for each trial a fresh graph and scratch buffer,
//! then strict in-order batch replay with insert -> window -> dispatch ->
//! stats per batch. Trials share nothing; errors anywhere abort the run,
//! with trial-scoped resources reclaimed by drop on every exit path.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::info;

use super::dispatch;
use super::registry;
use super::scratch::ScratchBuffer;
use super::stats;
use crate::dataset::{Batch, Dataset};
use crate::error::{MareaError, Result};
use crate::hooks::Region;
use crate::store::TemporalGraph;
use crate::types::VertexId;

// Smallest graph capacity ever allocated; tiny datasets still get headroom.
const MIN_CAPACITY: usize = 64;

/// Kernel policy knobs with the stock defaults of the original driver.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Source vertex for both BFS variants.
    pub bfs_source: VertexId,
    /// Number of sampled sources for betweenness.
    pub betweenness_samples: usize,
    /// Fixed betweenness RNG seed; `None` draws from entropy.
    pub betweenness_seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            bfs_source: 3,
            betweenness_samples: 256,
            betweenness_seed: None,
        }
    }
}

/// Everything one benchmark run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Benchmark name to look up in the registry.
    pub alg_name: String,
    /// Path of the edge-log file.
    pub input_path: PathBuf,
    /// Number of batches to split the log into.
    pub num_batches: usize,
    /// Sliding window length, in batches.
    pub window_size: usize,
    /// Number of independent trials.
    pub num_trials: usize,
    /// Kernel policy overrides.
    pub config: DriverConfig,
}

/// Execute a full benchmark run. Any error is fatal to the whole run.
pub fn run(opts: &RunOptions) -> Result<()> {
    if opts.num_batches == 0 || opts.window_size == 0 || opts.num_trials == 0 {
        return Err(MareaError::InvalidArgument(
            "num_batches, window_size, and num_trials must be positive".into(),
        ));
    }

    // Configuration errors surface before any dataset or graph work.
    let bench = registry::lookup(&opts.alg_name)?;
    let dataset = Dataset::load(&opts.input_path, opts.num_batches)?;
    let capacity = graph_capacity(dataset.max_vertex_id());

    for trial in 0..opts.num_trials {
        info!(trial, capacity, benchmark = bench.name, "starting trial");
        let graph = TemporalGraph::with_capacity(capacity);
        let mut scratch = ScratchBuffer::for_benchmark(bench, graph.max_capacity());

        for i in 0..dataset.num_batches() {
            let batch = dataset.batch(i)?;
            info!(batch = i, edges = batch.edges.len(), "inserting batch");
            insert_batch(&graph, &batch, trial)?;

            let modified_after = dataset.window_start(i, opts.window_size);
            let nv = (graph.highest_active_vertex() + 1) as usize;
            dispatch::run_benchmark(
                bench,
                &graph,
                nv,
                &mut scratch,
                modified_after,
                trial,
                &opts.config,
            )?;

            let stats = stats::batch_stats(&graph, nv, modified_after);
            stats::print_stats(&stats)?;
        }
        // Graph and scratch drop here; the next trial starts cold.
    }

    Ok(())
}

/// Insert every edge of `batch`, in parallel with no defined order between
/// edges. The store serializes same-vertex inserts internally. The whole
/// insertion sits in one timed region; any edge failure aborts the run.
pub fn insert_batch(graph: &TemporalGraph, batch: &Batch<'_>, trial: usize) -> Result<()> {
    let _region = Region::enter("insert_batch", trial);
    if batch.directed {
        batch
            .edges
            .par_iter()
            .try_for_each(|e| graph.insert_edge(e.src, e.dst, e.weight, e.timestamp))
    } else {
        batch
            .edges
            .par_iter()
            .try_for_each(|e| graph.insert_edge_pair(e.src, e.dst, e.weight, e.timestamp))
    }
}

fn graph_capacity(max_vertex_id: VertexId) -> usize {
    let needed = (max_vertex_id + 1).max(1) as usize;
    needed.next_power_of_two().max(MIN_CAPACITY)
}
