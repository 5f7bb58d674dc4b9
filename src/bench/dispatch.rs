//! Kernel dispatch.
//!
//! Carves the trial's scratch buffer into the lane layout the requested
//! kernel expects and invokes it bounded by the window threshold. Every
//! kernel call sits inside exactly one timed region; lane carving and
//! window bookkeeping happen outside it. The composite `"all"` iterates the
//! concrete registry entries in order, re-carving lanes per kernel.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use super::driver::DriverConfig;
use super::registry::{self, Benchmark, COMPOSITE};
use super::scratch::ScratchBuffer;
use crate::error::{MareaError, Result};
use crate::hooks::Region;
use crate::kernels;
use crate::store::TemporalGraph;
use crate::types::Timestamp;

/// PageRank damping factor.
pub const PAGERANK_DAMPING: f64 = 0.85;
/// PageRank convergence tolerance.
pub const PAGERANK_EPSILON: f64 = 1e-8;
/// PageRank iteration cap.
pub const PAGERANK_MAX_ITER: usize = 100;

// A shallower search than this suggests a poorly chosen source vertex.
const MIN_EXPECTED_BFS_LEVELS: i64 = 5;

/// Run `bench` (or, for the composite, every concrete kernel in registry
/// order) against the current graph state.
pub fn run_benchmark(
    bench: &Benchmark,
    graph: &TemporalGraph,
    nv: usize,
    scratch: &mut ScratchBuffer,
    modified_after: Timestamp,
    trial: usize,
    config: &DriverConfig,
) -> Result<()> {
    if bench.name == COMPOSITE {
        for concrete in registry::concrete() {
            run_concrete(concrete, graph, nv, scratch, modified_after, trial, config)?;
        }
        return Ok(());
    }
    run_concrete(bench, graph, nv, scratch, modified_after, trial, config)
}

fn run_concrete(
    bench: &Benchmark,
    graph: &TemporalGraph,
    nv: usize,
    scratch: &mut ScratchBuffer,
    modified_after: Timestamp,
    trial: usize,
    config: &DriverConfig,
) -> Result<()> {
    info!(benchmark = bench.name, nv, "running benchmark");
    let (ints, floats) = scratch.lanes();
    let mut lanes = Lanes::new(ints, floats);

    match bench.name {
        "bfs" => {
            let marks = lanes.int()?;
            let queue = lanes.int()?;
            let qhead = lanes.int()?;
            let level = lanes.int()?;
            let region = Region::enter("bfs", trial);
            let levels = kernels::breadth_first_search(
                graph,
                nv,
                config.bfs_source,
                marks,
                queue,
                qhead,
                level,
                modified_after,
            );
            drop(region);
            warn_if_shallow(levels, config);
        }
        "bfs-do" => {
            let marks = lanes.int()?;
            let queue = lanes.int()?;
            let qhead = lanes.int()?;
            let level = lanes.int()?;
            let region = Region::enter("bfs-do", trial);
            let levels = kernels::direction_optimizing_bfs(
                graph,
                nv,
                config.bfs_source,
                marks,
                queue,
                qhead,
                level,
                modified_after,
            );
            drop(region);
            warn_if_shallow(levels, config);
        }
        "betweenness" => {
            let found_count = lanes.int()?;
            let bc = lanes.float()?;
            let mut rng = match config.betweenness_seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_entropy(),
            };
            let _region = Region::enter("betweenness", trial);
            kernels::sample_search(
                graph,
                nv,
                config.betweenness_samples,
                &mut rng,
                bc,
                found_count,
                modified_after,
            );
        }
        "clustering" => {
            let num_triangles = lanes.int()?;
            let _region = Region::enter("clustering", trial);
            kernels::count_all_triangles(graph, nv, num_triangles, modified_after);
        }
        "components" => {
            let component_map = lanes.int()?;
            let _region = Region::enter("components", trial);
            kernels::shiloach_vishkin_components(graph, nv, component_map, modified_after);
        }
        "kcore" => {
            let labels = lanes.int()?;
            let counts = lanes.int()?;
            let _region = Region::enter("kcore", trial);
            kernels::kcore_find(graph, nv, labels, counts, modified_after);
        }
        "pagerank" => {
            let scores = lanes.float()?;
            let tmp = lanes.float()?;
            let _region = Region::enter("pagerank", trial);
            kernels::page_rank_directed(
                graph,
                nv,
                scores,
                tmp,
                PAGERANK_EPSILON,
                PAGERANK_DAMPING,
                PAGERANK_MAX_ITER,
                modified_after,
            );
        }
        other => return Err(MareaError::UnknownBenchmark(other.to_string())),
    }
    Ok(())
}

fn warn_if_shallow(levels: i64, config: &DriverConfig) {
    if levels < MIN_EXPECTED_BFS_LEVELS {
        warn!(
            levels,
            source = config.bfs_source,
            "breadth-first search stayed shallow; consider a different source vertex"
        );
    }
}

// Hands out scratch lanes in declaration order; running out means the
// registry descriptor and the kernel layout disagree.
struct Lanes<'a> {
    ints: std::vec::IntoIter<&'a mut [i64]>,
    floats: std::vec::IntoIter<&'a mut [f64]>,
}

impl<'a> Lanes<'a> {
    fn new(ints: Vec<&'a mut [i64]>, floats: Vec<&'a mut [f64]>) -> Self {
        Self {
            ints: ints.into_iter(),
            floats: floats.into_iter(),
        }
    }

    fn int(&mut self) -> Result<&'a mut [i64]> {
        self.ints.next().ok_or_else(|| {
            MareaError::InvalidArgument("scratch buffer narrower than kernel lane layout".into())
        })
    }

    fn float(&mut self) -> Result<&'a mut [f64]> {
        self.floats.next().ok_or_else(|| {
            MareaError::InvalidArgument("scratch buffer narrower than kernel lane layout".into())
        })
    }
}
