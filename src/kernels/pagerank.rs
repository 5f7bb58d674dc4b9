//! Directed PageRank with power iteration.
//!
//! `scores` and `tmp` are two float lanes; each sweep pushes rank along
//! in-window out-edges, redistributes dangling mass uniformly, and stops
//! when the L1 delta drops below `epsilon` or `max_iter` is reached.

use rayon::prelude::*;

use crate::store::TemporalGraph;
use crate::types::Timestamp;

/// Run PageRank over `0..nv`. Returns the number of iterations performed.
#[allow(clippy::too_many_arguments)]
pub fn page_rank_directed(
    graph: &TemporalGraph,
    nv: usize,
    scores: &mut [f64],
    tmp: &mut [f64],
    epsilon: f64,
    damping: f64,
    max_iter: usize,
    modified_after: Timestamp,
) -> usize {
    if nv == 0 {
        return 0;
    }
    let n = nv as f64;
    scores[..nv].fill(1.0 / n);

    let mut iterations = 0usize;
    for _ in 0..max_iter {
        iterations += 1;

        tmp[..nv].fill((1.0 - damping) / n);
        let mut dangling = 0.0f64;
        for v in 0..nv {
            let degree = graph.out_degree_modified_after(v as i64, modified_after);
            if degree == 0 {
                dangling += scores[v];
                continue;
            }
            let share = damping * scores[v] / degree as f64;
            graph.for_each_out_edge_modified_after(v as i64, modified_after, |w, _, _| {
                let wi = w as usize;
                if wi < nv {
                    tmp[wi] += share;
                }
            });
        }
        if dangling > 0.0 {
            let spread = damping * dangling / n;
            tmp[..nv].par_iter_mut().for_each(|slot| *slot += spread);
        }

        let delta: f64 = scores[..nv]
            .par_iter()
            .zip(tmp[..nv].par_iter())
            .map(|(old, new)| (old - new).abs())
            .sum();
        scores[..nv].copy_from_slice(&tmp[..nv]);
        if delta < epsilon {
            break;
        }
    }
    iterations
}
