//! Approximate betweenness centrality via sampled Brandes accumulation.
//!
//! Runs one unweighted shortest-path search from each of `num_samples`
//! random sources and accumulates path dependencies into the `bc` lane.
//! `found_count[v]` counts how many samples reached `v`.

use rand::Rng;

use crate::store::TemporalGraph;
use crate::types::{Timestamp, VertexId};

/// Sampled betweenness. The caller owns the RNG so runs can be seeded.
pub fn sample_search<R: Rng>(
    graph: &TemporalGraph,
    nv: usize,
    num_samples: usize,
    rng: &mut R,
    bc: &mut [f64],
    found_count: &mut [i64],
    modified_after: Timestamp,
) {
    bc[..nv].fill(0.0);
    found_count[..nv].fill(0);
    if nv == 0 || num_samples == 0 {
        return;
    }

    // Per-sample working state, reused across samples.
    let mut dist = vec![-1i64; nv];
    let mut sigma = vec![0.0f64; nv];
    let mut delta = vec![0.0f64; nv];
    let mut order: Vec<VertexId> = Vec::with_capacity(nv);

    for _ in 0..num_samples {
        let source = rng.gen_range(0..nv as i64);

        dist.fill(-1);
        sigma.fill(0.0);
        delta.fill(0.0);
        order.clear();

        dist[source as usize] = 0;
        sigma[source as usize] = 1.0;
        order.push(source);

        // Forward sweep: BFS computing shortest-path counts.
        let mut head = 0usize;
        while head < order.len() {
            let v = order[head];
            head += 1;
            let dv = dist[v as usize];
            let sv = sigma[v as usize];
            graph.for_each_out_edge_modified_after(v, modified_after, |w, _, _| {
                let wi = w as usize;
                if wi >= nv {
                    return;
                }
                if dist[wi] < 0 {
                    dist[wi] = dv + 1;
                    order.push(w);
                }
                if dist[wi] == dv + 1 {
                    sigma[wi] += sv;
                }
            });
        }

        // Backward sweep in reverse discovery order (non-increasing depth):
        // successors along shortest paths contribute their dependency.
        for &v in order.iter().rev() {
            let vi = v as usize;
            let dv = dist[vi];
            let sv = sigma[vi];
            let mut acc = 0.0;
            graph.for_each_out_edge_modified_after(v, modified_after, |w, _, _| {
                let wi = w as usize;
                if wi < nv && dist[wi] == dv + 1 && sigma[wi] > 0.0 {
                    acc += sv / sigma[wi] * (1.0 + delta[wi]);
                }
            });
            delta[vi] = acc;
            if v != source {
                bc[vi] += acc;
            }
            found_count[vi] += 1;
        }
    }
}
