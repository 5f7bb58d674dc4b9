//! K-core decomposition by iterative peeling.
//!
//! `counts` holds the remaining in-window degree of each unpeeled vertex;
//! `labels` receives the coreness once a vertex is peeled. Returns the
//! largest k for which a non-empty k-core exists.

use crate::store::TemporalGraph;
use crate::types::Timestamp;

/// Peel vertices in rounds of increasing k, writing coreness into `labels`.
pub fn kcore_find(
    graph: &TemporalGraph,
    nv: usize,
    labels: &mut [i64],
    counts: &mut [i64],
    modified_after: Timestamp,
) -> i64 {
    labels[..nv].fill(-1);
    for v in 0..nv {
        counts[v] = graph.out_degree_modified_after(v as i64, modified_after) as i64;
    }

    let mut remaining = nv;
    let mut max_core = 0i64;
    let mut k = 0i64;
    while remaining > 0 {
        k += 1;
        loop {
            let mut peeled_any = false;
            for v in 0..nv {
                if labels[v] != -1 || counts[v] >= k {
                    continue;
                }
                labels[v] = k - 1;
                max_core = max_core.max(k - 1);
                remaining -= 1;
                peeled_any = true;
                let labels_r: &[i64] = labels;
                let counts_ref = &mut *counts;
                graph.for_each_out_edge_modified_after(v as i64, modified_after, |w, _, _| {
                    let wi = w as usize;
                    if wi < nv && labels_r[wi] == -1 {
                        counts_ref[wi] -= 1;
                    }
                });
            }
            if !peeled_any {
                break;
            }
        }
    }
    max_core
}
