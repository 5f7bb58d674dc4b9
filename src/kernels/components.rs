//! Connected components, Shiloach-Vishkin style.
//!
//! Alternates hooking sweeps over the in-window edges with pointer-jumping
//! compression until the labeling is stable. Edges are treated as
//! connections regardless of direction, so directed inputs yield weakly
//! connected components.

use crate::store::TemporalGraph;
use crate::types::Timestamp;

/// Label every vertex in `0..nv` with its component representative (the
/// smallest vertex id in the component). Returns the component count,
/// isolated vertices included as singletons.
pub fn shiloach_vishkin_components(
    graph: &TemporalGraph,
    nv: usize,
    component_map: &mut [i64],
    modified_after: Timestamp,
) -> i64 {
    for (v, slot) in component_map[..nv].iter_mut().enumerate() {
        *slot = v as i64;
    }
    if nv == 0 {
        return 0;
    }

    loop {
        let mut changed = false;

        // Hooking: pull the larger-labeled endpoint's root under the
        // smaller label.
        for v in 0..nv {
            graph.for_each_out_edge_modified_after(v as i64, modified_after, |w, _, _| {
                let wi = w as usize;
                if wi >= nv {
                    return;
                }
                let cv = component_map[v];
                let cw = component_map[wi];
                if cw < cv {
                    component_map[cv as usize] = cw;
                    changed = true;
                } else if cv < cw {
                    component_map[cw as usize] = cv;
                    changed = true;
                }
            });
        }

        // Compression: collapse chains down to their roots.
        for v in 0..nv {
            while component_map[v] != component_map[component_map[v] as usize] {
                component_map[v] = component_map[component_map[v] as usize];
            }
        }

        if !changed {
            break;
        }
    }

    (0..nv).filter(|&v| component_map[v] == v as i64).count() as i64
}
