//! Breadth-first search, plain and direction-optimizing.
//!
//! Lane layout: `marks` (visited flags), `queue` (discovery order),
//! `qhead` (per-level start offsets into `queue`), `level` (distance
//! labels, `-1` for unreached). Returns the number of levels reached,
//! counting the source's own level.

use rayon::prelude::*;

use crate::store::TemporalGraph;
use crate::types::{Timestamp, VertexId};

// Frontier share of nv above which bfs-do switches to bottom-up sweeps.
const BOTTOM_UP_DENOM: usize = 16;

/// Level-synchronous BFS from `source`, restricted to edges modified after
/// the window threshold.
#[allow(clippy::too_many_arguments)]
pub fn breadth_first_search(
    graph: &TemporalGraph,
    nv: usize,
    source: VertexId,
    marks: &mut [i64],
    queue: &mut [i64],
    qhead: &mut [i64],
    level: &mut [i64],
    modified_after: Timestamp,
) -> i64 {
    let Some(mut tail) = bfs_init(nv, source, marks, queue, qhead, level) else {
        return 0;
    };

    let mut depth = 0usize;
    let mut start = 0usize;
    loop {
        let end = tail;
        if start == end {
            break;
        }
        qhead[depth] = start as i64;
        for i in start..end {
            let v = queue[i];
            let next_level = level[v as usize] + 1;
            graph.for_each_out_edge_modified_after(v, modified_after, |w, _, _| {
                let wi = w as usize;
                if wi < nv && marks[wi] == 0 {
                    marks[wi] = 1;
                    level[wi] = next_level;
                    queue[tail] = w;
                    tail += 1;
                }
            });
        }
        depth += 1;
        start = end;
    }
    depth as i64
}

/// Direction-optimizing BFS: top-down while the frontier is small, switching
/// to parallel bottom-up sweeps once it covers a sizable share of the graph.
#[allow(clippy::too_many_arguments)]
pub fn direction_optimizing_bfs(
    graph: &TemporalGraph,
    nv: usize,
    source: VertexId,
    marks: &mut [i64],
    queue: &mut [i64],
    qhead: &mut [i64],
    level: &mut [i64],
    modified_after: Timestamp,
) -> i64 {
    let Some(mut tail) = bfs_init(nv, source, marks, queue, qhead, level) else {
        return 0;
    };

    let mut depth = 0usize;
    let mut start = 0usize;
    loop {
        let end = tail;
        if start == end {
            break;
        }
        qhead[depth] = start as i64;
        let frontier = end - start;
        let unvisited = nv - tail;

        if frontier > nv / BOTTOM_UP_DENOM && unvisited > 0 {
            // Bottom-up: every unvisited vertex probes its own edges for a
            // frontier neighbor. Symmetric adjacency makes this equivalent
            // to expanding the frontier.
            let cur_level = depth as i64;
            let marks_r: &[i64] = marks;
            let level_r: &[i64] = level;
            let next: Vec<VertexId> = (0..nv)
                .into_par_iter()
                .filter_map(|u| {
                    if marks_r[u] != 0 {
                        return None;
                    }
                    let mut adjacent = false;
                    graph.for_each_out_edge_modified_after(
                        u as VertexId,
                        modified_after,
                        |w, _, _| {
                            let wi = w as usize;
                            if wi < nv && level_r[wi] == cur_level {
                                adjacent = true;
                            }
                        },
                    );
                    adjacent.then_some(u as VertexId)
                })
                .collect();
            for u in next {
                marks[u as usize] = 1;
                level[u as usize] = cur_level + 1;
                queue[tail] = u;
                tail += 1;
            }
        } else {
            for i in start..end {
                let v = queue[i];
                let next_level = level[v as usize] + 1;
                graph.for_each_out_edge_modified_after(v, modified_after, |w, _, _| {
                    let wi = w as usize;
                    if wi < nv && marks[wi] == 0 {
                        marks[wi] = 1;
                        level[wi] = next_level;
                        queue[tail] = w;
                        tail += 1;
                    }
                });
            }
        }
        depth += 1;
        start = end;
    }
    depth as i64
}

// Shared lane reset + source seeding. None when the search is degenerate.
fn bfs_init(
    nv: usize,
    source: VertexId,
    marks: &mut [i64],
    queue: &mut [i64],
    qhead: &mut [i64],
    level: &mut [i64],
) -> Option<usize> {
    if nv == 0 || source < 0 || source as usize >= nv {
        return None;
    }
    marks[..nv].fill(0);
    queue[..nv].fill(0);
    qhead[..nv].fill(0);
    level[..nv].fill(-1);
    marks[source as usize] = 1;
    level[source as usize] = 0;
    queue[0] = source;
    Some(1)
}
