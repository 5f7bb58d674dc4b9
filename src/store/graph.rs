use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;

use super::block::{EdgeBlock, EdgeSlot, EDGES_PER_BLOCK};
use crate::error::{MareaError, Result};
use crate::types::{Timestamp, VertexId, Weight};

/// Structural health metrics of the adjacency storage.
///
/// Reported for observability after every batch; kernels never read these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FragmentationStats {
    /// Live edges across the inspected vertices.
    pub num_edges: i64,
    /// Allocated slots not currently holding a live edge.
    pub num_empty_edges: i64,
    /// Blocks with holes below their high-water mark.
    pub num_fragmented_blocks: i64,
    /// Total allocated adjacency blocks.
    pub edge_blocks_in_use: i64,
    /// Allocated blocks whose live count dropped to zero.
    pub num_empty_blocks: i64,
}

/// Mutable temporal multigraph with a capacity fixed at creation.
///
/// Concurrent inserts to disjoint vertices proceed in parallel; inserts to
/// the same source vertex serialize on that vertex's lock. Reads during a
/// kernel run are lock-per-visit; the driver never overlaps insertion with
/// a kernel run.
pub struct TemporalGraph {
    vertices: Vec<Mutex<Vec<EdgeBlock>>>,
    num_edges: AtomicI64,
    highest_active: AtomicI64,
}

impl TemporalGraph {
    /// Create an empty graph able to hold vertices `0..max_nv`.
    pub fn with_capacity(max_nv: usize) -> Self {
        let mut vertices = Vec::with_capacity(max_nv);
        vertices.resize_with(max_nv, || Mutex::new(Vec::new()));
        Self {
            vertices,
            num_edges: AtomicI64::new(0),
            highest_active: AtomicI64::new(-1),
        }
    }

    /// Maximum vertex capacity, fixed at creation.
    pub fn max_capacity(&self) -> usize {
        self.vertices.len()
    }

    /// Highest vertex id touched by any insertion, `-1` while empty.
    pub fn highest_active_vertex(&self) -> VertexId {
        self.highest_active.load(Ordering::Acquire)
    }

    /// Live edge count (adjacency entries; an undirected pair counts two).
    pub fn num_edges(&self) -> i64 {
        self.num_edges.load(Ordering::Acquire)
    }

    /// Insert the directed edge `src -> dst`.
    ///
    /// Re-inserting an existing `(src, dst)` merges instead of duplicating:
    /// the weight is replaced and the recent timestamp advanced, while the
    /// first-seen timestamp is preserved.
    pub fn insert_edge(
        &self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
        ts: Timestamp,
    ) -> Result<()> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        {
            let mut blocks = self.vertices[src as usize].lock();

            let mut merged = false;
            for block in blocks.iter_mut() {
                if let Some(slot) = block.find_live_mut(dst) {
                    slot.weight = weight;
                    slot.recent_ts = slot.recent_ts.max(ts);
                    merged = true;
                    break;
                }
            }

            if !merged {
                let slot = EdgeSlot::live(dst, weight, ts);
                let mut placed = false;
                for block in blocks.iter_mut() {
                    if block.fill_hole(slot) {
                        placed = true;
                        break;
                    }
                }
                if !placed {
                    if let Some(last) = blocks.last_mut() {
                        placed = last.append(slot);
                    }
                }
                if !placed {
                    let mut block = EdgeBlock::new();
                    block.append(slot);
                    blocks.push(block);
                }
                self.num_edges.fetch_add(1, Ordering::AcqRel);
            }
        }

        self.highest_active.fetch_max(src, Ordering::AcqRel);
        self.highest_active.fetch_max(dst, Ordering::AcqRel);
        Ok(())
    }

    /// Insert one logical undirected edge as both `src -> dst` and
    /// `dst -> src`.
    pub fn insert_edge_pair(
        &self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
        ts: Timestamp,
    ) -> Result<()> {
        self.insert_edge(src, dst, weight, ts)?;
        self.insert_edge(dst, src, weight, ts)
    }

    /// Visit every live out-edge of `v` whose recent timestamp is strictly
    /// after `modified_after`.
    ///
    /// The vertex lock is held for the duration of the visit; the closure
    /// must not call back into the same vertex.
    pub fn for_each_out_edge_modified_after<F>(
        &self,
        v: VertexId,
        modified_after: Timestamp,
        mut f: F,
    ) where
        F: FnMut(VertexId, Weight, Timestamp),
    {
        if v < 0 || v as usize >= self.vertices.len() {
            return;
        }
        let blocks = self.vertices[v as usize].lock();
        for block in blocks.iter() {
            for slot in block.slots[..block.high].iter() {
                if slot.is_live() && slot.recent_ts > modified_after {
                    f(slot.dst, slot.weight, slot.recent_ts);
                }
            }
        }
    }

    /// In-window out-neighbors of `v`, in slot order, duplicates impossible
    /// by the merge invariant.
    pub fn out_neighbors_modified_after(
        &self,
        v: VertexId,
        modified_after: Timestamp,
    ) -> Vec<VertexId> {
        let mut out = Vec::new();
        self.for_each_out_edge_modified_after(v, modified_after, |dst, _, _| out.push(dst));
        out
    }

    /// In-window out-degree of `v`.
    pub fn out_degree_modified_after(&self, v: VertexId, modified_after: Timestamp) -> usize {
        let mut deg = 0usize;
        self.for_each_out_edge_modified_after(v, modified_after, |_, _, _| deg += 1);
        deg
    }

    /// Tombstone every edge whose recent timestamp is strictly before
    /// `threshold`, leaving holes in place. Returns the number removed.
    pub fn truncate_older_than(&self, threshold: Timestamp) -> i64 {
        let removed: i64 = self
            .vertices
            .par_iter()
            .map(|vertex| {
                let mut blocks = vertex.lock();
                let mut removed = 0i64;
                for block in blocks.iter_mut() {
                    for slot in block.slots[..block.high].iter_mut() {
                        if slot.is_live() && slot.recent_ts < threshold {
                            slot.clear();
                            block.live -= 1;
                            removed += 1;
                        }
                    }
                }
                removed
            })
            .sum();
        self.num_edges.fetch_sub(removed, Ordering::AcqRel);
        removed
    }

    /// Fragmentation accounting over vertices `0..nv`.
    pub fn fragmentation_stats(&self, nv: usize) -> FragmentationStats {
        let nv = nv.min(self.vertices.len());
        self.vertices[..nv]
            .par_iter()
            .map(|vertex| {
                let blocks = vertex.lock();
                let mut stats = FragmentationStats::default();
                for block in blocks.iter() {
                    stats.edge_blocks_in_use += 1;
                    stats.num_edges += block.live as i64;
                    stats.num_empty_edges += (EDGES_PER_BLOCK - block.live) as i64;
                    if block.is_fragmented() {
                        stats.num_fragmented_blocks += 1;
                    }
                    if block.is_empty() {
                        stats.num_empty_blocks += 1;
                    }
                }
                stats
            })
            .reduce(FragmentationStats::default, |a, b| FragmentationStats {
                num_edges: a.num_edges + b.num_edges,
                num_empty_edges: a.num_empty_edges + b.num_empty_edges,
                num_fragmented_blocks: a.num_fragmented_blocks + b.num_fragmented_blocks,
                edge_blocks_in_use: a.edge_blocks_in_use + b.edge_blocks_in_use,
                num_empty_blocks: a.num_empty_blocks + b.num_empty_blocks,
            })
    }

    fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v < 0 || v as usize >= self.vertices.len() {
            return Err(MareaError::InvalidArgument(format!(
                "vertex {} outside capacity {}",
                v,
                self.vertices.len()
            )));
        }
        Ok(())
    }
}
