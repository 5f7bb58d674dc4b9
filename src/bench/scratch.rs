//! Per-trial scratch buffer.
//!
//! One flat allocation per plane, sized by the selected benchmark's slot
//! counts times the graph's **maximum** vertex capacity, never the live
//! vertex count: kernels address slots by absolute vertex id, and lane
//! offsets must stay stable across batches as the graph grows. Allocated
//! zeroed once per trial and never resized.

use super::registry::Benchmark;

/// Flat per-vertex working memory for one trial.
#[derive(Debug)]
pub struct ScratchBuffer {
    stride: usize,
    ints: Vec<i64>,
    floats: Vec<f64>,
}

impl ScratchBuffer {
    /// Allocate zeroed planes sized for `bench` over `max_capacity`
    /// vertices.
    pub fn for_benchmark(bench: &Benchmark, max_capacity: usize) -> Self {
        Self {
            stride: max_capacity,
            ints: vec![0; bench.int_slots * max_capacity],
            floats: vec![0.0; bench.float_slots * max_capacity],
        }
    }

    /// Lane length, equal to the graph's maximum vertex capacity.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of integer lanes.
    pub fn int_slots(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.ints.len() / self.stride
        }
    }

    /// Number of float lanes.
    pub fn float_slots(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.floats.len() / self.stride
        }
    }

    /// Carve both planes into lanes of `stride` elements, lane `i` starting
    /// at offset `i * stride`. Carving is recomputed per call, so each
    /// kernel dispatch gets independent slices over the same storage.
    pub fn lanes(&mut self) -> (Vec<&mut [i64]>, Vec<&mut [f64]>) {
        if self.stride == 0 {
            return (Vec::new(), Vec::new());
        }
        (
            self.ints.chunks_exact_mut(self.stride).collect(),
            self.floats.chunks_exact_mut(self.stride).collect(),
        )
    }
}
