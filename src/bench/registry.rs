//! Static benchmark registry.
//!
//! Maps a benchmark name to the per-vertex scratch slots its kernel needs,
//! split into an integer plane and a float plane. The composite `"all"`
//! entry carries the per-plane maxima so one allocation fits every kernel
//! run in sequence.

use crate::error::{MareaError, Result};

/// Name of the composite benchmark that runs every concrete kernel.
pub const COMPOSITE: &str = "all";

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benchmark {
    /// Benchmark name as given on the command line.
    pub name: &'static str,
    /// Per-vertex `i64` scratch slots the kernel carves.
    pub int_slots: usize,
    /// Per-vertex `f64` scratch slots the kernel carves.
    pub float_slots: usize,
}

/// The full registry, composite first. Immutable; built at compile time.
pub const BENCHMARKS: &[Benchmark] = &[
    Benchmark { name: COMPOSITE, int_slots: 4, float_slots: 2 },
    Benchmark { name: "bfs", int_slots: 4, float_slots: 0 },
    Benchmark { name: "bfs-do", int_slots: 4, float_slots: 0 },
    Benchmark { name: "betweenness", int_slots: 1, float_slots: 1 },
    Benchmark { name: "clustering", int_slots: 1, float_slots: 0 },
    Benchmark { name: "components", int_slots: 1, float_slots: 0 },
    Benchmark { name: "kcore", int_slots: 2, float_slots: 0 },
    Benchmark { name: "pagerank", int_slots: 0, float_slots: 2 },
];

/// Find a benchmark by name; unknown names are a fatal configuration error.
pub fn lookup(name: &str) -> Result<&'static Benchmark> {
    BENCHMARKS
        .iter()
        .find(|b| b.name == name)
        .ok_or_else(|| MareaError::UnknownBenchmark(name.to_string()))
}

/// The concrete kernels, in registry order, composite excluded.
pub fn concrete() -> impl Iterator<Item = &'static Benchmark> {
    BENCHMARKS.iter().filter(|b| b.name != COMPOSITE)
}
