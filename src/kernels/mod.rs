//! Windowed analytic kernels.
//!
//! Every kernel reads the graph through the modified-after filter and works
//! in scratch lanes carved by the dispatcher (one lane = one per-vertex
//! slot of length `max_capacity`). Kernels fully overwrite the lanes they
//! use before reading them, so lanes can be shared between kernels of the
//! same trial. None of them mutate the graph.

mod betweenness;
mod bfs;
mod clustering;
mod components;
mod kcore;
mod pagerank;

pub use betweenness::sample_search;
pub use bfs::{breadth_first_search, direction_optimizing_bfs};
pub use clustering::count_all_triangles;
pub use components::shiloach_vishkin_components;
pub use kcore::kcore_find;
pub use pagerank::page_rank_directed;
