//! Marea: a streaming-graph benchmark driver.
//!
//! Replays a timestamped edge log into a fixed-capacity temporal graph in
//! batches, running a selected analytic kernel after every batch restricted
//! to a sliding time window, and reporting per-batch timing and structural
//! statistics.

#![warn(missing_docs)]

pub mod bench;
pub mod dataset;
pub mod error;
pub mod hooks;
pub mod kernels;
pub mod store;
pub mod types;

pub use error::{MareaError, Result};
