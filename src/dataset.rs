//! Edge batch source.
//!
//! Loads a timestamped edge log from disk once, slices it into a fixed
//! number of time-ordered batches, and computes the sliding-window
//! threshold for each batch index. The log is the only external input of a
//! run; everything after the load is in-memory replay.
//!
//! File format: whitespace-separated `src dst weight timestamp` per line.
//! Lines starting with `#` or `%` are comments; a `# undirected` header
//! line marks the whole log undirected, in which case every batch is
//! inserted symmetrically.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::{MareaError, Result};
use crate::types::{Timestamp, VertexId, Weight, TIMESTAMP_MIN};

/// One edge of the log, immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Source vertex id.
    pub src: VertexId,
    /// Destination vertex id.
    pub dst: VertexId,
    /// Edge weight.
    pub weight: Weight,
    /// Modification timestamp; non-decreasing over the log.
    pub timestamp: Timestamp,
}

/// A contiguous, time-ordered slice of the edge log.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Index of this batch within the dataset.
    pub index: usize,
    /// Edges of the batch, in log order.
    pub edges: &'a [Edge],
    /// Whether edges are directed; undirected batches insert symmetrically.
    pub directed: bool,
}

/// A fully loaded edge log, pre-split into `num_batches` batches.
#[derive(Debug)]
pub struct Dataset {
    edges: Vec<Edge>,
    num_batches: usize,
    directed: bool,
    max_vertex_id: VertexId,
}

impl Dataset {
    /// Load the edge log at `path` and split it into `num_batches` batches.
    ///
    /// Fails if the file is malformed, timestamps regress, or there are
    /// fewer edges than requested batches. All failures are fatal to the
    /// run.
    pub fn load(path: &Path, num_batches: usize) -> Result<Self> {
        if num_batches == 0 {
            return Err(MareaError::InvalidArgument(
                "num_batches must be positive".into(),
            ));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut edges = Vec::new();
        let mut directed = true;
        let mut max_vertex_id: VertexId = -1;
        let mut last_ts = TIMESTAMP_MIN;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix(['#', '%']) {
                if rest.trim().eq_ignore_ascii_case("undirected") {
                    directed = false;
                }
                continue;
            }

            let edge = parse_edge(trimmed)
                .ok_or_else(|| MareaError::Dataset(format!("{}:{}: malformed edge line", path.display(), lineno + 1)))?;
            if edge.src < 0 || edge.dst < 0 {
                return Err(MareaError::Dataset(format!(
                    "{}:{}: negative vertex id",
                    path.display(),
                    lineno + 1
                )));
            }
            if edge.timestamp < last_ts {
                return Err(MareaError::Dataset(format!(
                    "{}:{}: timestamps out of order",
                    path.display(),
                    lineno + 1
                )));
            }
            last_ts = edge.timestamp;
            max_vertex_id = max_vertex_id.max(edge.src).max(edge.dst);
            edges.push(edge);
        }

        if edges.len() < num_batches {
            return Err(MareaError::Dataset(format!(
                "{}: {} edges cannot fill {} batches",
                path.display(),
                edges.len(),
                num_batches
            )));
        }

        info!(
            path = %path.display(),
            edges = edges.len(),
            batches = num_batches,
            directed,
            "dataset loaded"
        );

        Ok(Self {
            edges,
            num_batches,
            directed,
            max_vertex_id,
        })
    }

    /// Batch at `index`. Fatal if `index` is beyond the configured count.
    pub fn batch(&self, index: usize) -> Result<Batch<'_>> {
        if index >= self.num_batches {
            return Err(MareaError::BatchOutOfRange {
                index,
                available: self.num_batches,
            });
        }
        let (start, end) = self.batch_bounds(index);
        Ok(Batch {
            index,
            edges: &self.edges[start..end],
            directed: self.directed,
        })
    }

    /// Earliest timestamp still in window after batch `index` has been
    /// inserted, given a window of `window_size` batches.
    ///
    /// Edges with `timestamp <= window_start(..)` fall outside the window.
    /// While fewer than `window_size` batches have been applied the whole
    /// history is in window. The threshold is non-decreasing in `index` and
    /// strictly below every timestamp of batch `index`.
    pub fn window_start(&self, index: usize, window_size: usize) -> Timestamp {
        if window_size == 0 || index < window_size {
            return TIMESTAMP_MIN;
        }
        let oldest_in_window = index - window_size + 1;
        let (start, _) = self.batch_bounds(oldest_in_window);
        self.edges[start].timestamp - 1
    }

    /// Number of batches the log was split into.
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Total number of edges in the log.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Highest vertex id referenced anywhere in the log, `-1` if empty.
    pub fn max_vertex_id(&self) -> VertexId {
        self.max_vertex_id
    }

    /// Whether the log is directed.
    pub fn directed(&self) -> bool {
        self.directed
    }

    // Equal split, remainder folded into the final batch.
    fn batch_bounds(&self, index: usize) -> (usize, usize) {
        let per_batch = self.edges.len() / self.num_batches;
        let start = index * per_batch;
        let end = if index + 1 == self.num_batches {
            self.edges.len()
        } else {
            start + per_batch
        };
        (start, end)
    }
}

fn parse_edge(line: &str) -> Option<Edge> {
    let mut fields = line.split_whitespace();
    let src = fields.next()?.parse().ok()?;
    let dst = fields.next()?.parse().ok()?;
    let weight = fields.next()?.parse().ok()?;
    let timestamp = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Edge {
        src,
        dst,
        weight,
        timestamp,
    })
}
