//! Binary entry point for the Marea benchmark driver.
//!
//! Replays an edge log into a fresh temporal graph in batches, running the
//! selected analytic kernel after each batch over a sliding time window:
//!
//! ```bash
//! marea-bench pagerank data/graph.el 64 8 3
//! RUST_LOG=debug marea-bench all data/graph.el 16 4 1
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use marea::bench::{self, DriverConfig, RunOptions};

#[derive(Parser, Debug)]
#[command(
    name = "marea-bench",
    version,
    about = "Dynamic-graph benchmark: batched edge-log replay with windowed analytics"
)]
struct Cli {
    /// Benchmark to run (bfs, bfs-do, betweenness, clustering, components,
    /// kcore, pagerank, or "all").
    alg_name: String,

    /// Edge-log file: whitespace-separated `src dst weight timestamp`.
    input_path: PathBuf,

    /// Number of batches to split the log into.
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    num_batches: i64,

    /// Sliding window length, in batches.
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    window_size: i64,

    /// Number of independent trials.
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    num_trials: i64,

    /// Source vertex for the BFS benchmarks.
    #[arg(long, default_value_t = 3)]
    bfs_source: i64,

    /// Sample count for the betweenness benchmark.
    #[arg(long, default_value_t = 256)]
    betweenness_samples: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = RunOptions {
        alg_name: cli.alg_name,
        input_path: cli.input_path,
        num_batches: cli.num_batches as usize,
        window_size: cli.window_size as usize,
        num_trials: cli.num_trials as usize,
        config: DriverConfig {
            bfs_source: cli.bfs_source,
            betweenness_samples: cli.betweenness_samples,
            betweenness_seed: None,
        },
    };

    match bench::run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}
