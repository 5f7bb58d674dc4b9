#![allow(missing_docs)]

use std::io::Write;

use marea::bench::{dispatch, registry, stats, DriverConfig, RunOptions, ScratchBuffer};
use marea::bench::{insert_batch, run};
use marea::dataset::Dataset;
use marea::store::TemporalGraph;
use marea::types::TIMESTAMP_MIN;
use tempfile::NamedTempFile;

fn write_log(lines: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(lines.as_bytes()).unwrap();
    file
}

fn test_config() -> DriverConfig {
    DriverConfig {
        bfs_source: 0,
        betweenness_samples: 16,
        betweenness_seed: Some(7),
    }
}

#[test]
fn triangle_collapses_to_one_component() {
    // components, num_batches=1, window_size=1, num_trials=1 over one
    // connected triangle with ascending timestamps.
    let file = write_log("# undirected\n0 1 1.0 10\n1 2 1.0 20\n2 0 1.0 30\n");
    let ds = Dataset::load(file.path(), 1).unwrap();

    let graph = TemporalGraph::with_capacity(64);
    insert_batch(&graph, &ds.batch(0).unwrap(), 0).unwrap();
    assert!(graph.num_edges() >= 3);

    let bench = registry::lookup("components").unwrap();
    let mut scratch = ScratchBuffer::for_benchmark(bench, graph.max_capacity());
    let nv = (graph.highest_active_vertex() + 1) as usize;
    let modified_after = ds.window_start(0, 1);
    dispatch::run_benchmark(
        bench,
        &graph,
        nv,
        &mut scratch,
        modified_after,
        0,
        &test_config(),
    )
    .unwrap();

    let (ints, _) = scratch.lanes();
    let component_map = &ints[0][..nv];
    assert_eq!(component_map, &[0, 0, 0], "triangle must share one component");

    let block = stats::batch_stats(&graph, nv, modified_after);
    assert!(block.fragmentation.num_edges >= 3);
}

#[test]
fn window_of_two_batches_excludes_older_edges() {
    // num_batches=4, window_size=2: at batch 3 only batches 2 and 3 remain
    // in window, so the filtered count drops below the total.
    let file = write_log(
        "0 1 1.0 10\n1 2 1.0 20\n2 3 1.0 30\n3 4 1.0 40\n",
    );
    let ds = Dataset::load(file.path(), 4).unwrap();
    let graph = TemporalGraph::with_capacity(64);

    for i in 0..4 {
        insert_batch(&graph, &ds.batch(i).unwrap(), 0).unwrap();
    }
    let nv = (graph.highest_active_vertex() + 1) as usize;
    let modified_after = ds.window_start(3, 2);

    let filtered = stats::filtered_edge_count(&graph, nv, modified_after);
    assert_eq!(filtered, 2, "only the two newest batches stay in window");
    assert!(filtered < graph.num_edges());
}

#[test]
fn composite_and_individual_kernels_agree_on_a_frozen_graph() {
    let graph = TemporalGraph::with_capacity(64);
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)];
    for (i, &(u, v)) in edges.iter().enumerate() {
        graph.insert_edge_pair(u, v, 1.0, i as i64 + 1).unwrap();
    }
    let nv = (graph.highest_active_vertex() + 1) as usize;
    let config = test_config();

    let run_kernel = |name: &str| -> (Vec<i64>, Vec<f64>) {
        let bench = registry::lookup(name).unwrap();
        let mut scratch = ScratchBuffer::for_benchmark(bench, graph.max_capacity());
        dispatch::run_benchmark(bench, &graph, nv, &mut scratch, TIMESTAMP_MIN, 0, &config)
            .unwrap();
        let (ints, floats) = scratch.lanes();
        (
            ints.first().map(|lane| lane[..nv].to_vec()).unwrap_or_default(),
            floats.first().map(|lane| lane[..nv].to_vec()).unwrap_or_default(),
        )
    };

    // None of the kernels mutate the graph, so repeated runs on the frozen
    // snapshot must agree bit-for-bit (betweenness is pinned by its seed).
    for bench in registry::concrete() {
        let first = run_kernel(bench.name);
        let second = run_kernel(bench.name);
        assert_eq!(first, second, "{} diverged between runs", bench.name);
    }

    // The composite shares one wide buffer across kernels. In registry
    // order the last writers are kcore (int lanes) and pagerank (float
    // lanes); their outputs must match the individual runs exactly.
    let all = registry::lookup("all").unwrap();
    let mut scratch = ScratchBuffer::for_benchmark(all, graph.max_capacity());
    dispatch::run_benchmark(all, &graph, nv, &mut scratch, TIMESTAMP_MIN, 0, &config).unwrap();
    let (ints, floats) = scratch.lanes();

    let (kcore_labels, _) = run_kernel("kcore");
    let (_, pagerank_scores) = run_kernel("pagerank");
    assert_eq!(ints[0][..nv], kcore_labels[..]);
    assert_eq!(floats[0][..nv], pagerank_scores[..]);
    assert_eq!(ints[0].len(), graph.max_capacity());
}

#[test]
fn scratch_size_is_fixed_for_the_whole_trial() {
    let file = write_log("0 1 1.0 10\n1 2 1.0 20\n2 63 1.0 30\n");
    let ds = Dataset::load(file.path(), 3).unwrap();
    let graph = TemporalGraph::with_capacity(64);
    let bench = registry::lookup("kcore").unwrap();
    let mut scratch = ScratchBuffer::for_benchmark(bench, graph.max_capacity());

    for i in 0..3 {
        insert_batch(&graph, &ds.batch(i).unwrap(), 0).unwrap();
        let nv = (graph.highest_active_vertex() + 1) as usize;
        dispatch::run_benchmark(
            bench,
            &graph,
            nv,
            &mut scratch,
            ds.window_start(i, 2),
            0,
            &test_config(),
        )
        .unwrap();
        // The buffer is sized by max capacity, not the growing vertex count.
        assert_eq!(scratch.stride(), 64);
        assert_eq!(scratch.int_slots(), bench.int_slots);
        assert_eq!(scratch.float_slots(), bench.float_slots);
    }
}

#[test]
fn full_run_completes_for_every_benchmark() {
    let file = write_log(
        "# undirected\n0 1 1.0 10\n1 2 1.0 20\n2 0 1.0 30\n0 3 1.0 40\n3 4 1.0 50\n4 0 1.0 60\n",
    );
    for bench in registry::BENCHMARKS {
        let opts = RunOptions {
            alg_name: bench.name.to_string(),
            input_path: file.path().to_path_buf(),
            num_batches: 3,
            window_size: 2,
            num_trials: 2,
            config: test_config(),
        };
        run(&opts).unwrap_or_else(|err| panic!("{} run failed: {err}", bench.name));
    }
}

#[test]
fn unknown_benchmark_fails_before_touching_the_dataset() {
    let opts = RunOptions {
        alg_name: "foo".into(),
        input_path: "/nonexistent/edges.el".into(),
        num_batches: 1,
        window_size: 1,
        num_trials: 1,
        config: DriverConfig::default(),
    };
    let err = run(&opts).unwrap_err();
    assert!(
        err.to_string().contains("does not exist"),
        "unexpected error: {err}"
    );
}
