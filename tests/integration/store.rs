#![allow(missing_docs)]

use marea::store::TemporalGraph;
use marea::types::TIMESTAMP_MIN;

#[test]
fn vertex_count_never_shrinks_across_batches() {
    let g = TemporalGraph::with_capacity(256);
    let batches: Vec<Vec<(i64, i64)>> = vec![
        vec![(0, 1), (1, 2)],
        vec![(0, 2)],
        vec![(5, 9), (9, 40)],
        vec![(1, 0)],
    ];

    let mut last_nv = -1i64;
    let mut last_edges = 0i64;
    for (ts, batch) in batches.iter().enumerate() {
        for &(src, dst) in batch {
            g.insert_edge(src, dst, 1.0, ts as i64 + 1).unwrap();
        }
        let nv = g.highest_active_vertex() + 1;
        assert!(nv >= last_nv, "vertex range shrank");
        assert!(g.num_edges() >= last_edges, "edge count shrank");
        last_nv = nv;
        last_edges = g.num_edges();
    }
    assert_eq!(last_nv, 41);
}

#[test]
fn undirected_insert_creates_both_adjacencies() {
    let g = TemporalGraph::with_capacity(16);
    g.insert_edge_pair(3, 8, 2.0, 5).unwrap();

    assert_eq!(g.out_neighbors_modified_after(3, TIMESTAMP_MIN), vec![8]);
    assert_eq!(g.out_neighbors_modified_after(8, TIMESTAMP_MIN), vec![3]);
}

#[test]
fn duplicate_directed_insert_merges_weight_and_timestamp() {
    let g = TemporalGraph::with_capacity(16);
    g.insert_edge(1, 2, 1.0, 10).unwrap();
    g.insert_edge(1, 2, 9.0, 30).unwrap();

    assert_eq!(g.num_edges(), 1, "duplicate edge must not be stored twice");
    let mut observed = Vec::new();
    g.for_each_out_edge_modified_after(1, TIMESTAMP_MIN, |dst, weight, ts| {
        observed.push((dst, weight, ts));
    });
    assert_eq!(observed, vec![(2, 9.0, 30)]);
}

#[test]
fn concurrent_inserts_to_one_vertex_serialize() {
    use rayon::prelude::*;

    let g = TemporalGraph::with_capacity(1024);
    // Many edges fan out of vertex 0 concurrently; each must land once.
    (1..512i64)
        .into_par_iter()
        .try_for_each(|dst| g.insert_edge(0, dst, 1.0, dst))
        .unwrap();

    assert_eq!(g.num_edges(), 511);
    assert_eq!(g.out_degree_modified_after(0, TIMESTAMP_MIN), 511);
    assert_eq!(g.highest_active_vertex(), 511);
}

#[test]
fn fragmentation_reflects_holes_after_truncation() {
    let g = TemporalGraph::with_capacity(64);
    // 20 edges from one vertex: two blocks, the second partially filled.
    for dst in 1..21 {
        g.insert_edge(0, dst, 1.0, dst).unwrap();
    }
    let before = g.fragmentation_stats(64);
    assert_eq!(before.num_edges, 20);
    assert_eq!(before.edge_blocks_in_use, 2);
    assert_eq!(before.num_fragmented_blocks, 0);

    let removed = g.truncate_older_than(11);
    assert_eq!(removed, 10);

    let after = g.fragmentation_stats(64);
    assert_eq!(after.num_edges, 10);
    assert_eq!(after.edge_blocks_in_use, 2);
    assert!(after.num_fragmented_blocks >= 1, "holes must be visible");
    assert!(after.num_empty_edges > before.num_empty_edges);

    // Holes are reused before any new block is allocated.
    g.insert_edge(0, 50, 1.0, 99).unwrap();
    assert_eq!(g.fragmentation_stats(64).edge_blocks_in_use, 2);
}
