/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Cross-module scenarios spanning bitset, graph, and I/O layers.

use bitgraph::bitset::{Bitset, BitsetDense, BitsetSparse};
use bitgraph::graph::UGraph;
use bitgraph::io::dimacs;
use bitgraph::rng::SeededRng;

#[test]
fn dense_bitset_multiples_of_50() {
    let mut b = BitsetDense::new(301);
    for p in (0..=300).step_by(50) {
        b.set(p);
    }
    assert_eq!(b.size(), 7);
    for p in (0..=300).step_by(50) {
        assert!(b.is_set(p));
    }
    assert_eq!(b.msb(), 300);
    assert_eq!(b.lsb(), 0);
}

#[test]
fn sparse_range_set_spanning_blocks() {
    let mut b = BitsetSparse::new(10_000);
    b.set_range(3, 27);
    b.set(1002);
    b.set_range(29, 125);
    assert_eq!(b.size(), 25 + 1 + 97);
    assert!(!b.is_set(28));
    assert!(b.is_set(125));
}

#[test]
fn erdos_renyi_edge_count_within_three_sigma() {
    let n = 200usize;
    let p = 0.5;
    let mut g: UGraph<BitsetDense> = UGraph::new(n).unwrap();
    let mut rng = SeededRng::new(12345);
    g.gen_random_edges(p, &mut rng);

    let max_pairs = (n * (n - 1) / 2) as f64;
    let expected = max_pairs * p;
    let sigma = (max_pairs * p * (1.0 - p)).sqrt();

    let edges = g.number_of_edges(false).unwrap() as f64;
    assert!(
        (edges - expected).abs() <= 3.0 * sigma,
        "edge count {edges} outside 3 sigma of expected {expected} (sigma={sigma})"
    );
}

#[test]
fn dimacs_round_trip_preserves_adjacency() {
    let n = 200usize;
    let mut g: UGraph<BitsetDense> = UGraph::new(n).unwrap();
    let mut rng = SeededRng::new(7);
    g.gen_random_edges(0.3, &mut rng);

    let mut buf: Vec<u8> = Vec::new();
    dimacs::write_dimacs_undirected(&g, &mut buf).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.dimacs");
    std::fs::write(&path, &buf).unwrap();

    let g2: UGraph<BitsetDense> = dimacs::read_dimacs_undirected(&path).unwrap();
    assert_eq!(g.number_of_vertices(), g2.number_of_vertices());
    for i in 0..n {
        for j in 0..n {
            assert_eq!(g.is_edge(i, j), g2.is_edge(i, j), "mismatch at ({i}, {j})");
        }
    }
}
