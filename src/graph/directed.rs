/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Directed graph container (spec §4.5), grounded on `src/graph/simple_graph.h`.

use crate::bitset::Bitset;
use crate::error::GraphError;
use crate::graph::GraphCore;
use crate::rng::RandomSource;

#[derive(Clone, Debug)]
pub struct DiGraph<B: Bitset> {
    core: GraphCore<B>,
}

impl<B: Bitset> DiGraph<B> {
    pub fn new(n: usize) -> Result<Self, GraphError> {
        Ok(Self { core: GraphCore::new(n)? })
    }

    pub fn number_of_vertices(&self) -> usize {
        self.core.number_of_vertices()
    }

    pub fn number_of_blocks(&self) -> usize {
        self.core.number_of_blocks()
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    pub fn path(&self) -> &str {
        self.core.path()
    }

    pub fn set_name(&mut self, instance: impl Into<String>) {
        self.core.set_name(instance);
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.core.set_path(path);
    }

    pub fn neighbors(&self, v: usize) -> &B {
        self.core.row(v)
    }

    pub fn neighbors_mut(&mut self, v: usize) -> &mut B {
        self.core.row_mut(v)
    }

    pub fn rows(&self) -> &[B] {
        self.core.rows()
    }

    pub(crate) fn core(&self) -> &GraphCore<B> {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut GraphCore<B> {
        &mut self.core
    }

    pub fn is_edge(&self, v: usize, w: usize) -> bool {
        self.core.is_edge(v, w)
    }

    pub fn degree_out(&self, v: usize) -> usize {
        self.core.degree_out(v)
    }

    pub fn degree_in(&self, v: usize) -> usize {
        (0..self.core.number_of_vertices())
            .filter(|&i| i != v && self.core.is_edge(i, v))
            .count()
    }

    pub fn add_edge(&mut self, v: usize, w: usize) {
        if v == w {
            return;
        }
        self.core.row_mut(v).set(w);
        self.core.mark_dirty();
    }

    pub fn remove_edge(&mut self, v: usize, w: usize) {
        self.core.row_mut(v).clear(w);
        self.core.mark_dirty();
    }

    /// Removes every edge touching `v`, in or out.
    pub fn remove_edges_at(&mut self, v: usize) {
        self.core.row_mut(v).clear_all();
        let n = self.core.number_of_vertices();
        for w in 0..n {
            if w != v {
                self.core.row_mut(w).clear(v);
            }
        }
        self.core.mark_dirty();
    }

    pub fn remove_all_edges(&mut self) {
        let n = self.core.number_of_vertices();
        for v in 0..n {
            self.core.row_mut(v).clear_all();
        }
        self.core.mark_dirty();
    }

    /// Number of edges, reading the lazy cache when `lazy` is true and a
    /// value is cached; otherwise recomputes and refreshes the cache.
    pub fn number_of_edges(&mut self, lazy: bool) -> u64 {
        if lazy {
            if let Some(n) = self.core.cached_edges() {
                return n;
            }
        }
        let total: u64 = self.core.rows().iter().map(|r| r.size() as u64).sum();
        self.core.set_cached_edges(total);
        total
    }

    /// Edges with both endpoints in `subset` (self-loops counted if
    /// `subset` marks a vertex adjacent to itself, matching the source).
    pub fn number_of_edges_induced(&self, subset: &B) -> u64 {
        let n = self.core.number_of_vertices();
        let mut count = 0u64;
        for i in 0..n {
            if !subset.is_set(i) {
                continue;
            }
            for j in 0..n {
                if subset.is_set(j) && self.core.is_edge(i, j) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn density(&mut self, lazy: bool) -> f64 {
        let n = self.core.number_of_vertices() as u64;
        let max_edges = n * (n - 1);
        if max_edges == 0 {
            return 0.0;
        }
        self.number_of_edges(lazy) as f64 / max_edges as f64
    }

    pub fn block_density(&self) -> f64 {
        self.core.block_density()
    }

    pub fn block_density_sparse(&self) -> f64 {
        self.core.block_density_sparse()
    }

    pub fn is_self_loop_present(&self) -> bool {
        self.core.is_self_loop_present()
    }

    pub fn shrink_to_fit(&mut self) {
        self.core.shrink_to_fit();
    }

    /// Induced submatrix on the first `first_k` vertices.
    pub fn subgraph_first_k(&self, first_k: usize) -> Result<Self, GraphError> {
        Ok(Self { core: self.core.subgraph_first_k(first_k)? })
    }

    /// Graph on the same vertex set with an edge `(i, j)`, `i != j`, iff
    /// `self` lacks it.
    pub fn complement(&self) -> Result<Self, GraphError> {
        let n = self.core.number_of_vertices();
        let mut out = Self::new(n)?;
        for i in 0..n {
            for j in 0..n {
                if i != j && !self.core.is_edge(i, j) {
                    out.add_edge(i, j);
                }
            }
        }
        Ok(out)
    }

    /// Adds the reverse of every edge present, turning the graph
    /// bidirected (`simple_graph.h`'s `make_bidirected`).
    pub fn make_bidirected(&mut self) {
        let n = self.core.number_of_vertices();
        let existing: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| i != j).map(move |j| (i, j)))
            .filter(|&(i, j)| self.core.is_edge(i, j))
            .collect();
        for (i, j) in existing {
            self.core.row_mut(j).set(i);
        }
        self.core.mark_dirty();
    }

    /// Replaces every edge with an independent Bernoulli(p) draw.
    pub fn gen_random_edges(&mut self, p: f64, rng: &mut dyn RandomSource) {
        self.remove_all_edges();
        let n = self.core.number_of_vertices();
        for i in 0..n {
            for j in 0..n {
                if i != j && rng.bernoulli(p) {
                    self.add_edge(i, j);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;
    use crate::rng::SeededRng;

    #[test]
    fn add_edge_rejects_self_loop() {
        let mut g: DiGraph<BitsetDense> = DiGraph::new(4).unwrap();
        g.add_edge(1, 1);
        assert!(!g.is_edge(1, 1));
        assert_eq!(g.number_of_edges(false), 0);
    }

    #[test]
    fn degree_in_out_and_edge_count() {
        let mut g: DiGraph<BitsetDense> = DiGraph::new(4).unwrap();
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(3, 1);
        assert_eq!(g.degree_out(0), 2);
        assert_eq!(g.degree_in(1), 2);
        assert_eq!(g.number_of_edges(false), 3);
    }

    #[test]
    fn complement_of_k3_plus_isolated() {
        let mut g: DiGraph<BitsetDense> = DiGraph::new(4).unwrap();
        for &(v, w) in &[(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0)] {
            g.add_edge(v, w);
        }
        let c = g.complement().unwrap();
        for &(v, w) in &[(0, 3), (3, 0), (1, 3), (3, 1), (2, 3), (3, 2)] {
            assert!(c.is_edge(v, w), "missing complement edge ({v},{w})");
        }
        assert!(!c.is_edge(0, 1));
    }

    #[test]
    fn random_generation_is_reproducible_with_same_seed() {
        let mut rng1 = SeededRng::new(7);
        let mut rng2 = SeededRng::new(7);
        let mut g1: DiGraph<BitsetDense> = DiGraph::new(20).unwrap();
        let mut g2: DiGraph<BitsetDense> = DiGraph::new(20).unwrap();
        g1.gen_random_edges(0.3, &mut rng1);
        g2.gen_random_edges(0.3, &mut rng2);
        assert_eq!(g1.number_of_edges(false), g2.number_of_edges(false));
        for v in 0..20 {
            assert_eq!(g1.neighbors(v).to_vector(), g2.neighbors(v).to_vector());
        }
    }
}
