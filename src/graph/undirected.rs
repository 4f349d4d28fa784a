/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Undirected graph container (spec §4.6), grounded on
//! `graph/simple_ugraph.h`'s `Ugraph<T>`.

use crate::bitset::Bitset;
use crate::error::GraphError;
use crate::graph::GraphCore;
use crate::rng::RandomSource;

#[derive(Clone, Debug)]
pub struct UGraph<B: Bitset> {
    core: GraphCore<B>,
}

impl<B: Bitset> UGraph<B> {
    pub fn new(n: usize) -> Result<Self, GraphError> {
        Ok(Self { core: GraphCore::new(n)? })
    }

    pub fn number_of_vertices(&self) -> usize {
        self.core.number_of_vertices()
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

    pub(crate) fn core(&self) -> &GraphCore<B> {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut GraphCore<B> {
        &mut self.core
    }

    pub fn is_edge(&self, v: usize, w: usize) -> bool {
        self.core.is_edge(v, w)
    }

    /// Bidirected add: sets `v -> w` and `w -> v`; the edge cache counts
    /// this as one undirected edge, not two.
    pub fn add_edge(&mut self, v: usize, w: usize) {
        if v == w {
            return;
        }
        self.core.row_mut(v).set(w);
        self.core.row_mut(w).set(v);
        self.core.mark_dirty();
    }

    pub fn remove_edge(&mut self, v: usize, w: usize) {
        if v == w {
            return;
        }
        self.core.row_mut(v).clear(w);
        self.core.row_mut(w).clear(v);
        self.core.mark_dirty();
    }

    pub fn remove_all_edges(&mut self) {
        let n = self.core.number_of_vertices();
        for v in 0..n {
            self.core.row_mut(v).clear_all();
        }
        self.core.mark_dirty();
    }

    pub fn degree(&self, v: usize) -> usize {
        self.core.degree_out(v)
    }

    /// Popcount of `row[v] AND mask`.
    pub fn degree_with_mask(&self, v: usize, mask: &B) -> usize {
        self.core.row(v).to_vector().into_iter().filter(|&p| mask.is_set(p as usize)).count()
    }

    /// As [`Self::degree_with_mask`] but stops counting once the running
    /// total reaches `ub`, returning `ub` early without scanning the rest
    /// of the row.
    pub fn degree_with_upper_bound(&self, v: usize, ub: usize, mask: &B) -> usize {
        let row = self.core.row(v);
        let mut count = 0usize;
        let mut p = row.lsb();
        while p != crate::word::NO_BIT {
            if mask.is_set(p as usize) {
                count += 1;
                if count >= ub {
                    return ub;
                }
            }
            p = row.next_after(p as usize);
        }
        count
    }

    /// Count of neighbors with index strictly greater than `v`, restricted
    /// to `mask` (spec glossary: "up-degree").
    pub fn degree_up(&self, v: usize, mask: &B) -> usize {
        self.core
            .row(v)
            .to_vector()
            .into_iter()
            .filter(|&p| p as usize > v && mask.is_set(p as usize))
            .count()
    }

    /// Number of undirected edges. `lazy` reads the cache when populated;
    /// otherwise recomputes as `sum(degree)/2`, which MUST be exact — an
    /// odd sum is a fatal invariant violation (spec §4.6).
    pub fn number_of_edges(&mut self, lazy: bool) -> Result<u64, GraphError> {
        if lazy {
            if let Some(n) = self.core.cached_edges() {
                return Ok(n);
            }
        }
        let sum: u64 = self.core.rows().iter().map(|r| r.size() as u64).sum();
        if sum % 2 != 0 {
            return Err(GraphError::InvariantViolation(format!(
                "sum of undirected degrees {sum} is odd"
            )));
        }
        let edges = sum / 2;
        self.core.set_cached_edges(edges);
        Ok(edges)
    }

    /// Edges with both endpoints in `subset`, counted once per unordered
    /// pair (upper triangle).
    pub fn number_of_edges_induced(&self, subset: &B) -> u64 {
        let n = self.core.number_of_vertices();
        let mut count = 0u64;
        for i in 0..n.saturating_sub(1) {
            if !subset.is_set(i) {
                continue;
            }
            for j in (i + 1)..n {
                if subset.is_set(j) && self.core.is_edge(i, j) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn density(&mut self, lazy: bool) -> Result<f64, GraphError> {
        let n = self.core.number_of_vertices() as u64;
        let max_edges = n * (n - 1);
        if max_edges == 0 {
            return Ok(0.0);
        }
        Ok(2.0 * self.number_of_edges(lazy)? as f64 / max_edges as f64)
    }

    pub fn block_density(&self) -> f64 {
        self.core.block_density()
    }

    pub fn block_density_sparse(&self) -> f64 {
        self.core.block_density_sparse()
    }

    pub fn shrink_to_fit(&mut self) {
        self.core.shrink_to_fit();
    }

    /// Graph on the same vertices with edge `(i, j)`, `i < j`, iff `self`
    /// lacks it.
    pub fn complement(&self) -> Result<Self, GraphError> {
        let n = self.core.number_of_vertices();
        let mut out = Self::new(n)?;
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                if !self.core.is_edge(i, j) {
                    out.add_edge(i, j);
                }
            }
        }
        Ok(out)
    }

    /// Subgraph induced by an arbitrary vertex list: vertex `vertices[i]`
    /// in `self` becomes vertex `i` in the output.
    pub fn induced_subgraph_by(&self, vertices: &[usize]) -> Result<Self, GraphError> {
        if vertices.is_empty() {
            return Err(GraphError::InvalidSize(0));
        }
        let mut out = Self::new(vertices.len())?;
        for i in 0..vertices.len() - 1 {
            for j in (i + 1)..vertices.len() {
                if self.core.is_edge(vertices[i], vertices[j]) {
                    out.add_edge(i, j);
                }
            }
        }
        Ok(out)
    }

    pub fn gen_random_edges(&mut self, p: f64, rng: &mut dyn RandomSource) {
        self.remove_all_edges();
        let n = self.core.number_of_vertices();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                if rng.bernoulli(p) {
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

    #[test]
    fn edge_count_and_degrees() {
        let mut g: UGraph<BitsetDense> = UGraph::new(6).unwrap();
        for &(v, w) in &[(1, 2), (1, 3), (1, 4), (3, 5)] {
            g.add_edge(v, w);
        }
        assert_eq!(g.number_of_edges(false).unwrap(), 4);
        assert_eq!(g.degree(1), 3);
        assert_eq!(g.degree(3), 2);
        assert_eq!(g.degree(0), 0);
    }

    #[test]
    fn complement_of_triangle_plus_isolated() {
        let mut g: UGraph<BitsetDense> = UGraph::new(4).unwrap();
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(0, 2);
        let c = g.complement().unwrap();
        assert!(c.is_edge(0, 3));
        assert!(c.is_edge(1, 3));
        assert!(c.is_edge(2, 3));
        assert!(!c.is_edge(0, 1));
        assert!(!c.is_edge(1, 2));
        assert!(!c.is_edge(0, 2));
    }

    #[test]
    fn symmetry_holds_for_every_pair() {
        let mut g: UGraph<BitsetDense> = UGraph::new(5).unwrap();
        g.add_edge(0, 4);
        g.add_edge(2, 3);
        for v in 0..5 {
            for w in 0..5 {
                assert_eq!(g.is_edge(v, w), g.is_edge(w, v));
            }
        }
    }

    #[test]
    fn induced_subgraph_remaps_indices() {
        let mut g: UGraph<BitsetDense> = UGraph::new(6).unwrap();
        g.add_edge(1, 3);
        g.add_edge(3, 5);
        let sub = g.induced_subgraph_by(&[1, 3, 5]).unwrap();
        assert!(sub.is_edge(0, 1));
        assert!(sub.is_edge(1, 2));
        assert!(!sub.is_edge(0, 2));
    }
}
