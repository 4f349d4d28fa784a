/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Edge-weighted overlay (spec §4.8), grounded on
//! `src/graph/simple_graph_ew.cpp`'s `Base_Graph_EW<Graph_t, W>` /
//! `Graph_EW<ugraph, W>`.
//!
//! The weight matrix is `N x N`; the diagonal doubles as vertex weight, and
//! `None` is `NO_WEIGHT`. For the undirected overlay, `set_edge_weight` and
//! `add_edge` mirror both triangles so `we[v][w] == we[w][v]` always holds.

use crate::bitset::Bitset;
use crate::error::GraphError;
use crate::graph::UGraph;

/// Which diagonal/off-diagonal cells [`EdgeWeightedGraph::complement_weights`]
/// negates (`simple_graph_ew.cpp`'s `EDGE`/`VERTEX`/`BOTH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeightKind {
    Edge,
    Vertex,
    Both,
}

#[derive(Clone, Debug)]
pub struct EdgeWeightedGraph<B: Bitset> {
    graph: UGraph<B>,
    weights: Vec<Vec<Option<f64>>>,
}

impl<B: Bitset> EdgeWeightedGraph<B> {
    pub fn new(n: usize) -> Result<Self, GraphError> {
        let graph = UGraph::new(n)?;
        Ok(Self { weights: vec![vec![None; n]; n], graph })
    }

    pub fn from_graph(graph: UGraph<B>) -> Self {
        let n = graph.number_of_vertices();
        Self { graph, weights: vec![vec![None; n]; n] }
    }

    pub fn graph(&self) -> &UGraph<B> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut UGraph<B> {
        &mut self.graph
    }

    pub fn edge_weight(&self, v: usize, w: usize) -> Option<f64> {
        self.weights[v][w]
    }

    pub fn vertex_weight(&self, v: usize) -> Option<f64> {
        self.weights[v][v]
    }

    /// Adds the edge and sets both triangle cells to `val`.
    pub fn add_edge(&mut self, v: usize, w: usize, val: Option<f64>) {
        if v == w {
            return;
        }
        self.graph.add_edge(v, w);
        self.weights[v][w] = val;
        self.weights[w][v] = val;
    }

    pub fn set_vertex_weight(&mut self, v: usize, val: Option<f64>) {
        self.weights[v][v] = val;
    }

    /// Sets the weight of `(v, w)`, `v != w`. Applies only if the edge
    /// exists, or `val` is `None` and the edge does not exist; otherwise
    /// it is a silent no-op (`simple_graph_ew.cpp`'s `set_weight` logs a
    /// warning and refuses rather than fabricate an edge).
    pub fn set_edge_weight(&mut self, v: usize, w: usize, val: Option<f64>) {
        assert_ne!(v, w, "set_edge_weight called on the diagonal");
        let is_edge = self.graph.is_edge(v, w);
        if is_edge || (val.is_none() && !is_edge) {
            self.weights[v][w] = val;
            self.weights[w][v] = val;
        } else {
            log::warn!("attempting to set edge weight on non-edge ({v}, {w})");
        }
    }

    /// True iff no edge carries `NO_WEIGHT`.
    pub fn is_consistent(&self) -> bool {
        let n = self.graph.number_of_vertices();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                if self.graph.is_edge(i, j) && self.weights[i][j].is_none() {
                    return false;
                }
            }
        }
        true
    }

    pub fn vertex_weights(&self) -> Vec<Option<f64>> {
        (0..self.graph.number_of_vertices()).map(|v| self.weights[v][v]).collect()
    }

    /// Negates the cells selected by `kind`, skipping `NO_WEIGHT`.
    pub fn complement_weights(&mut self, kind: EdgeWeightKind) {
        let n = self.graph.number_of_vertices();
        match kind {
            EdgeWeightKind::Vertex => {
                for v in 0..n {
                    if let Some(x) = self.weights[v][v] {
                        self.weights[v][v] = Some(-x);
                    }
                }
            }
            EdgeWeightKind::Edge => {
                for i in 0..n.saturating_sub(1) {
                    for j in (i + 1)..n {
                        if let Some(x) = self.weights[i][j] {
                            self.weights[i][j] = Some(-x);
                            self.weights[j][i] = Some(-x);
                        }
                    }
                }
            }
            EdgeWeightKind::Both => {
                self.complement_weights(EdgeWeightKind::Edge);
                self.complement_weights(EdgeWeightKind::Vertex);
            }
        }
    }

    /// Sets `NO_WEIGHT` on every off-diagonal cell that is not an edge.
    pub fn erase_non_edge_weights(&mut self) {
        let n = self.graph.number_of_vertices();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                if !self.graph.is_edge(i, j) {
                    self.weights[i][j] = None;
                    self.weights[j][i] = None;
                }
            }
        }
    }

    /// Clears all vertex weights, optionally also erasing non-edge weights.
    pub fn make_edge_weighted(&mut self, erase_non_edges: bool) {
        let n = self.graph.number_of_vertices();
        for v in 0..n {
            self.weights[v][v] = None;
        }
        if erase_non_edges {
            self.erase_non_edge_weights();
        }
    }

    /// Graph complement of the topology, carrying the full weight matrix
    /// over unchanged.
    pub fn complement_graph_preserving_weights(&self) -> Result<Self, GraphError> {
        Ok(Self { graph: self.graph.complement()?, weights: self.weights.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;

    #[test]
    fn add_edge_mirrors_weight() {
        let mut g: EdgeWeightedGraph<BitsetDense> = EdgeWeightedGraph::new(4).unwrap();
        g.add_edge(0, 2, Some(3.5));
        assert_eq!(g.edge_weight(0, 2), Some(3.5));
        assert_eq!(g.edge_weight(2, 0), Some(3.5));
    }

    #[test]
    fn set_weight_refuses_on_missing_edge() {
        let mut g: EdgeWeightedGraph<BitsetDense> = EdgeWeightedGraph::new(3).unwrap();
        g.set_edge_weight(0, 1, Some(5.0));
        assert_eq!(g.edge_weight(0, 1), None);
    }

    #[test]
    fn is_consistent_flags_missing_edge_weight() {
        let mut g: EdgeWeightedGraph<BitsetDense> = EdgeWeightedGraph::new(3).unwrap();
        g.graph_mut().add_edge(0, 1);
        assert!(!g.is_consistent());
        g.set_edge_weight(0, 1, Some(1.0));
        assert!(g.is_consistent());
    }

    #[test]
    fn make_edge_weighted_clears_diagonal() {
        let mut g: EdgeWeightedGraph<BitsetDense> = EdgeWeightedGraph::new(3).unwrap();
        g.set_vertex_weight(0, Some(2.0));
        g.add_edge(0, 1, Some(1.0));
        g.make_edge_weighted(true);
        assert_eq!(g.vertex_weight(0), None);
    }

    #[test]
    fn erase_non_edge_weights_only_touches_non_edges() {
        let mut g: EdgeWeightedGraph<BitsetDense> = EdgeWeightedGraph::new(3).unwrap();
        g.add_edge(0, 1, Some(1.0));
        g.weights[0][2] = Some(9.0);
        g.erase_non_edge_weights();
        assert_eq!(g.edge_weight(0, 1), Some(1.0));
        assert_eq!(g.edge_weight(0, 2), None);
    }
}
