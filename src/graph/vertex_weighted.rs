/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Vertex-weighted overlay (spec §4.7), grounded on
//! `src/graph/simple_graph_w.cpp`'s `Base_Graph_W<Graph_t, W>`.
//!
//! Weights are `Option<f64>`: `None` is `NO_WEIGHT` (spec §9 design note
//! prefers this over an in-band `-1` sentinel in a language with sum types).
//! The default weight at construction is `Some(1.0)`, matching the source's
//! `DEFAULT_WEIGHT`.

use crate::bitset::Bitset;
use crate::error::GraphError;
use crate::graph::UGraph;

pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Clone, Debug)]
pub struct VertexWeightedGraph<B: Bitset> {
    graph: UGraph<B>,
    weights: Vec<Option<f64>>,
}

impl<B: Bitset> VertexWeightedGraph<B> {
    pub fn new(n: usize) -> Result<Self, GraphError> {
        let graph = UGraph::new(n)?;
        Ok(Self { weights: vec![Some(DEFAULT_WEIGHT); n], graph })
    }

    pub fn from_graph(graph: UGraph<B>) -> Self {
        let n = graph.number_of_vertices();
        Self { graph, weights: vec![Some(DEFAULT_WEIGHT); n] }
    }

    pub fn graph(&self) -> &UGraph<B> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut UGraph<B> {
        &mut self.graph
    }

    pub fn weight(&self, v: usize) -> Option<f64> {
        self.weights[v]
    }

    pub fn set_weight(&mut self, v: usize, x: Option<f64>) {
        self.weights[v] = x;
    }

    pub fn set_all_weights(&mut self, x: Option<f64>) {
        self.weights.fill(x);
    }

    pub fn set_weights_from(&mut self, weights: Vec<Option<f64>>) -> Result<(), GraphError> {
        if weights.len() != self.graph.number_of_vertices() {
            return Err(GraphError::InvariantViolation(format!(
                "expected {} weights, got {}",
                self.graph.number_of_vertices(),
                weights.len()
            )));
        }
        self.weights = weights;
        Ok(())
    }

    pub fn weight_vector(&self) -> &[Option<f64>] {
        &self.weights
    }

    /// Index and value of the maximum weight, treating `NO_WEIGHT` as
    /// absent from the comparison.
    pub fn max_weight(&self) -> Option<(usize, f64)> {
        self.weights
            .iter()
            .enumerate()
            .filter_map(|(v, w)| w.map(|x| (v, x)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn is_unit_weighted(&self) -> bool {
        self.weights.iter().all(|&w| w == Some(1.0))
    }

    /// Assigns `w[i] = ((i + 1) mod modulus) + 1` (the "Pullham 2008"
    /// generator named in spec §4.7).
    pub fn set_modulus_weights(&mut self, modulus: u64) {
        for (i, w) in self.weights.iter_mut().enumerate() {
            *w = Some((((i as u64 + 1) % modulus) + 1) as f64);
        }
    }

    pub fn negate_weights(&mut self) {
        for w in self.weights.iter_mut() {
            if let Some(x) = w {
                *x = -*x;
            }
        }
    }

    /// Graph complement of the underlying topology, carrying weights over
    /// unchanged.
    pub fn complement_graph_preserving_weights(&self) -> Result<Self, GraphError> {
        Ok(Self { graph: self.graph.complement()?, weights: self.weights.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;

    #[test]
    fn default_weights_are_unit() {
        let g: VertexWeightedGraph<BitsetDense> = VertexWeightedGraph::new(5).unwrap();
        assert!(g.is_unit_weighted());
    }

    #[test]
    fn modulus_weights_follow_pullham_formula() {
        let mut g: VertexWeightedGraph<BitsetDense> = VertexWeightedGraph::new(5).unwrap();
        g.set_modulus_weights(3);
        let expected: Vec<Option<f64>> =
            (0..5).map(|i| Some((((i as u64 + 1) % 3) + 1) as f64)).collect();
        assert_eq!(g.weight_vector(), expected.as_slice());
    }

    #[test]
    fn negate_skips_no_weight() {
        let mut g: VertexWeightedGraph<BitsetDense> = VertexWeightedGraph::new(3).unwrap();
        g.set_weight(1, None);
        g.negate_weights();
        assert_eq!(g.weight(0), Some(-1.0));
        assert_eq!(g.weight(1), None);
    }

    #[test]
    fn max_weight_reports_argmax() {
        let mut g: VertexWeightedGraph<BitsetDense> = VertexWeightedGraph::new(3).unwrap();
        g.set_weight(2, Some(9.0));
        assert_eq!(g.max_weight(), Some((2, 9.0)));
    }
}
