use petgraph::algo::astar;
use petgraph::graphmap::NodeTrait;

use crate::graph::DirectedGraph;

/// Shortest paths along edge direction in a (small) [`DirectedGraph`], such as a component graph.
pub struct PathFinder<'a, N: NodeTrait, D> {
    graph: &'a DirectedGraph<N, D>,
}

impl<'a, N: NodeTrait, D> PathFinder<'a, N, D> {
    /// Construct a path finder borrowing `graph`.
    pub fn new(graph: &'a DirectedGraph<N, D>) -> Self {
        Self { graph }
    }

    /// The shortest path from `from` to `to`, including both ends.
    ///
    /// Empty if `to` is unreachable, either node is missing, or `from == to` without a self loop.
    /// A self loop yields `[from, from]`.
    pub fn find(&self, from: N, to: N) -> Vec<N> {
        if !self.graph.contains_node(from) || !self.graph.contains_node(to) {
            return Vec::new();
        }

        if from == to {
            return match self.graph.contains_edge(from, to) {
                true => vec![from, to],
                false => Vec::new(),
            };
        }

        astar(self.graph.inner(), from, |node| node == to, |_| 1usize, |_| 0)
            .map(|(_, path)| path)
            .unwrap_or_default()
    }

    /// The length of [`Self::find`]'s path, counted in nodes.
    pub fn distance(&self, from: N, to: N) -> usize {
        self.find(from, to).len()
    }
}
