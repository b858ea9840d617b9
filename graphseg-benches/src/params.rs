//! Benchmark parameter types.

use std::fmt;

/// Parameters for a grid segmentation benchmark run.
#[derive(Clone, Debug)]
pub struct GridBenchParams {
    /// Cells per side of the square grid.
    pub side: usize,
    /// Whether diagonal neighbours are connected.
    pub diagonal: bool,
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connectivity = if self.diagonal { 8 } else { 4 };
        write!(f, "side={},conn={connectivity}", self.side)
    }
}

/// Parameters for an edge-list segmentation benchmark run.
#[derive(Clone, Debug)]
pub struct EdgeBenchParams {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of random edges.
    pub edge_count: usize,
}

impl fmt::Display for EdgeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.vertex_count, self.edge_count)
    }
}
