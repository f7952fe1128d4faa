use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Weight matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("Node {node} out of range for a graph of {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },
    #[error("Dijkstra does not support negative weights: edge {from}->{to} has weight {weight}")]
    NegativeEdgeOnDijkstra { from: usize, to: usize, weight: f64 },
    #[error("Negative cycle reachable from node {origin}")]
    NegativeCycleDetected { origin: usize },
}
