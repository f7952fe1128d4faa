use crate::error::GraphError;
use crate::matrix::check_square;

/// Outgoing edge in an adjacency list
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub weight: f64,
}

/// Adjacency lists built once from a dense weight matrix.
///
/// Neighbors keep the column order of the matrix. Self-loops on the diagonal
/// are never turned into edges.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Adjacency {
    lists: Vec<Vec<Edge>>,
    directed: bool,
}

impl Adjacency {
    /// An edge `i -> j` exists iff `matrix[i][j] != 0` and `i != j`.
    ///
    /// Undirected graphs are expected to be symmetric already, see
    /// [`crate::symmetrize`].
    pub fn from_matrix(matrix: &[Vec<f64>], directed: bool) -> Result<Self, GraphError> {
        let n = check_square(matrix)?;
        let lists = (0..n)
            .map(|i| {
                matrix[i]
                    .iter()
                    .enumerate()
                    .filter(|&(j, &w)| j != i && w != 0.0)
                    .map(|(j, &weight)| Edge { to: j, weight })
                    .collect()
            })
            .collect();
        Ok(Self { lists, directed })
    }

    pub fn num_nodes(&self) -> usize {
        self.lists.len()
    }

    pub fn num_edges(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn neighbors(&self, node: usize) -> &[Edge] {
        &self.lists[node]
    }

    /// All edges as `(from, edge)` in node order
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Edge)> {
        self.lists
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().map(move |e| (u, e)))
    }

    pub fn check_node(&self, node: usize) -> Result<(), GraphError> {
        if node < self.num_nodes() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes(),
            })
        }
    }
}
