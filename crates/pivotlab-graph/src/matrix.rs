//! Checks and normalization on dense weight matrices, where 0 means "no edge".

use crate::error::GraphError;

/// Opposite weights closer than this count as equal
pub const EQUAL_WEIGHT_TOLERANCE: f64 = 1e-12;

/// Number of nodes, or the first row whose length breaks squareness.
pub fn check_square(matrix: &[Vec<f64>]) -> Result<usize, GraphError> {
    let n = matrix.len();
    for (row, entries) in matrix.iter().enumerate() {
        if entries.len() != n {
            return Err(GraphError::NotSquare {
                row,
                len: entries.len(),
                expected: n,
            });
        }
    }
    Ok(n)
}

/// First pair `(i, j)`, `i < j`, whose two directed edges both exist with
/// the same weight.
///
/// Two identical opposite edges are an undirected edge entered by mistake;
/// opposite edges with different weights are allowed.
pub fn validate_directed(matrix: &[Vec<f64>]) -> Option<(usize, usize)> {
    let n = matrix.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = matrix[i][j];
            let b = matrix[j][i];
            if a != 0.0 && b != 0.0 && (a - b).abs() < EQUAL_WEIGHT_TOLERANCE {
                return Some((i, j));
            }
        }
    }
    None
}

/// Mirror an undirected matrix.
///
/// For every `i < j` the single nonzero side wins; when both sides are set
/// the upper-triangle value `matrix[i][j]` is kept. The diagonal is untouched.
pub fn symmetrize(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut out = matrix.to_vec();
    let n = out.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = out[i][j];
            let b = out[j][i];
            let w = if a != 0.0 { a } else { b };
            out[i][j] = w;
            out[j][i] = w;
        }
    }
    out
}
