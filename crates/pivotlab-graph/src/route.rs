//! Named-node route queries over a dense weight matrix.
//!
//! A query runs validation, normalization and one of the two algorithms:
//!
//! ```text
//! Validating -> (ValidationFailed)
//!            -> Computing -> (NoPath | NegativeCycle | NegativeEdge)
//!                         -> PathFound
//! ```

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::adjacency::Adjacency;
use crate::bellman_ford::bellman_ford;
use crate::dijkstra::dijkstra;
use crate::error::GraphError;
use crate::matrix::{check_square, symmetrize, validate_directed};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    BellmanFord,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("{names} node names for a {nodes}x{nodes} matrix")]
    NameCountMismatch { names: usize, nodes: usize },
    #[error("Node {0} has an empty name")]
    EmptyName(usize),
    #[error("Duplicate node name: {0}")]
    DuplicateName(String),
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("Edges {from}->{to} and {to}->{from} have the same weight; use an undirected graph")]
    InvalidDirectedGraph { from: String, to: String },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Default node names `v1..vn`
pub fn default_names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("v{}", i)).collect()
}

/// One non-empty, unique name per node of a `nodes x nodes` matrix
pub(crate) fn validate_names(names: &[String], nodes: usize) -> Result<(), RouteError> {
    if names.len() != nodes {
        return Err(RouteError::NameCountMismatch {
            names: names.len(),
            nodes,
        });
    }
    let mut seen = HashSet::new();
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(RouteError::EmptyName(i));
        }
        if !seen.insert(name.as_str()) {
            return Err(RouteError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

/// A route question between two named nodes
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub names: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub directed: bool,
    pub source: String,
    pub target: String,
    pub algorithm: Algorithm,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    PathFound { distance: f64, path: Vec<usize> },
    NoPath,
}

impl RouteRequest {
    fn index_of(&self, name: &str) -> Result<usize, RouteError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| RouteError::UnknownNode(name.to_string()))
    }

    /// Validate, normalize and compute the route.
    ///
    /// Undirected matrices are symmetrized first. A Dijkstra query whose
    /// source and target coincide is answered directly with distance 0.
    pub fn run(&self) -> Result<RouteOutcome, RouteError> {
        let nodes = check_square(&self.matrix)?;
        validate_names(&self.names, nodes)?;
        let source = self.index_of(&self.source)?;
        let target = self.index_of(&self.target)?;

        let matrix = if self.directed {
            if let Some((i, j)) = validate_directed(&self.matrix) {
                return Err(RouteError::InvalidDirectedGraph {
                    from: self.names[i].clone(),
                    to: self.names[j].clone(),
                });
            }
            self.matrix.clone()
        } else {
            symmetrize(&self.matrix)
        };

        if self.algorithm == Algorithm::Dijkstra && source == target {
            return Ok(RouteOutcome::PathFound {
                distance: 0.0,
                path: vec![source],
            });
        }

        let adjacency = Adjacency::from_matrix(&matrix, self.directed)?;
        debug!(
            algorithm = ?self.algorithm,
            nodes,
            edges = adjacency.num_edges(),
            source,
            target,
            "computing route"
        );

        let route = match self.algorithm {
            Algorithm::Dijkstra => dijkstra(&adjacency, source, target)?,
            Algorithm::BellmanFord => bellman_ford(&adjacency, source)?.path_to(target),
        };

        if route.is_reachable() {
            Ok(RouteOutcome::PathFound {
                distance: route.distance,
                path: route.path,
            })
        } else {
            Ok(RouteOutcome::NoPath)
        }
    }

    /// `v1 → v3 → v4` for a path of node indices
    pub fn format_path(&self, path: &[usize]) -> String {
        path.iter()
            .map(|&i| self.names[i].as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}
