//! Dijkstra's algorithm for a single source/target pair.
//!
//! Binary heap keyed by tentative distance. Requires non-negative weights;
//! a negative weight aborts the search when its edge is examined.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::adjacency::Adjacency;
use crate::error::GraphError;
use crate::path::{ShortestPath, walk_predecessors};

/// Shortest path from `source` to `target`.
///
/// Stops as soon as `target` is popped. Negative weights are detected
/// lazily: an edge that is never examined is never checked.
///
/// Time: O((V + E) log V)
pub fn dijkstra(
    adjacency: &Adjacency,
    source: usize,
    target: usize,
) -> Result<ShortestPath, GraphError> {
    adjacency.check_node(source)?;
    adjacency.check_node(target)?;

    let n = adjacency.num_nodes();
    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors = vec![None; n];
    let mut visited = vec![false; n];
    distances[source] = 0.0;

    // Distances are never negative here, so their bit patterns sort like the values
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0.0_f64.to_bits(), source)));

    while let Some(Reverse((_, u))) = heap.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        trace!(node = u, distance = distances[u], "settled");
        if u == target {
            break;
        }

        for edge in adjacency.neighbors(u) {
            if edge.weight < 0.0 {
                debug!(from = u, to = edge.to, weight = edge.weight, "negative edge");
                return Err(GraphError::NegativeEdgeOnDijkstra {
                    from: u,
                    to: edge.to,
                    weight: edge.weight,
                });
            }
            let candidate = distances[u] + edge.weight;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(u);
                heap.push(Reverse((candidate.to_bits(), edge.to)));
            }
        }
    }

    if distances[target].is_infinite() {
        return Ok(ShortestPath::unreachable());
    }

    Ok(ShortestPath {
        distance: distances[target],
        path: walk_predecessors(&predecessors, target),
    })
}
