//! Bellman-Ford single-source shortest paths.
//!
//! Handles negative edge weights and detects negative cycles reachable from
//! the source.

use tracing::debug;

use crate::adjacency::Adjacency;
use crate::error::GraphError;
use crate::path::ShortestPathTree;

/// Shortest distances from `source` to every node.
///
/// Runs at most `V - 1` relaxation rounds, stopping early after a round with
/// no update, then one more pass: any edge that still relaxes means a
/// negative cycle.
///
/// Time: O(V * E)
pub fn bellman_ford(adjacency: &Adjacency, source: usize) -> Result<ShortestPathTree, GraphError> {
    adjacency.check_node(source)?;

    let n = adjacency.num_nodes();
    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors = vec![None; n];
    distances[source] = 0.0;

    for round in 0..n.saturating_sub(1) {
        let mut updated = false;

        for (u, edge) in adjacency.edges() {
            if distances[u].is_infinite() {
                continue;
            }
            let candidate = distances[u] + edge.weight;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(u);
                updated = true;
            }
        }

        if !updated {
            debug!(rounds = round + 1, "bellman-ford converged early");
            break;
        }
    }

    for (u, edge) in adjacency.edges() {
        if distances[u].is_finite() && distances[u] + edge.weight < distances[edge.to] {
            debug!(from = u, to = edge.to, "edge still relaxes after V-1 rounds");
            return Err(GraphError::NegativeCycleDetected { origin: source });
        }
    }

    Ok(ShortestPathTree {
        source,
        distances,
        predecessors,
    })
}
