/// Shortest route between two nodes.
///
/// An unreachable target has `distance = +inf` and an empty `path`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub distance: f64,
    /// Node indices from source to target, both included
    pub path: Vec<usize>,
}

impl ShortestPath {
    pub fn unreachable() -> Self {
        Self {
            distance: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite() && !self.path.is_empty()
    }
}

/// Distances and predecessors from one source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub source: usize,
    /// `+inf` for unreached nodes
    pub distances: Vec<f64>,
    /// `None` for the source and for unreached nodes
    pub predecessors: Vec<Option<usize>>,
}

impl ShortestPathTree {
    pub fn distance(&self, target: usize) -> Option<f64> {
        self.distances.get(target).copied()
    }

    /// Route from the source to `target`, following predecessors back.
    pub fn path_to(&self, target: usize) -> ShortestPath {
        match self.distances.get(target) {
            Some(&distance) if distance.is_finite() => ShortestPath {
                distance,
                path: walk_predecessors(&self.predecessors, target),
            },
            _ => ShortestPath::unreachable(),
        }
    }
}

/// Node sequence ending at `target`, rebuilt from a predecessor table.
pub(crate) fn walk_predecessors(predecessors: &[Option<usize>], target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut node = target;
    while let Some(prev) = predecessors[node] {
        // A predecessor chain never revisits a node unless the table is corrupt
        if path.len() > predecessors.len() {
            break;
        }
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}
