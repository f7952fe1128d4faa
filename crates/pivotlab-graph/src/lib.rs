mod adjacency;
mod bellman_ford;
mod describe;
mod dijkstra;
mod error;
mod matrix;
mod path;
mod route;

pub use adjacency::{Adjacency, Edge};
pub use bellman_ford::bellman_ford;
pub use describe::{describe, format_weight};
pub use dijkstra::dijkstra;
pub use error::GraphError;
pub use matrix::{EQUAL_WEIGHT_TOLERANCE, check_square, symmetrize, validate_directed};
pub use path::{ShortestPath, ShortestPathTree};
pub use route::{Algorithm, RouteError, RouteOutcome, RouteRequest, default_names};
