mod error;
mod manual;
mod problem;
mod simplex;
mod solution;
mod tableau;
pub mod view;

pub use error::SimplexError;
pub use manual::ManualInputError;
pub use problem::{LpProblem, Sense};
pub use simplex::{DEFAULT_TOLERANCE, Solver};
pub use solution::{Solution, SolveTrace};
pub use tableau::{Pivot, Tableau};
pub use view::{IterationView, LabeledTableau, build_iteration_views, iteration_views, problem_summary};
