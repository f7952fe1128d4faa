use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Non-finite value in {location}")]
    NonFiniteInput { location: String },
    #[error("Infeasible start: constraint {row} has negative right-hand side {rhs}")]
    InfeasibleStart { row: usize, rhs: f64 },
    #[error("Unbounded problem: no finite ratio for entering column {column}")]
    UnboundedProblem { column: usize },
    #[error("Iteration limit of {limit} pivots exceeded")]
    IterationLimitExceeded { limit: usize },
    #[error("Tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
    #[error("Degenerate pivot {value} at row {row}, column {column}")]
    DegeneratePivot { row: usize, column: usize, value: f64 },
}
