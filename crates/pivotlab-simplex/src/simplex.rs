use tracing::{debug, trace};

use crate::error::SimplexError;
use crate::problem::{LpProblem, Sense};
use crate::solution::{Solution, SolveTrace};
use crate::tableau::{Pivot, Tableau};

/// Tolerance shared by the pivot rule, optimality test and basis detection
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Tableau simplex solver for `<=` problems whose origin is feasible
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Run the primal simplex method from the all-slack basis, recording
    /// the tableau before the first pivot and after every pivot.
    pub fn solve(&self, problem: &LpProblem) -> Result<SolveTrace, SimplexError> {
        check_tolerance(self.tolerance)?;
        problem.validate()?;

        let mut tableau = Tableau::from_problem(problem);
        let mut steps = vec![tableau.clone()];
        debug!(
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            sense = ?problem.sense,
            "starting simplex"
        );

        loop {
            let Some(column) = tableau.entering_column(self.tolerance) else {
                break;
            };
            let Some(row) = tableau.leaving_row(column, self.tolerance) else {
                debug!(column, "entering column has no positive entry");
                return Err(SimplexError::UnboundedProblem { column });
            };
            if steps.len() > self.max_iterations {
                return Err(SimplexError::IterationLimitExceeded {
                    limit: self.max_iterations,
                });
            }

            tableau.pivot(Pivot { row, column }, self.tolerance)?;
            trace!(
                iteration = steps.len(),
                row,
                column,
                objective = tableau.objective_value(),
                "pivoted"
            );
            steps.push(tableau.clone());
        }

        let solution = self.extract_solution(&tableau, problem.sense);
        debug!(
            iterations = steps.len() - 1,
            objective = solution.objective_value,
            "simplex reached optimum"
        );

        Ok(SolveTrace { steps, solution })
    }

    /// Read the basic structural variables off an optimal tableau.
    ///
    /// The reported objective has the sign of the original problem: for
    /// minimization the max-form value held by the tableau is negated back.
    pub fn extract_solution(&self, tableau: &Tableau, sense: Sense) -> Solution {
        let n_vars = tableau.num_variables();
        let rhs_col = tableau.rhs_column();

        let mut values = vec![0.0; n_vars];
        for (row, basic) in tableau.basis(self.tolerance).into_iter().enumerate() {
            if let Some(j) = basic.filter(|&j| j < n_vars) {
                values[j] = tableau.get(row, rhs_col);
            }
        }

        let objective_value = match sense {
            Sense::Max => tableau.objective_value(),
            Sense::Min => -tableau.objective_value(),
        };

        Solution {
            values,
            objective_value,
        }
    }
}

/// NaN or a non-positive tolerance turns every pivot comparison meaningless
pub(crate) fn check_tolerance(tolerance: f64) -> Result<(), SimplexError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(SimplexError::InvalidTolerance(tolerance))
    }
}
