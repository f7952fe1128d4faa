use crate::error::SimplexError;

/// Optimization direction
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    #[default]
    Max,
    Min,
}

/// A linear program in `<=` standard form with non-negative variables:
///
/// ```text
/// max/min  c·x
/// s.t.     A x <= b,  x >= 0
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Objective coefficients, index = variable number - 1
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    pub objective: Vec<f64>,
    /// Constraint matrix, row-major
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    pub constraints: Vec<Vec<f64>>,
    /// Right-hand side of each constraint
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    pub rhs: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sense: Sense,
}

impl LpProblem {
    pub fn new(objective: Vec<f64>, sense: Sense) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
            rhs: Vec::new(),
            sense,
        }
    }

    pub fn from_parts(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>, sense: Sense) -> Self {
        Self {
            objective: c,
            constraints: a,
            rhs: b,
            sense,
        }
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, rhs: f64) {
        self.constraints.push(coefficients);
        self.rhs.push(rhs);
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }

    /// Check dimensions and finiteness, then that the origin is a feasible start.
    pub fn validate(&self) -> Result<(), SimplexError> {
        let n = self.num_variables();
        let m = self.num_constraints();

        if n == 0 {
            return Err(SimplexError::ShapeMismatch(
                "objective has no coefficients".to_string(),
            ));
        }
        if self.constraints.len() != m {
            return Err(SimplexError::ShapeMismatch(format!(
                "{} constraint rows but {} right-hand side values",
                self.constraints.len(),
                m
            )));
        }
        for (i, row) in self.constraints.iter().enumerate() {
            if row.len() != n {
                return Err(SimplexError::ShapeMismatch(format!(
                    "constraint {} has {} coefficients, expected {}",
                    i + 1,
                    row.len(),
                    n
                )));
            }
        }

        if let Some(j) = self.objective.iter().position(|v| !v.is_finite()) {
            return Err(SimplexError::NonFiniteInput {
                location: format!("objective coefficient {}", j + 1),
            });
        }
        for (i, row) in self.constraints.iter().enumerate() {
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(SimplexError::NonFiniteInput {
                    location: format!("constraint {} coefficient {}", i + 1, j + 1),
                });
            }
        }
        if let Some(i) = self.rhs.iter().position(|v| !v.is_finite()) {
            return Err(SimplexError::NonFiniteInput {
                location: format!("right-hand side {}", i + 1),
            });
        }

        // The all-slack basis is the only starting point, so it must be feasible
        if let Some((row, &rhs)) = self.rhs.iter().enumerate().find(|(_, b)| **b < 0.0) {
            return Err(SimplexError::InfeasibleStart { row, rhs });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_matches_from_parts() {
        let mut problem = LpProblem::new(vec![3.0, 5.0], Sense::Max);
        problem.add_constraint(vec![1.0, 0.0], 4.0);
        problem.add_constraint(vec![0.0, 2.0], 12.0);

        let direct = LpProblem::from_parts(
            vec![3.0, 5.0],
            vec![vec![1.0, 0.0], vec![0.0, 2.0]],
            vec![4.0, 12.0],
            Sense::Max,
        );

        assert_eq!(problem, direct);
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 2);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_row_length_mismatch() {
        let problem = LpProblem::from_parts(
            vec![1.0, 2.0],
            vec![vec![1.0, 1.0], vec![1.0]],
            vec![4.0, 3.0],
            Sense::Max,
        );

        assert!(matches!(problem.validate(), Err(SimplexError::ShapeMismatch(_))));
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let problem = LpProblem::from_parts(
            vec![1.0],
            vec![vec![1.0], vec![2.0]],
            vec![4.0],
            Sense::Max,
        );

        assert!(matches!(problem.validate(), Err(SimplexError::ShapeMismatch(_))));
    }

    #[test]
    fn test_empty_objective() {
        let problem = LpProblem::new(Vec::new(), Sense::Max);
        assert!(matches!(problem.validate(), Err(SimplexError::ShapeMismatch(_))));
    }

    #[test]
    fn test_non_finite_coefficient() {
        let problem = LpProblem::from_parts(
            vec![1.0, 1.0],
            vec![vec![1.0, f64::NAN]],
            vec![4.0],
            Sense::Max,
        );

        assert_eq!(
            problem.validate(),
            Err(SimplexError::NonFiniteInput {
                location: "constraint 1 coefficient 2".to_string()
            })
        );
    }

    #[test]
    fn test_negative_rhs_is_infeasible_start() {
        let problem = LpProblem::from_parts(
            vec![1.0],
            vec![vec![1.0], vec![-1.0]],
            vec![4.0, -2.0],
            Sense::Max,
        );

        assert_eq!(
            problem.validate(),
            Err(SimplexError::InfeasibleStart { row: 1, rhs: -2.0 })
        );
    }
}
