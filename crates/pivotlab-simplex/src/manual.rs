//! Plain-text LP input: comma-separated costs plus one `<=` row per line.
//!
//! ```text
//! 3,5
//! 1,0 <= 4
//! 0,2 <= 12
//! 3,2 <= 18
//! ```

use thiserror::Error;

use crate::problem::{LpProblem, Sense};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManualInputError {
    #[error("The objective coefficients are empty")]
    EmptyObjective,
    #[error("Objective coefficients must be comma-separated numbers, got '{0}'")]
    InvalidObjective(String),
    #[error("Enter at least one constraint")]
    NoConstraints,
    #[error("Cannot interpret constraint '{0}', use the form '1,2 <= 6'")]
    UnrecognizedConstraint(String),
    #[error("Only '<=' constraints are accepted, found '{operator}' in '{line}'")]
    UnsupportedOperator { operator: String, line: String },
    #[error("Constraint '{line}' needs {expected} numeric coefficients")]
    InvalidCoefficients { line: String, expected: usize },
    #[error("Invalid right-hand side in constraint '{0}'")]
    InvalidRhs(String),
}

/// Relational operators, longest first so `<=` is never read as `=`
const OPERATORS: [&str; 3] = ["<=", ">=", "="];

/// Parse comma-separated numbers, ignoring blanks and empty fields
fn parse_numbers(text: &str) -> Option<Vec<f64>> {
    text.split(',')
        .map(|field| field.split_whitespace().collect::<String>())
        .filter(|field| !field.is_empty())
        .map(|field| field.parse::<f64>().ok())
        .collect()
}

impl LpProblem {
    /// Build a problem from the costs line and the constraint lines.
    ///
    /// Blank constraint lines are skipped. Every constraint must carry one
    /// coefficient per cost and use `<=`.
    pub fn parse_manual(
        costs: &str,
        constraints: &str,
        sense: Sense,
    ) -> Result<Self, ManualInputError> {
        if costs.trim().is_empty() {
            return Err(ManualInputError::EmptyObjective);
        }
        let objective = parse_numbers(costs)
            .ok_or_else(|| ManualInputError::InvalidObjective(costs.trim().to_string()))?;
        if objective.is_empty() {
            return Err(ManualInputError::EmptyObjective);
        }

        let mut problem = LpProblem::new(objective, sense);
        for line in constraints.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let Some((operator, at)) = OPERATORS
                .iter()
                .find_map(|&op| line.find(op).map(|at| (op, at)))
            else {
                return Err(ManualInputError::UnrecognizedConstraint(line.to_string()));
            };
            if operator != "<=" {
                return Err(ManualInputError::UnsupportedOperator {
                    operator: operator.to_string(),
                    line: line.to_string(),
                });
            }

            let (lhs, rhs) = (&line[..at], &line[at + operator.len()..]);
            let expected = problem.num_variables();
            let coefficients = parse_numbers(lhs)
                .filter(|row| row.len() == expected)
                .ok_or_else(|| ManualInputError::InvalidCoefficients {
                    line: line.to_string(),
                    expected,
                })?;
            let rhs = rhs
                .trim()
                .parse::<f64>()
                .map_err(|_| ManualInputError::InvalidRhs(line.to_string()))?;

            problem.add_constraint(coefficients, rhs);
        }

        if problem.num_constraints() == 0 {
            return Err(ManualInputError::NoConstraints);
        }
        Ok(problem)
    }

    /// Parse a whole text document: the first non-blank line holds the
    /// costs, the remaining lines the constraints.
    pub fn parse_manual_document(text: &str, sense: Sense) -> Result<Self, ManualInputError> {
        let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
        let costs = lines.next().unwrap_or("");
        let rest: Vec<&str> = lines.collect();
        Self::parse_manual(costs, &rest.join("\n"), sense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::Solver;

    #[test]
    fn test_textbook_input_solves() {
        let problem = LpProblem::parse_manual(
            "3, 5",
            "1,0 <= 4\n\n  0, 2 <= 12\n3,2<=18\n",
            Sense::Max,
        )
        .unwrap();

        assert_eq!(
            problem,
            LpProblem::from_parts(
                vec![3.0, 5.0],
                vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
                vec![4.0, 12.0, 18.0],
                Sense::Max,
            )
        );
        let trace = Solver::new().solve(&problem).unwrap();
        assert!((trace.solution.objective_value - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_greater_equal_rejected() {
        let err = LpProblem::parse_manual("1,1", "1,2 >= 6", Sense::Max).unwrap_err();
        assert_eq!(
            err,
            ManualInputError::UnsupportedOperator {
                operator: ">=".to_string(),
                line: "1,2 >= 6".to_string()
            }
        );
    }

    #[test]
    fn test_equality_rejected() {
        let err = LpProblem::parse_manual("1,1", "1,2 <= 6\n1,1 = 3", Sense::Max).unwrap_err();
        assert!(matches!(
            err,
            ManualInputError::UnsupportedOperator { ref operator, .. } if operator == "="
        ));
    }

    #[test]
    fn test_missing_operator() {
        let err = LpProblem::parse_manual("1,1", "1,2 6", Sense::Max).unwrap_err();
        assert_eq!(err, ManualInputError::UnrecognizedConstraint("1,2 6".to_string()));
    }

    #[test]
    fn test_coefficient_count_checked() {
        let err = LpProblem::parse_manual("1,1,1", "1,2 <= 6", Sense::Max).unwrap_err();
        assert_eq!(
            err,
            ManualInputError::InvalidCoefficients {
                line: "1,2 <= 6".to_string(),
                expected: 3
            }
        );

        let err = LpProblem::parse_manual("1,1", "1,x <= 6", Sense::Max).unwrap_err();
        assert!(matches!(err, ManualInputError::InvalidCoefficients { expected: 2, .. }));
    }

    #[test]
    fn test_bad_rhs() {
        let err = LpProblem::parse_manual("1", "1 <= six", Sense::Max).unwrap_err();
        assert_eq!(err, ManualInputError::InvalidRhs("1 <= six".to_string()));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            LpProblem::parse_manual("  ", "1 <= 2", Sense::Max),
            Err(ManualInputError::EmptyObjective)
        );
        assert_eq!(
            LpProblem::parse_manual(",", "1 <= 2", Sense::Max),
            Err(ManualInputError::EmptyObjective)
        );
        assert_eq!(
            LpProblem::parse_manual("3,a", "1,1 <= 2", Sense::Max),
            Err(ManualInputError::InvalidObjective("3,a".to_string()))
        );
        assert_eq!(
            LpProblem::parse_manual("1", "\n  \n", Sense::Max),
            Err(ManualInputError::NoConstraints)
        );
    }

    #[test]
    fn test_document_form_keeps_sense() {
        let text = "\n-1,-2\n1,1 <= 4\n0,1 <= 3\n";
        let problem = LpProblem::parse_manual_document(text, Sense::Min).unwrap();

        assert_eq!(problem.sense, Sense::Min);
        assert_eq!(problem.objective, vec![-1.0, -2.0]);
        assert_eq!(problem.rhs, vec![4.0, 3.0]);

        let trace = Solver::new().solve(&problem).unwrap();
        assert!((trace.solution.objective_value + 7.0).abs() < 1e-6);

        assert_eq!(
            LpProblem::parse_manual_document("", Sense::Max),
            Err(ManualInputError::EmptyObjective)
        );
    }
}
