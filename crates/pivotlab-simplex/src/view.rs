//! Didactic views over the tableau sequence of a solve.
//!
//! Views are rebuilt from the raw snapshots alone: the pivot of every step
//! is re-derived with the same rule the solver uses, and each row is labeled
//! with the basic variable found by scanning for unit columns.

use std::fmt;

use crate::error::SimplexError;
use crate::problem::{LpProblem, Sense};
use crate::simplex::{DEFAULT_TOLERANCE, check_tolerance};
use crate::tableau::{Pivot, Tableau};

/// Label of a constraint row with no unit column
pub const NO_BASIS: &str = "—";

/// Values this close to zero print as `"0"`
const ZERO_DISPLAY: f64 = 1e-9;

/// Fixed-precision rendering with trailing zeros and dot trimmed.
///
/// `format_number(2.5, 4)` is `"2.5"`, `format_number(1e-12, 4)` is `"0"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.abs() <= ZERO_DISPLAY {
        return "0".to_string();
    }
    let fixed = format!("{:.*}", decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Column header for tableau column `col`: `x1..xn`, `s1..sm`, `RHS`
pub fn column_name(col: usize, n_vars: usize, n_cons: usize) -> String {
    if col < n_vars {
        format!("x{}", col + 1)
    } else if col < n_vars + n_cons {
        format!("s{}", col - n_vars + 1)
    } else {
        "RHS".to_string()
    }
}

/// Basic variable label of every row; the objective row is always `Z`.
pub fn basis_labels(tableau: &Tableau, tolerance: f64) -> Vec<String> {
    let n_vars = tableau.num_variables();
    let n_cons = tableau.num_constraints();
    let mut labels: Vec<String> = tableau
        .basis(tolerance)
        .into_iter()
        .map(|basic| match basic {
            Some(j) => column_name(j, n_vars, n_cons),
            None => NO_BASIS.to_string(),
        })
        .collect();
    labels.push("Z".to_string());
    labels
}

/// A tableau with row labels and column headers, ready for display
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTableau {
    /// Value headers: `Z`, `x1..xn`, `s1..sm`, `RHS`
    pub columns: Vec<String>,
    /// `VB` column: basic variable of each row, `Z` for the objective row
    pub basis: Vec<String>,
    /// Row values aligned with `columns`; the leading `Z` column is 0 on
    /// constraint rows and 1 on the objective row
    pub rows: Vec<Vec<f64>>,
    /// Pivot cell to emphasize, in tableau coordinates
    pub pivot: Option<Pivot>,
}

impl LabeledTableau {
    pub fn new(tableau: &Tableau, tolerance: f64) -> Self {
        let n_vars = tableau.num_variables();
        let n_cons = tableau.num_constraints();

        let mut columns = vec!["Z".to_string()];
        columns.extend((0..tableau.num_cols()).map(|j| column_name(j, n_vars, n_cons)));

        let obj_row = tableau.objective_row_index();
        let rows = tableau
            .rows()
            .enumerate()
            .map(|(i, row)| {
                let mut out = Vec::with_capacity(row.len() + 1);
                out.push(if i == obj_row { 1.0 } else { 0.0 });
                out.extend_from_slice(row);
                out
            })
            .collect();

        Self {
            columns,
            basis: basis_labels(tableau, tolerance),
            rows,
            pivot: None,
        }
    }

    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Cell text, with the pivot element bracketed
    fn cell(&self, row: usize, col: usize) -> String {
        let text = format_number(self.rows[row][col], 4);
        // Column 0 is the didactic Z column, so tableau columns are shifted
        match self.pivot {
            Some(p) if p.row == row && p.column + 1 == col => format!("[{}]", text),
            _ => text,
        }
    }
}

impl fmt::Display for LabeledTableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec!["VB".to_string()];
        header.extend(self.columns.iter().cloned());

        let body: Vec<Vec<String>> = (0..self.rows.len())
            .map(|i| {
                let mut line = vec![self.basis[i].clone()];
                line.extend((0..self.columns.len()).map(|j| self.cell(i, j)));
                line
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|j| {
                body.iter()
                    .map(|line| line[j].chars().count())
                    .chain(std::iter::once(header[j].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (k, line) in std::iter::once(&header).chain(body.iter()).enumerate() {
            if k > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
                .collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// One pivot of a solve, seen before and after
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IterationView {
    /// 1-based iteration number
    pub index: usize,
    /// Tableau before the pivot, pivot cell marked
    pub before: LabeledTableau,
    pub after: LabeledTableau,
    pub entering: String,
    pub leaving: String,
    pub pivot: Pivot,
}

/// Build one view per consecutive pair of snapshots.
///
/// Fails with `ShapeMismatch` when a snapshot does not fit `problem`, and
/// with `UnboundedProblem` when a non-final snapshot has no pivot, which
/// means `steps` did not come from a successful solve.
pub fn build_iteration_views(
    steps: &[Tableau],
    problem: &LpProblem,
    tolerance: f64,
) -> Result<Vec<IterationView>, SimplexError> {
    check_tolerance(tolerance)?;
    let n_vars = problem.num_variables();
    let n_cons = problem.num_constraints();
    if let Some(step) = steps
        .iter()
        .find(|t| t.num_variables() != n_vars || t.num_constraints() != n_cons)
    {
        return Err(SimplexError::ShapeMismatch(format!(
            "tableau has {} variables and {} constraints, problem has {} and {}",
            step.num_variables(),
            step.num_constraints(),
            n_vars,
            n_cons
        )));
    }

    let mut views = Vec::with_capacity(steps.len().saturating_sub(1));
    for (k, pair) in steps.windows(2).enumerate() {
        let (before, after) = (&pair[0], &pair[1]);
        let Some(pivot) = before.pivot_position(tolerance) else {
            let column = before.entering_column(tolerance).unwrap_or(0);
            return Err(SimplexError::UnboundedProblem { column });
        };

        let before_view = LabeledTableau::new(before, tolerance).with_pivot(pivot);
        let leaving = before_view.basis[pivot.row].clone();

        views.push(IterationView {
            index: k + 1,
            entering: column_name(pivot.column, n_vars, n_cons),
            leaving,
            before: before_view,
            after: LabeledTableau::new(after, tolerance),
            pivot,
        });
    }

    Ok(views)
}

/// Same as [`build_iteration_views`] with the solver's default tolerance
pub fn iteration_views(
    steps: &[Tableau],
    problem: &LpProblem,
) -> Result<Vec<IterationView>, SimplexError> {
    build_iteration_views(steps, problem, DEFAULT_TOLERANCE)
}

fn linear_terms(coefficients: &[f64]) -> String {
    coefficients
        .iter()
        .enumerate()
        .map(|(j, &a)| format!("{} x{}", format_number(a, 4), j + 1))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Human-readable statement of the problem
pub fn problem_summary(problem: &LpProblem) -> String {
    let sense = match problem.sense {
        Sense::Max => "Maximize",
        Sense::Min => "Minimize",
    };
    let mut lines = vec![
        format!("{}: Z = {}", sense, linear_terms(&problem.objective)),
        "Subject to:".to_string(),
    ];
    for (row, &b) in problem.constraints.iter().zip(&problem.rhs) {
        lines.push(format!("  {} <= {}", linear_terms(row), format_number(b, 4)));
    }
    lines.push(format!("Variables: x1..x{} >= 0", problem.num_variables()));
    lines.join("\n")
}
