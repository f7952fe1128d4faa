use crate::error::SimplexError;
use crate::problem::{LpProblem, Sense};

/// Position of a pivot element inside a tableau
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

/// Dense simplex tableau stored row-major.
///
/// For `n` structural variables and `m` constraints the shape is
/// `(m + 1) x (n + m + 1)`: structural columns, slack columns, then the
/// right-hand side. The last row is the objective row, holding negated
/// reduced costs and the current objective value (maximization form).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTableau"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<f64>,
    n_vars: usize,
    n_cons: usize,
}

/// Serialized form of a [`Tableau`], shape-checked on the way back in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTableau {
    data: Vec<f64>,
    n_vars: usize,
    n_cons: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTableau> for Tableau {
    type Error = SimplexError;

    fn try_from(raw: RawTableau) -> Result<Self, Self::Error> {
        let shape = raw
            .n_vars
            .checked_add(raw.n_cons)
            .and_then(|n| n.checked_add(1))
            .and_then(|cols| Some((cols, raw.n_cons.checked_add(1)?.checked_mul(cols)?)));
        match shape {
            Some((n_cols, len)) if len == raw.data.len() => {
                let rows: Vec<Vec<f64>> = raw.data.chunks(n_cols).map(<[f64]>::to_vec).collect();
                Self::from_rows(&rows, raw.n_vars)
            }
            _ => Err(SimplexError::ShapeMismatch(format!(
                "{} values cannot hold a tableau with {} variables and {} constraints",
                raw.data.len(),
                raw.n_vars,
                raw.n_cons
            ))),
        }
    }
}

impl Tableau {
    /// Initial tableau `A | I | b` over `-c | 0 | 0`.
    ///
    /// For minimization the costs are negated first, so the tableau always
    /// describes a maximization problem.
    pub fn from_problem(problem: &LpProblem) -> Self {
        let n_vars = problem.num_variables();
        let n_cons = problem.num_constraints();
        let mut tableau = Self {
            data: vec![0.0; (n_cons + 1) * (n_vars + n_cons + 1)],
            n_vars,
            n_cons,
        };
        let rhs_col = tableau.rhs_column();

        for (i, row) in problem.constraints.iter().enumerate() {
            for (j, &coef) in row.iter().enumerate() {
                tableau.set(i, j, coef);
            }
            tableau.set(i, n_vars + i, 1.0);
            tableau.set(i, rhs_col, problem.rhs[i]);
        }

        let obj_row = tableau.objective_row_index();
        for (j, &coef) in problem.objective.iter().enumerate() {
            let cost = match problem.sense {
                Sense::Max => coef,
                Sense::Min => -coef,
            };
            tableau.set(obj_row, j, -cost);
        }

        tableau
    }

    /// Rebuild a tableau from raw rows, e.g. a stored snapshot.
    pub fn from_rows(rows: &[Vec<f64>], n_vars: usize) -> Result<Self, SimplexError> {
        if rows.is_empty() {
            return Err(SimplexError::ShapeMismatch("tableau has no rows".to_string()));
        }
        let n_cons = rows.len() - 1;
        let n_cols = n_vars + n_cons + 1;
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(SimplexError::ShapeMismatch(format!(
                    "tableau row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, n_vars, n_cons })
    }

    pub fn num_variables(&self) -> usize {
        self.n_vars
    }

    pub fn num_constraints(&self) -> usize {
        self.n_cons
    }

    pub fn num_rows(&self) -> usize {
        self.n_cons + 1
    }

    pub fn num_cols(&self) -> usize {
        self.n_vars + self.n_cons + 1
    }

    pub fn rhs_column(&self) -> usize {
        self.num_cols() - 1
    }

    pub fn objective_row_index(&self) -> usize {
        self.n_cons
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.num_cols() + col]
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        let n_cols = self.num_cols();
        self.data[row * n_cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let n_cols = self.num_cols();
        &self.data[row * n_cols..(row + 1) * n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.num_cols())
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Objective row without the right-hand side cell
    pub fn reduced_costs(&self) -> &[f64] {
        let row = self.row(self.objective_row_index());
        &row[..row.len() - 1]
    }

    /// Current objective value in maximization form
    pub fn objective_value(&self) -> f64 {
        self.get(self.objective_row_index(), self.rhs_column())
    }

    /// Most negative reduced cost below `-tolerance`; ties go to the lowest index.
    pub fn entering_column(&self, tolerance: f64) -> Option<usize> {
        let mut min_val = -tolerance;
        let mut min_col = None;

        for (j, &value) in self.reduced_costs().iter().enumerate() {
            if value < min_val {
                min_val = value;
                min_col = Some(j);
            }
        }

        min_col
    }

    /// Minimum-ratio test on `col`; ties go to the lowest row.
    pub fn leaving_row(&self, col: usize, tolerance: f64) -> Option<usize> {
        let rhs_col = self.rhs_column();
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 0..self.n_cons {
            let value = self.get(i, col);
            if value > tolerance {
                let ratio = self.get(i, rhs_col) / value;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }

    /// Next pivot under the most-negative-cost / minimum-ratio rule, or
    /// `None` when the tableau is optimal or the entering column is unbounded.
    pub fn pivot_position(&self, tolerance: f64) -> Option<Pivot> {
        let column = self.entering_column(tolerance)?;
        let row = self.leaving_row(column, tolerance)?;
        Some(Pivot { row, column })
    }

    pub fn is_optimal(&self, tolerance: f64) -> bool {
        self.reduced_costs().iter().all(|&v| v >= -tolerance)
    }

    /// Gauss-Jordan step: scale the pivot row to 1 at the pivot and clear
    /// the pivot column from every other row, objective row included.
    pub fn pivot(&mut self, pivot: Pivot, tolerance: f64) -> Result<(), SimplexError> {
        let Pivot { row, column } = pivot;
        let n_cols = self.num_cols();
        let pivot_val = self.get(row, column);
        if pivot_val.abs() <= tolerance {
            return Err(SimplexError::DegeneratePivot {
                row,
                column,
                value: pivot_val,
            });
        }

        for j in 0..n_cols {
            self.data[row * n_cols + j] /= pivot_val;
        }
        // Exact unit entry so later basis scans are not thrown by rounding
        self.set(row, column, 1.0);

        let pivot_row = self.row(row).to_vec();
        for i in 0..self.num_rows() {
            if i == row {
                continue;
            }
            let factor = self.get(i, column);
            if factor == 0.0 {
                continue;
            }
            for (j, &p) in pivot_row.iter().enumerate() {
                self.data[i * n_cols + j] -= factor * p;
            }
            self.set(i, column, 0.0);
        }

        Ok(())
    }

    /// If column `col` is a basic unit vector, the constraint row holding its 1.
    ///
    /// The column must be ~1 in exactly one constraint row and ~0 in every
    /// other row, objective row included.
    pub fn unit_row(&self, col: usize, tolerance: f64) -> Option<usize> {
        let mut found = None;
        for i in 0..self.num_rows() {
            let value = self.get(i, col);
            if i < self.n_cons && found.is_none() && (value - 1.0).abs() <= tolerance {
                found = Some(i);
            } else if value.abs() > tolerance {
                return None;
            }
        }
        found
    }

    /// Basic column of each constraint row, scanning structural then slack
    /// columns and taking the first unit vector that lands on the row.
    pub fn basis(&self, tolerance: f64) -> Vec<Option<usize>> {
        let mut basis = vec![None; self.n_cons];
        for j in 0..self.n_vars + self.n_cons {
            if let Some(r) = self.unit_row(j, tolerance) {
                if basis[r].is_none() {
                    basis[r] = Some(j);
                }
            }
        }
        basis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> LpProblem {
        LpProblem::from_parts(
            vec![3.0, 5.0],
            vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
            vec![4.0, 12.0, 18.0],
            Sense::Max,
        )
    }

    #[test]
    fn test_initial_layout() {
        let tableau = Tableau::from_problem(&textbook());

        assert_eq!(tableau.num_rows(), 4);
        assert_eq!(tableau.num_cols(), 6);
        assert_eq!(tableau.row(0), &[1.0, 0.0, 1.0, 0.0, 0.0, 4.0]);
        assert_eq!(tableau.row(2), &[3.0, 2.0, 0.0, 0.0, 1.0, 18.0]);
        assert_eq!(tableau.row(3), &[-3.0, -5.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(tableau.objective_value(), 0.0);
    }

    #[test]
    fn test_min_negates_costs() {
        let mut problem = textbook();
        problem.sense = Sense::Min;
        let tableau = Tableau::from_problem(&problem);

        assert_eq!(tableau.reduced_costs(), &[3.0, 5.0, 0.0, 0.0, 0.0]);
        assert!(tableau.is_optimal(1e-9));
    }

    #[test]
    fn test_initial_basis_is_slacks() {
        let tableau = Tableau::from_problem(&textbook());
        assert_eq!(tableau.basis(1e-9), vec![Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_pivot_rule_picks_most_negative_then_min_ratio() {
        let tableau = Tableau::from_problem(&textbook());
        // x2 has cost -5; ratios are inf, 6, 9
        assert_eq!(tableau.pivot_position(1e-9), Some(Pivot { row: 1, column: 1 }));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let problem = LpProblem::from_parts(
            vec![2.0, 2.0],
            vec![vec![1.0, 1.0], vec![2.0, 1.0]],
            vec![4.0, 8.0],
            Sense::Max,
        );
        let tableau = Tableau::from_problem(&problem);

        assert_eq!(tableau.entering_column(1e-9), Some(0));
        // Both ratios are 4
        assert_eq!(tableau.leaving_row(0, 1e-9), Some(0));
    }

    #[test]
    fn test_pivot_makes_unit_column() {
        let mut tableau = Tableau::from_problem(&textbook());
        let pivot = Pivot { row: 1, column: 1 };
        tableau.pivot(pivot, 1e-9).unwrap();

        assert_eq!(tableau.unit_row(1, 1e-9), Some(1));
        assert_eq!(tableau.row(1), &[0.0, 1.0, 0.0, 0.5, 0.0, 6.0]);
        assert_eq!(tableau.row(3), &[-3.0, 0.0, 0.0, 2.5, 0.0, 30.0]);
        assert_eq!(tableau.objective_value(), 30.0);
        assert_eq!(tableau.basis(1e-9), vec![Some(2), Some(1), Some(4)]);
    }

    #[test]
    fn test_degenerate_pivot_rejected() {
        let mut tableau = Tableau::from_problem(&textbook());
        let result = tableau.pivot(Pivot { row: 0, column: 1 }, 1e-9);

        assert_eq!(
            result,
            Err(SimplexError::DegeneratePivot {
                row: 0,
                column: 1,
                value: 0.0
            })
        );
    }

    #[test]
    fn test_unbounded_column_has_no_leaving_row() {
        let problem = LpProblem::from_parts(
            vec![1.0, 1.0],
            vec![vec![1.0, -1.0]],
            vec![2.0],
            Sense::Max,
        );
        let tableau = Tableau::from_problem(&problem);

        assert_eq!(tableau.leaving_row(1, 1e-9), None);
    }

    #[test]
    fn test_structural_identity_with_cost_is_not_basic() {
        // x1's column is a unit vector in the constraint block, but its
        // nonzero cost keeps it out of the basis
        let problem = LpProblem::from_parts(vec![1.0], vec![vec![1.0]], vec![5.0], Sense::Max);
        let tableau = Tableau::from_problem(&problem);

        assert_eq!(tableau.unit_row(0, 1e-9), None);
        assert_eq!(tableau.basis(1e-9), vec![Some(1)]);
    }

    #[test]
    fn test_from_rows_round_trips_snapshot() {
        let tableau = Tableau::from_problem(&textbook());
        let rebuilt = Tableau::from_rows(&tableau.to_rows(), 2).unwrap();
        assert_eq!(rebuilt, tableau);

        let bad = Tableau::from_rows(&[vec![1.0, 2.0]], 2);
        assert!(matches!(bad, Err(SimplexError::ShapeMismatch(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_inconsistent_shape() {
        let tableau = Tableau::from_problem(&textbook());
        let json = serde_json::to_string(&tableau).unwrap();
        let back: Tableau = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tableau);

        // Two values cannot fill a 1x3 tableau with one variable
        let short = r#"{"data": [1.0, 2.0], "n_vars": 1, "n_cons": 0}"#;
        let err = serde_json::from_str::<Tableau>(short).unwrap_err();
        assert!(err.to_string().contains("cannot hold a tableau"), "{}", err);

        let huge = format!(r#"{{"data": [], "n_vars": {}, "n_cons": 1}}"#, usize::MAX);
        assert!(serde_json::from_str::<Tableau>(&huge).is_err());
    }
}
