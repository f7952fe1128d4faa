use crate::tableau::Tableau;

/// Optimal basic feasible solution of a solved LP
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Value of each structural variable, index = variable number - 1
    pub values: Vec<f64>,
    /// Optimal objective value in the sense of the original problem
    pub objective_value: f64,
}

impl Solution {
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Value of variable `x{number}`, 1-based like its label
    pub fn value_of(&self, number: usize) -> Option<f64> {
        number.checked_sub(1).and_then(|j| self.values.get(j).copied())
    }

    /// `(label, value)` pairs `x1..xn` followed by `Z`
    pub fn labeled(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .values
            .iter()
            .enumerate()
            .map(|(j, &v)| (format!("x{}", j + 1), v))
            .collect();
        out.push(("Z".to_string(), self.objective_value));
        out
    }
}

/// Everything a solve produced: every tableau snapshot plus the optimum
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolveTrace {
    /// Step 0 is the initial tableau, each later step follows one pivot
    pub steps: Vec<Tableau>,
    pub solution: Solution,
}

impl SolveTrace {
    /// Number of pivots performed
    pub fn iterations(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn final_tableau(&self) -> Option<&Tableau> {
        self.steps.last()
    }
}
