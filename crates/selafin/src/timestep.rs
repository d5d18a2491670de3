// external crates
use serde::Serialize;

/// Values of every variable at one point in time
///
/// `values[v][n]` is variable `v` at node `n`, in the order the variables are
/// listed in the [Header](crate::Header).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeStep {
    /// Time of the step, usually seconds from the start of the simulation
    pub time: f64,
    /// One row of node values per variable
    pub values: Vec<Vec<f64>>,
}

impl TimeStep {
    pub fn new(time: f64, values: Vec<Vec<f64>>) -> Self {
        Self { time, values }
    }

    /// Node values of a single variable
    pub fn variable(&self, index: usize) -> Option<&[f64]> {
        self.values.get(index).map(|v| v.as_slice())
    }
}
