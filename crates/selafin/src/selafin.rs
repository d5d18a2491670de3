// crate modules
use crate::error::Result;
use crate::header::{Date, Header};
use crate::precision::Precision;
use crate::timestep::TimeStep;
use crate::topology::Topology;

// hydromesh modules
use hydromesh_utils::{f, OptionExt};

// external crates
use serde::Serialize;

/// Fully decoded SELAFIN file
///
/// Owns everything in the file. Use a [SelafinReader](crate::SelafinReader)
/// directly when only a few time steps are needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selafin {
    /// Title, variables, control parameters and date
    pub header: Header,
    /// Mesh connectivity and coordinates
    pub mesh: Topology,
    /// Precision of every float in the file
    pub precision: Precision,
    /// Time steps in file order
    pub time_steps: Vec<TimeStep>,
}

impl Selafin {
    /// Time of every step, in file order
    pub fn times(&self) -> Vec<f64> {
        self.time_steps.iter().map(|s| s.time).collect()
    }

    /// Overview without the node values
    pub fn summary(&self) -> Summary {
        Summary::new(&self.header, &self.mesh, self.precision, self.times())
    }
}

impl std::fmt::Display for Selafin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Overview of a SELAFIN file
///
/// Serialisable so that it can be printed as JSON by command line tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub precision: Precision,
    /// Variable names and units, trimmed
    pub variables: Vec<(String, String)>,
    pub nelem: usize,
    pub npoin: usize,
    pub date: Option<Date>,
    pub times: Vec<f64>,
}

impl Summary {
    pub fn new(header: &Header, mesh: &Topology, precision: Precision, times: Vec<f64>) -> Self {
        Self {
            title: header.title.text().trim().to_string(),
            precision,
            variables: header
                .variables
                .iter()
                .map(|v| (v.name.text().trim().to_string(), v.unit.text().trim().to_string()))
                .collect(),
            nelem: mesh.nelem(),
            npoin: mesh.npoin(),
            date: header.date,
            times,
        }
    }

    /// Pretty printed JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Selafin {\n".to_string();
        s += &f!("    title: \"{}\"\n", self.title);
        s += &f!("    precision: {}\n", self.precision);
        s += &f!("    elements: {}\n", self.nelem);
        s += &f!("    nodes: {}\n", self.npoin);
        s += &f!("    date: {}\n", self.date.display());
        s += &f!("    variables: {}\n", self.variables.len());
        for (name, unit) in &self.variables {
            s += &f!("        {name} [{unit}]\n");
        }
        s += &f!("    time steps: {}\n", self.times.len());
        if let (Some(first), Some(last)) = (self.times.first(), self.times.last()) {
            s += &f!("    times: {first} to {last}\n");
        }
        s += "}";
        write!(f, "{}", s)
    }
}
