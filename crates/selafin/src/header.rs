// crate modules
use crate::error::Result;
use crate::precision::Precision;
use crate::record::{fixed_record, Fields, Record};
use crate::text::FixedText;

// hydromesh modules
use hydromesh_utils::{f, OptionExt};

// external crates
use serde::{Deserialize, Serialize};

/// Index of the IPARAM flag announcing a date record
pub const DATE_FLAG: usize = 9;

/// File header of a SELAFIN binary
///
/// Everything before the mesh topology: title, precision marker, variable
/// names and units, the ten control parameters (IPARAM), and an optional date.
///
/// ```rust
/// # use hydromesh_selafin::{Date, Header, Precision};
/// let header = Header::new("river reach", Precision::Single)
///     .with_variable("DEPTH", "M")
///     .with_variable("VELOCITY U", "M/S")
///     .with_date(Date::new(2024, 3, 1, 12, 0, 0));
///
/// assert_eq!(header.variables.len(), 2);
/// assert_eq!(header.iparam[9], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// 72 character title
    pub title: FixedText<72>,
    /// 8 character precision marker, e.g. `"SERAFIN "`
    pub marker: FixedText<8>,
    /// Time varying variables stored per time step (NBV1)
    pub variables: Vec<Variable>,
    /// Count of quadratic variables (NBV2), kept but never used
    pub quadratic: i32,
    /// Control parameters, `iparam[9] == 1` when a date record follows
    pub iparam: [i32; 10],
    /// Optional date and time of the first time step
    pub date: Option<Date>,
}

impl Header {
    /// New header with no variables and no date
    ///
    /// IPARAM starts as `[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]` as written by most
    /// pre-processors.
    pub fn new(title: &str, precision: Precision) -> Self {
        let mut iparam = [0; 10];
        iparam[0] = 1;
        Self {
            title: FixedText::new(title),
            marker: precision.marker(),
            variables: Vec::new(),
            quadratic: 0,
            iparam,
            date: None,
        }
    }

    /// Append a variable
    pub fn with_variable(mut self, name: &str, unit: &str) -> Self {
        self.variables.push(Variable::new(name, unit));
        self
    }

    /// Set the date and raise the IPARAM flag that announces it
    pub fn with_date(mut self, date: Date) -> Self {
        self.iparam[DATE_FLAG] = 1;
        self.date = Some(date);
        self
    }

    /// Whether IPARAM announces a date record
    pub fn has_date_flag(&self) -> bool {
        self.iparam[DATE_FLAG] == 1
    }

    /// Precision implied by the marker, if it is a conventional one
    pub fn marker_precision(&self) -> Option<Precision> {
        Precision::from_marker(&self.marker)
    }

    /// Index of a variable by name, ignoring case and padding
    pub fn find_variable(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_uppercase();
        self.variables
            .iter()
            .position(|v| v.name.text().trim().to_uppercase() == name)
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Header {\n".to_string();
        s += &f!("    title: \"{}\"\n", self.title);
        s += &f!("    marker: {:?}\n", self.marker);
        s += &f!("    variables: {}\n", self.variables.len());
        for v in &self.variables {
            s += &f!("        {} [{}]\n", v.name, v.unit);
        }
        s += &f!("    iparam: {:?}\n", self.iparam);
        s += &f!("    date: {}\n}}", self.date.display());
        write!(f, "{}", s)
    }
}

/// Name and unit of a time varying variable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Variable {
    /// 16 character name, e.g. `"BOTTOM"`
    pub name: FixedText<16>,
    /// 16 character unit, e.g. `"M"`
    pub unit: FixedText<16>,
}

impl Variable {
    pub fn new(name: &str, unit: &str) -> Self {
        Self {
            name: FixedText::new(name),
            unit: FixedText::new(unit),
        }
    }
}

impl Record for Variable {
    const LENGTH: usize = 32;

    fn encode(&self, buffer: &mut Vec<u8>) -> Result<()> {
        buffer.extend_from_slice(self.name.as_bytes());
        buffer.extend_from_slice(self.unit.as_bytes());
        Ok(())
    }

    fn decode(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            name: fields.text()?,
            unit: fields.text()?,
        })
    }
}

/// Date of the first time step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl Date {
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fixed_record!(Date, 6);

/// First record: title followed by the precision marker
#[derive(Debug)]
pub(crate) struct TitleRecord {
    pub title: FixedText<72>,
    pub marker: FixedText<8>,
}

impl Record for TitleRecord {
    const LENGTH: usize = 80;

    fn encode(&self, buffer: &mut Vec<u8>) -> Result<()> {
        buffer.extend_from_slice(self.title.as_bytes());
        buffer.extend_from_slice(self.marker.as_bytes());
        Ok(())
    }

    fn decode(fields: &mut Fields) -> Result<Self> {
        Ok(Self {
            title: fields.text()?,
            marker: fields.text()?,
        })
    }
}

/// Second record: linear and quadratic variable counts
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct VariableCounts {
    pub linear: i32,
    pub quadratic: i32,
}

fixed_record!(VariableCounts, 2);

/// The ten control parameters
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ControlParams(pub [i32; 10]);

fixed_record!(ControlParams, 10);
