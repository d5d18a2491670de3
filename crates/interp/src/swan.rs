//! Wave model `.xyz` output interpolated onto mesh nodes
//!
//! Each line holds `x y` followed by up to four values in the order of
//! [SWAN_VARIABLES], separated by any amount of whitespace and without a
//! header. Lines with a missing value marker are dropped entirely.

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::idw::IdwInterpolator;
use crate::points::Point;
use crate::progress::init_progress_bar;

// hydromesh modules
use hydromesh_utils::f;

// external crates
use kdam::BarExt;
use log::{debug, warn};

/// Names and units of the value columns, in file order
pub const SWAN_VARIABLES: [(&str, &str); 4] = [
    ("DEPTH", "M"),
    ("WAVE HEIGHT", "M"),
    ("WAVE PERIOD", "SEC"),
    ("WAVE DIRECTION", "DEG"),
];

/// Values written for dry or undefined points
const MISSING: [f64; 3] = [-99.0, -9.0, -999.0];

/// Valid rows of a wave model `.xyz` table, stored by column
#[derive(Debug, Clone, PartialEq)]
pub struct SwanTable {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// One column per variable
    pub values: Vec<Vec<f64>>,
}

impl SwanTable {
    /// Number of value columns
    pub fn nvariables(&self) -> usize {
        self.values.len()
    }

    /// Name and unit of every value column
    pub fn variables(&self) -> &'static [(&'static str, &'static str)] {
        &SWAN_VARIABLES[..self.nvariables()]
    }

    /// Value of every column at each `(x, y)` location
    ///
    /// Uses inverse distance weighting over the `k` closest rows, so that
    /// locations outside of the wave grid take the closest values.
    pub fn interpolate(
        &self,
        x: &[f64],
        y: &[f64],
        k: usize,
        disable_progress: bool,
    ) -> Result<Vec<Vec<f64>>> {
        let mut bar = init_progress_bar(x.len() * self.nvariables(), "values", disable_progress)?;

        let mut values = Vec::with_capacity(self.nvariables());
        for column in &self.values {
            let points = self
                .x
                .iter()
                .zip(&self.y)
                .zip(column)
                .map(|((x, y), z)| Point::new(*x, *y, *z))
                .collect::<Vec<Point>>();
            let idw = IdwInterpolator::new(&points)?.neighbours(k)?;

            let mut interpolated = Vec::with_capacity(x.len());
            for (x, y) in x.iter().zip(y) {
                interpolated.push(idw.interpolate(*x, *y));
                bar.update(1)?;
            }
            values.push(interpolated);
        }
        Ok(values)
    }
}

/// Read a wave model `.xyz` table
///
/// ```rust, no_run
/// # use hydromesh_interp::read_swan_xyz;
/// let table = read_swan_xyz("./out.xyz").unwrap();
/// println!("{:?}", table.variables());
/// ```
pub fn read_swan_xyz<P: AsRef<Path>>(path: P) -> Result<SwanTable> {
    read_swan_xyz_from(BufReader::new(File::open(path)?))
}

/// Read a wave model `.xyz` table from any buffered reader
pub fn read_swan_xyz_from<R: BufRead>(reader: R) -> Result<SwanTable> {
    let mut table = SwanTable {
        x: Vec::new(),
        y: Vec::new(),
        values: Vec::new(),
    };
    let mut skipped = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(&line, i + 1)?;

        if table.values.is_empty() {
            if !(3..=SWAN_VARIABLES.len() + 2).contains(&row.len()) {
                return Err(Error::MalformedRow {
                    line: i + 1,
                    reason: f!("{} columns, expected x, y and 1 to 4 values", row.len()),
                });
            }
            table.values = vec![Vec::new(); row.len() - 2];
        } else if row.len() != table.nvariables() + 2 {
            return Err(Error::MalformedRow {
                line: i + 1,
                reason: f!("{} columns, expected {}", row.len(), table.nvariables() + 2),
            });
        }

        if row[2..].iter().any(|v| MISSING.contains(v)) {
            skipped += 1;
            continue;
        }

        table.x.push(row[0]);
        table.y.push(row[1]);
        for (column, value) in table.values.iter_mut().zip(&row[2..]) {
            column.push(*value);
        }
    }

    if skipped > 0 {
        warn!("Warning: dropped {skipped} rows with missing values");
    }
    if table.x.is_empty() {
        return Err(Error::NoData("wave model rows"));
    }
    debug!("read {} rows of {} variables", table.x.len(), table.nvariables());
    Ok(table)
}

fn parse_row(line: &str, number: usize) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::MalformedRow {
                line: number,
                reason: f!("could not parse \"{token}\""),
            }),
        })
        .collect()
}
