//! Write operations for SELAFIN binaries

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::header::{ControlParams, Header, TitleRecord, VariableCounts};
use crate::precision::Precision;
use crate::record::{to_i32, RecordWriter};
use crate::selafin::Selafin;
use crate::timestep::TimeStep;
use crate::topology::{Dimensions, Topology};

// external crates
use log::{debug, warn};

/// Serialise a complete [Selafin] to `path`
///
/// Uses the precision stored on the [Selafin], which for anything read from
/// disk is the precision it was decoded with. A file read and written back
/// this way is byte-for-byte identical.
///
/// ```rust, no_run
/// # use hydromesh_selafin::{read_selafin, write_selafin};
/// let selafin = read_selafin("./results.slf").unwrap();
/// write_selafin(&selafin, "./copy.slf").unwrap();
/// ```
pub fn write_selafin<P: AsRef<Path>>(selafin: &Selafin, path: P) -> Result<()> {
    let mut writer = SelafinWriter::create(path, selafin.precision)?;
    writer.write_header(&selafin.header)?;
    writer.write_mesh(&selafin.mesh)?;
    for step in &selafin.time_steps {
        writer.write_time_step(step.time, &step.values)?;
    }
    writer.finish()?;
    Ok(())
}

/// Which part of the file is expected next
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Header,
    Mesh,
    TimeSteps,
}

/// Sequential writer of SELAFIN binaries
///
/// The layout is written exactly once and in order: header, mesh topology,
/// then any number of appended time steps. Anything out of order is rejected
/// with [OutOfOrderWrite](Error::OutOfOrderWrite).
///
/// ```rust, no_run
/// # use hydromesh_selafin::{Header, Precision, SelafinWriter, Topology};
/// let header = Header::new("created with hydromesh", Precision::Single)
///     .with_variable("BOTTOM", "M");
///
/// let mesh = Topology::new(
///     vec![[0, 1, 2]],
///     vec![1, 2, 3],
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
/// )
/// .unwrap();
///
/// let mut writer = SelafinWriter::create("mesh.slf", Precision::Single).unwrap();
/// writer.write_header(&header).unwrap();
/// writer.write_mesh(&mesh).unwrap();
/// writer.write_time_step(0.0, &[vec![-1.0, -2.0, -1.5]]).unwrap();
/// writer.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct SelafinWriter<W: Write> {
    records: RecordWriter<W>,
    precision: Precision,
    stage: Stage,
    /// Variable count from the header
    nvar: usize,
    /// Node count from the mesh
    npoin: usize,
}

impl SelafinWriter<BufWriter<File>> {
    /// Create (or truncate) a file at `path`
    pub fn create<P: AsRef<Path>>(path: P, precision: Precision) -> Result<Self> {
        Ok(Self::new(init_writer(path)?, precision))
    }
}

impl<W: Write> SelafinWriter<W> {
    /// Wrap any byte sink
    pub fn new(inner: W, precision: Precision) -> Self {
        Self {
            records: RecordWriter::new(inner),
            precision,
            stage: Stage::Header,
            nvar: 0,
            npoin: 0,
        }
    }

    /// Precision of every float written
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Title, variables, control parameters and optional date
    ///
    /// The date record is written if and only if `iparam[9] == 1`.
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        self.expect(Stage::Header, "header")?;
        self.check_marker(header)?;
        if header.has_date_flag() && header.date.is_none() {
            return Err(Error::MissingDate);
        }

        self.records.write(&TitleRecord {
            title: header.title,
            marker: header.marker,
        })?;
        self.records.write(&VariableCounts {
            linear: to_i32("variable count", header.variables.len())?,
            quadratic: header.quadratic,
        })?;
        for variable in &header.variables {
            self.records.write(variable)?;
        }
        self.records.write(&ControlParams(header.iparam))?;
        if let (true, Some(date)) = (header.has_date_flag(), &header.date) {
            self.records.write(date)?;
        }

        debug!("wrote header with {} variables", header.variables.len());
        self.nvar = header.variables.len();
        self.stage = Stage::Mesh;
        Ok(())
    }

    /// Dimensions, connectivity, boundary markers and coordinates
    ///
    /// Connectivity is re-biased to 1-based node numbers on the way out.
    pub fn write_mesh(&mut self, mesh: &Topology) -> Result<()> {
        self.expect(Stage::Mesh, "mesh")?;
        mesh.validate()?;

        self.records.write(&Dimensions::of(mesh)?)?;
        self.records.write_i32s(&mesh.ikle_to_disk()?)?;
        self.records.write_i32s(&mesh.ipobo)?;
        self.records.write_floats(&mesh.x, self.precision)?;
        self.records.write_floats(&mesh.y, self.precision)?;

        debug!(
            "wrote mesh with {} elements and {} nodes",
            mesh.nelem(),
            mesh.npoin()
        );
        self.npoin = mesh.npoin();
        self.stage = Stage::TimeSteps;
        Ok(())
    }

    /// Append one time step
    ///
    /// `values` must hold one row per header variable, each with one value
    /// per mesh node. Dimensions are checked before anything is written.
    pub fn write_time_step(&mut self, time: f64, values: &[Vec<f64>]) -> Result<()> {
        self.expect(Stage::TimeSteps, "time step")?;
        if values.len() != self.nvar {
            return Err(Error::UnexpectedDimensions {
                what: "variables in time step",
                expected: self.nvar,
                found: values.len(),
            });
        }
        if let Some(row) = values.iter().find(|row| row.len() != self.npoin) {
            return Err(Error::UnexpectedDimensions {
                what: "node values in time step",
                expected: self.npoin,
                found: row.len(),
            });
        }

        self.records.write_floats(&[time], self.precision)?;
        for row in values {
            self.records.write_floats(row, self.precision)?;
        }
        Ok(())
    }

    /// Append a decoded [TimeStep]
    pub fn write_step(&mut self, step: &TimeStep) -> Result<()> {
        self.write_time_step(step.time, &step.values)
    }

    /// Flush and give back the underlying sink
    pub fn finish(mut self) -> Result<W> {
        if self.stage != Stage::TimeSteps {
            warn!("Warning: SELAFIN output closed before the mesh was written");
        }
        self.records.flush()?;
        Ok(self.records.into_inner())
    }

    fn expect(&self, stage: Stage, what: &'static str) -> Result<()> {
        if self.stage != stage {
            return Err(Error::OutOfOrderWrite(what));
        }
        Ok(())
    }

    /// A conventional marker must agree with the precision being written
    fn check_marker(&self, header: &Header) -> Result<()> {
        match header.marker_precision() {
            Some(marker) if marker != self.precision => Err(Error::PrecisionMismatch {
                declared: self.precision,
                marker: String::from_utf8_lossy(header.marker.as_bytes()).to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                warn!(
                    "Warning: unrecognised precision marker {:?} written as is",
                    header.marker
                );
                Ok(())
            }
        }
    }
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
