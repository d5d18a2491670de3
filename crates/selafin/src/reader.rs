//! Read operations for SELAFIN binaries
//!
//! The header and mesh topology are decoded as soon as a reader is created.
//! Time steps are left on disk until asked for, so that a single step of a
//! long simulation can be extracted without materialising the whole series.

// standard library
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::header::{ControlParams, Date, Header, TitleRecord, Variable, VariableCounts, DATE_FLAG};
use crate::precision::Precision;
use crate::record::{to_count, Fields, RecordReader};
use crate::selafin::{Selafin, Summary};
use crate::timestep::TimeStep;
use crate::topology::{Dimensions, Topology, NODES_PER_ELEMENT};

// hydromesh modules
use hydromesh_utils::f;

// external crates
use log::{debug, warn};

/// Deserialise a complete SELAFIN file
///
/// Returns a [Selafin] with the header, mesh topology and every time step
/// of the file at `path`. Precision is taken from the file marker, or inferred
/// from the coordinate records for unconventional markers.
///
/// ```rust, no_run
/// # use hydromesh_selafin::read_selafin;
/// let selafin = read_selafin("./results.slf").unwrap();
/// println!("{selafin}");
/// ```
pub fn read_selafin<P: AsRef<Path>>(path: P) -> Result<Selafin> {
    SelafinReader::open(path)?.into_selafin()
}

/// Sequential reader of SELAFIN binaries
///
/// Owns its byte stream, and the stream cursor is private state of the reader.
/// Use one reader per stream if steps are needed in parallel.
///
/// ```rust, no_run
/// # use hydromesh_selafin::{Precision, SelafinReader};
/// // Declare the precision explicitly, a contradicting marker is an error
/// let mut reader = SelafinReader::open_with_precision("mesh.slf", Precision::Double).unwrap();
///
/// let npoin = reader.mesh().npoin();
/// let times = reader.read_times().unwrap();
///
/// // Stream every step in order
/// while let Some(step) = reader.next_time_step().unwrap() {
///     assert_eq!(step.values[0].len(), npoin);
/// }
/// ```
#[derive(Debug)]
pub struct SelafinReader<R> {
    records: RecordReader<R>,
    header: Header,
    mesh: Topology,
    precision: Precision,
    /// Byte offset of the first time step
    data_start: u64,
}

impl SelafinReader<BufReader<File>> {
    /// Open a file, taking precision from its marker
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(init_reader(path)?)
    }

    /// Open a file with a caller-declared precision
    pub fn open_with_precision<P: AsRef<Path>>(path: P, precision: Precision) -> Result<Self> {
        Self::with_precision(init_reader(path)?, precision)
    }
}

impl<R: Read + Seek> SelafinReader<R> {
    /// Decode header and mesh, taking precision from the marker
    ///
    /// Unconventional markers fall back to the float width implied by the
    /// x coordinate record.
    pub fn new(inner: R) -> Result<Self> {
        Self::init(inner, None)
    }

    /// Decode header and mesh with a caller-declared precision
    ///
    /// If the marker is one of `"SERAFIN "` or `"SERAFIND"` and disagrees, the
    /// result is [PrecisionMismatch](Error::PrecisionMismatch). A declared
    /// precision that does not fit the coordinate records fails with
    /// [UnexpectedRecordLength](Error::UnexpectedRecordLength).
    pub fn with_precision(inner: R, precision: Precision) -> Result<Self> {
        Self::init(inner, Some(precision))
    }

    fn init(inner: R, declared: Option<Precision>) -> Result<Self> {
        let mut records = RecordReader::new(inner);

        let header = parse_header(&mut records)?;
        let precision = resolve_precision(&header, declared)?;
        let (mesh, precision) = parse_mesh(&mut records, precision)?;
        let data_start = records.position()?;

        debug!(
            "decoded {} precision header and mesh ({} elements, {} nodes)",
            precision,
            mesh.nelem(),
            mesh.npoin()
        );

        Ok(Self {
            records,
            header,
            mesh,
            precision,
            data_start,
        })
    }

    /// File header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mesh topology
    pub fn mesh(&self) -> &Topology {
        &self.mesh
    }

    /// Precision used to decode floats
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> R {
        self.records.into_inner()
    }

    /// Move the cursor back to the first time step
    pub fn rewind(&mut self) -> Result<()> {
        self.records.seek_to(self.data_start)
    }

    /// Decode the next time step from the cursor
    ///
    /// Returns `Ok(None)` when the stream ends exactly after the previous
    /// block. A block that ends early is [Truncated](Error::Truncated).
    pub fn next_time_step(&mut self) -> Result<Option<TimeStep>> {
        let Some(time) = self.try_read_time()? else {
            return Ok(None);
        };

        let values = (0..self.header.variables.len())
            .map(|_| self.read_values())
            .collect::<Result<Vec<Vec<f64>>>>()?;

        Ok(Some(TimeStep { time, values }))
    }

    /// Decode only the time step at `index`
    ///
    /// Blocks before `index` are skipped by seeking past their values, with
    /// their framing still checked. On success the cursor is left after the
    /// decoded block so [next_time_step()](SelafinReader::next_time_step)
    /// continues from there. On failure the cursor is restored.
    pub fn read_time_step(&mut self, index: usize) -> Result<TimeStep> {
        let start = self.records.position()?;
        let result = self.seek_and_decode(index);
        if result.is_err() {
            self.records.seek_to(start)?;
        }
        result
    }

    /// Time of every step in the file
    ///
    /// Only the time records are decoded. The cursor is restored to where it
    /// was before the scan so sequential reads are not disturbed.
    pub fn read_times(&mut self) -> Result<Vec<f64>> {
        let start = self.records.position()?;
        let result = self.scan_times();
        self.records.seek_to(start)?;
        result
    }

    /// Number of time steps in the file
    pub fn count_time_steps(&mut self) -> Result<usize> {
        Ok(self.read_times()?.len())
    }

    /// Decode every time step from the start of the series
    pub fn read_time_steps(&mut self) -> Result<Vec<TimeStep>> {
        self.rewind()?;
        let mut steps = Vec::new();
        while let Some(step) = self.next_time_step()? {
            steps.push(step);
        }
        Ok(steps)
    }

    /// Overview of the file without reading any values
    pub fn summary(&mut self) -> Result<Summary> {
        let times = self.read_times()?;
        Ok(Summary::new(&self.header, &self.mesh, self.precision, times))
    }

    /// Consume the reader into a fully decoded [Selafin]
    pub fn into_selafin(mut self) -> Result<Selafin> {
        let time_steps = self.read_time_steps()?;
        Ok(Selafin {
            header: self.header,
            mesh: self.mesh,
            precision: self.precision,
            time_steps,
        })
    }
}

/// Time step block helpers
impl<R: Read + Seek> SelafinReader<R> {
    fn seek_and_decode(&mut self, index: usize) -> Result<TimeStep> {
        self.rewind()?;
        for skipped in 0..index {
            if self.skip_time_step()?.is_none() {
                return Err(Error::TimeStepOutOfRange {
                    index,
                    available: skipped,
                });
            }
        }
        self.next_time_step()?.ok_or(Error::TimeStepOutOfRange {
            index,
            available: index,
        })
    }

    fn scan_times(&mut self) -> Result<Vec<f64>> {
        self.rewind()?;
        let mut times = Vec::new();
        while let Some(time) = self.skip_time_step()? {
            times.push(time);
        }
        Ok(times)
    }

    /// Decode the time of the next block and seek past its values
    fn skip_time_step(&mut self) -> Result<Option<f64>> {
        let Some(time) = self.try_read_time()? else {
            return Ok(None);
        };
        let length = self.values_length();
        for _ in 0..self.header.variables.len() {
            self.records.skip_record_of(length)?;
        }
        Ok(Some(time))
    }

    fn try_read_time(&mut self) -> Result<Option<f64>> {
        let Some((offset, payload)) = self.records.try_read_record()? else {
            return Ok(None);
        };
        if payload.len() != self.precision.width() {
            return Err(Error::UnexpectedRecordLength {
                offset,
                expected: self.precision.width(),
                found: payload.len(),
            });
        }
        Ok(Some(Fields::new(&payload, offset).float(self.precision)?))
    }

    fn read_values(&mut self) -> Result<Vec<f64>> {
        let (offset, payload) = self.records.read_record_of(self.values_length())?;
        Fields::new(&payload, offset).floats(self.mesh.npoin(), self.precision)
    }

    fn values_length(&self) -> usize {
        self.mesh.npoin() * self.precision.width()
    }
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Title, variables, control parameters and optional date
fn parse_header<R: Read + Seek>(records: &mut RecordReader<R>) -> Result<Header> {
    let TitleRecord { title, marker } = records.read()?;

    let counts: VariableCounts = records.read()?;
    let nbv1 = to_count("variable count", counts.linear)?;
    if counts.quadratic != 0 {
        warn!(
            "Warning: {} quadratic variables (NBV2) are ignored",
            counts.quadratic
        );
    }

    let variables = (0..nbv1)
        .map(|_| records.read::<Variable>())
        .collect::<Result<Vec<Variable>>>()?;

    let ControlParams(iparam) = records.read()?;
    let date = match iparam[DATE_FLAG] {
        1 => Some(records.read::<Date>()?),
        _ => None,
    };

    Ok(Header {
        title,
        marker,
        variables,
        quadratic: counts.quadratic,
        iparam,
        date,
    })
}

/// Declared precision checked against the marker, `None` to infer later
fn resolve_precision(header: &Header, declared: Option<Precision>) -> Result<Option<Precision>> {
    match (declared, header.marker_precision()) {
        (Some(declared), Some(marker)) if declared != marker => Err(Error::PrecisionMismatch {
            declared,
            marker: String::from_utf8_lossy(header.marker.as_bytes()).to_string(),
        }),
        (Some(declared), _) => Ok(Some(declared)),
        (None, Some(marker)) => Ok(Some(marker)),
        (None, None) => {
            warn!(
                "Warning: unrecognised precision marker {:?}, inferring from coordinates",
                header.marker
            );
            Ok(None)
        }
    }
}

/// Dimensions, connectivity, boundary markers and coordinates
fn parse_mesh<R: Read + Seek>(
    records: &mut RecordReader<R>,
    precision: Option<Precision>,
) -> Result<(Topology, Precision)> {
    let dimensions: Dimensions = records.read()?;
    let (nelem, npoin) = dimensions.counts()?;
    let int = std::mem::size_of::<i32>();

    let (offset, payload) = records.read_record_of(nelem * NODES_PER_ELEMENT * int)?;
    let raw = Fields::new(&payload, offset).i32s(nelem * NODES_PER_ELEMENT)?;
    let ikle = Topology::ikle_from_disk(&raw, npoin)?;

    let (offset, payload) = records.read_record_of(npoin * int)?;
    let ipobo = Fields::new(&payload, offset).i32s(npoin)?;

    let (offset, payload) = records.read_record()?;
    let precision = match precision {
        Some(p) if payload.len() != npoin * p.width() => {
            return Err(Error::UnexpectedRecordLength {
                offset,
                expected: npoin * p.width(),
                found: payload.len(),
            })
        }
        Some(p) => p,
        None => infer_precision(payload.len(), npoin)?,
    };
    let x = Fields::new(&payload, offset).floats(npoin, precision)?;

    let (offset, payload) = records.read_record_of(npoin * precision.width())?;
    let y = Fields::new(&payload, offset).floats(npoin, precision)?;

    let mesh = Topology {
        ikle,
        ipobo,
        x,
        y,
        tag: dimensions.tag,
    };
    Ok((mesh, precision))
}

/// Float width from the byte length of a coordinate record
fn infer_precision(length: usize, npoin: usize) -> Result<Precision> {
    if npoin == 0 {
        return Ok(Precision::Single);
    }
    if length % npoin != 0 {
        return Err(Error::UnsupportedPrecision(f!(
            "{length} bytes for {npoin} values"
        )));
    }
    Precision::from_width(length / npoin)
}
