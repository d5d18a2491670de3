//! Result and Error types for the selafin module

use crate::precision::Precision;

/// Type alias for `Result<T, selafin::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `hydromesh-selafin`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to serialise or deserialise a fixed integer record
    #[error("failed to (de)serialise fixed record")]
    UnableToSerialise(#[from] Box<bincode::ErrorKind>),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// End of stream part way through a record
    #[error("file truncated part way through a record at byte {offset}")]
    Truncated { offset: u64 },

    /// Length prefix and length suffix of a record disagree
    #[error("corrupt record at byte {offset} (prefix {prefix:?}, suffix {suffix:?})")]
    CorruptRecord { offset: u64, prefix: i32, suffix: i32 },

    /// Length marker that can not describe any payload
    #[error("invalid record length {length:?} at byte {offset}")]
    InvalidRecordLength { offset: u64, length: i32 },

    /// Well framed record with the wrong payload size for its position
    #[error("unexpected record length at byte {offset} (expected {expected:?}, found {found:?})")]
    UnexpectedRecordLength {
        offset: u64,
        expected: usize,
        found: usize,
    },

    /// Count or payload too large for a 4-byte signed integer
    #[error("{what} of {value} does not fit a 4-byte integer")]
    CountOverflow { what: &'static str, value: usize },

    /// Negative value for something that must be a count
    #[error("negative {what} ({value}) in file header")]
    NegativeCount { what: &'static str, value: i32 },

    /// Time step index beyond the blocks present in the file
    #[error("time step {index} requested but only {available} present")]
    TimeStepOutOfRange { index: usize, available: usize },

    /// Connectivity referencing a node that does not exist
    #[error("element {element} references node {node} outside of the {npoin} mesh nodes")]
    NodeIndexOutOfRange {
        element: usize,
        node: i64,
        npoin: usize,
    },

    /// Precision name or float width other than single or double
    #[error("unsupported precision \"{0}\" (expected single/4 or double/8)")]
    UnsupportedPrecision(String),

    /// Declared precision contradicts the precision marker of the file
    #[error("declared {declared} precision but file marker is \"{marker}\"")]
    PrecisionMismatch { declared: Precision, marker: String },

    /// Anything other than 3 nodes per element
    #[error("only triangular elements are supported (found {0} nodes per element)")]
    UnsupportedElement(i32),

    /// Array sizes that disagree with the header or mesh
    #[error("unexpected number of {what} (expected {expected:?}, found {found:?})")]
    UnexpectedDimensions {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Header, mesh, and time steps must be written in that order
    #[error("{0} written out of order")]
    OutOfOrderWrite(&'static str),

    /// IPARAM[9] flags a date block but there is no date to write
    #[error("IPARAM flags a date block but no date was provided")]
    MissingDate,
}
