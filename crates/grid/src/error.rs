//! Result and Error types for hydromesh-grid

/// Type alias for `Result<T, grid::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hydromesh-grid` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("csv error")]
    CsvError(#[from] csv::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("selafin error")]
    SelafinError(#[from] hydromesh_selafin::Error),

    /// Text line with the wrong token count or a non-numeric token
    #[error("malformed record on line {line}: {reason}")]
    MalformedTextRecord { line: usize, reason: String },

    /// File ended before every declared node or element was read
    #[error("unexpected end of file (expected {expected} {what}, found {found})")]
    MissingRecords {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Node or element number outside of the mesh
    #[error("{what} {index} is outside of the valid range 1..={count}")]
    IndexOutOfRange {
        what: &'static str,
        index: i64,
        count: usize,
    },

    /// Anything other than a 3-node triangle
    #[error("unsupported element \"{card}\" on line {line}, only triangles are supported")]
    UnsupportedElement { line: usize, card: String },

    /// A boundary edge chain that does not close back on itself
    #[error("boundary is not closed, no outgoing boundary edge at node {node}")]
    OpenBoundary { node: usize },

    #[error("unexpected number of {what} (expected {expected:?}, found {found:?})")]
    UnexpectedDimensions {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Geometry without the nodes or boundary a mesh generator needs
    #[error("geometry has no {0}")]
    EmptyGeometry(&'static str),

    /// Shape with too few vertices once snapped to the nodes
    #[error("{what} {shape} has {vertices} snapped vertices")]
    DegenerateShape {
        what: &'static str,
        shape: i64,
        vertices: usize,
    },

    #[error("variable \"{0}\" not found")]
    VariableNotFound(String),
}
