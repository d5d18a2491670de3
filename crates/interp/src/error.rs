//! Result and Error types for hydromesh-interp

/// Type alias for `Result<T, interp::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hydromesh-interp` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to read csv records")]
    CsvError(#[from] csv::Error),

    #[error("mesh error")]
    GridError(#[from] hydromesh_grid::Error),

    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),

    /// Neighbour count outside of 1..=10
    #[error("number of neighbours must be between 1 and 10, found {0}")]
    InvalidNeighbourCount(usize),

    #[error("no {0} to interpolate from")]
    NoData(&'static str),

    /// Row of a whitespace separated table that cannot be used
    #[error("malformed row on line {line}, {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Polygon with too few vertices to enclose anything
    #[error("polygon {shape} has {vertices} vertices, at least 3 are required")]
    DegeneratePolygon { shape: i64, vertices: usize },
}
