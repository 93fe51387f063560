//! Result and Error types for the polaris module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, polaris::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `zpolaris-polaris`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Output grid file could not be created
    #[error("[write_grid] unable to create {}", .path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Grid file could not be opened for reading
    #[error("[read_grid] unable to open {}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure to serialise or deserialise a binary field
    #[error("failed binary encoding")]
    BincodeError(#[from] Box<bincode::ErrorKind>),

    /// Grid encoding is not one of the supported modes
    #[error("[write_grid] grid format must be either \"binary\" or \"ascii\", found \"{0}\"")]
    InvalidFormat(String),

    /// Quantity id outside of the POLARIS catalog
    #[error("quantity id {0} is not in the POLARIS catalog")]
    UnknownQuantity(u16),

    /// Value does not fit into a 2-byte unsigned integer field
    #[error("[write_grid] {name} of {value:?} does not fit in a grid file")]
    CountOverflow { name: &'static str, value: usize },

    /// Axis needs at least two edges for a single cell
    #[error("[write_grid] {axis} axis needs at least 2 edges, found {found:?}")]
    TooFewEdges { axis: &'static str, found: usize },

    /// Quantity data do not cover the grid
    #[error("[write_grid] {quantity} has {found:?} values for {expected:?} cells")]
    UnexpectedLength {
        quantity: String,
        expected: usize,
        found: usize,
    },

    /// Malformed grid file
    #[error("[read_grid] {0}")]
    ParseError(String),

    /// Progress bar could not be created
    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),
}
