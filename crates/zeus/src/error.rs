//! Result and Error types for the zeus module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, zeus::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `zpolaris-zeus`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Source array is missing or is not a regular file
    #[error("[read_data] {} does not exist or cannot be read", .0.display())]
    NotFound(PathBuf),

    /// Number of values does not match what the shape or byte count implies
    #[error("[{operation}] unexpected number of values (expected {expected:?}, found {found:?})")]
    UnexpectedLength {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    /// Ghost margin would remove an entire axis
    #[error("[trim_ghosts] ghost margin of {margin:?} too large for an axis of {extent:?} values")]
    MarginTooLarge { margin: usize, extent: usize },
}
