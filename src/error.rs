//! Result and Error types for the frame conversion

// standard library
use std::path::PathBuf;

// zpolaris modules
use zpolaris_utils::f;

/// Type alias for `Result<T, zpolaris::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `zpolaris`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure reading the ZEUS frame
    #[error(transparent)]
    ZeusError(#[from] zpolaris_zeus::Error),

    /// Failure reading or writing the POLARIS grid
    #[error(transparent)]
    PolarisError(#[from] zpolaris_polaris::Error),

    /// Directory for the output grid could not be created
    #[error("[convert_frame] unable to create output directory {}", .path.display())]
    OutputDirectory {
        /// Directory that was requested
        path: PathBuf,
        /// Reason given by the operating system
        #[source]
        source: std::io::Error,
    },

    /// Frame number could not be understood
    #[error("[zeus2polaris] invalid time frame number \"{0}\"")]
    InvalidFrame(String),
}

impl Error {
    /// Message followed by every underlying cause, separated by `: `
    ///
    /// ```rust
    /// # use zpolaris::Error;
    /// let error = Error::from(std::io::Error::other("disk full"));
    /// assert_eq!(error.chain(), "failure in file I/O: disk full");
    /// ```
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message += &f!(": {cause}");
            source = cause.source();
        }
        message
    }
}
