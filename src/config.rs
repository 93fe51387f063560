//! Settings for converting a single frame

// standard library
use std::ffi::OsString;
use std::path::PathBuf;

// zpolaris modules
use zpolaris_polaris::Encoding;
use zpolaris_utils::f;
use zpolaris_zeus::{Frame, GhostMargin, VELOCITY_FLOOR};

/// Dust mass per unit gas mass
pub const DUST_TO_GAS_RATIO: f64 = 0.01;

/// Everything needed to convert one ZEUS frame into a POLARIS grid
///
/// The defaults match the usual workflow: an ascii grid written under
/// `polaris_grid/`, 3 ghost cells, and only the gas and dust mass densities.
///
/// ```rust
/// # use zpolaris::ConversionConfig;
/// # use zpolaris::polaris::Encoding;
/// # use zpolaris::zeus::Frame;
/// let mut config = ConversionConfig::new(Frame::new(42));
/// config.encoding = Encoding::Binary;
///
/// assert_eq!(
///     config.output_path().to_str(),
///     Some("polaris_grid/lmd2.4-1k-Slw_00042.dat")
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Time frame to convert
    pub frame: Frame,
    /// Directory holding the ZEUS arrays
    pub input_dir: PathBuf,
    /// Output path without the encoding extension
    pub output: PathBuf,
    /// Grid file encoding
    pub encoding: Encoding,
    /// Ghost cells around every axis of the ZEUS arrays
    pub margin: GhostMargin,
    /// Replacement for velocity components that are exactly zero
    pub velocity_floor: f64,
    /// Dust mass density as a fraction of the gas mass density
    pub dust_to_gas: f64,
    /// Replace the gas density of every cell by this value
    pub constant_density: Option<f64>,
    /// Also write the velocity field
    pub include_velocity: bool,
    /// Also write the magnetic field
    pub include_magnetic: bool,
    /// Disable progress bar?
    pub disable_progress: bool,
}

impl ConversionConfig {
    /// Default settings for a frame
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            input_dir: PathBuf::from("."),
            output: default_output(frame),
            encoding: Encoding::Ascii,
            margin: GhostMargin::default(),
            velocity_floor: VELOCITY_FLOOR,
            dust_to_gas: DUST_TO_GAS_RATIO,
            constant_density: None,
            include_velocity: false,
            include_magnetic: false,
            disable_progress: false,
        }
    }

    /// Output path with the extension of the chosen encoding
    ///
    /// The extension is appended rather than substituted, since the stems
    /// usually contain dots of their own.
    pub fn output_path(&self) -> PathBuf {
        let mut path = OsString::from(self.output.as_os_str());
        path.push(".");
        path.push(self.encoding.extension());
        PathBuf::from(path)
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::new(Frame::new(0))
    }
}

/// Conventional output stem for a frame
pub fn default_output(frame: Frame) -> PathBuf {
    PathBuf::from(f!("polaris_grid/lmd2.4-1k-Slw_{frame}"))
}
