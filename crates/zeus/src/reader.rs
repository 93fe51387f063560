//! Read operations for raw ZEUS arrays
//!
//! Every ZEUS array is a headerless sequence of little-endian 8-byte doubles.
//! Nothing is cached, so each call reads the whole file again.

// standard library
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::volume::{trim_ghosts, trim_ghosts_3d, GhostMargin, Volume};

// external crates
use log::trace;

/// Configurable reader for raw ZEUS arrays
///
/// By default the whole file is read into a flat buffer. A ghost margin trims
/// the array, either as one dimensional data or, when a shape is also set, as
/// a column-major volume of that shape. The shape is ignored without a margin.
///
/// Trimmed volumes are flattened into grid cell order unless
/// [keep_shape()](ArrayReader::keep_shape) is called.
///
/// ```rust, no_run
/// # use zpolaris_zeus::{ArrayReader, GhostMargin};
/// let mut reader = ArrayReader::new();
/// reader.set_margin(GhostMargin(3));
/// reader.set_shape([70, 38, 134]);
///
/// let density = reader.read("o_d__00042").unwrap().flatten();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArrayReader {
    /// Maximum number of values to read
    limit: Option<usize>,
    /// Padded shape of the stored volume
    shape: Option<[usize; 3]>,
    /// Ghost cells to remove from every axis
    margin: Option<GhostMargin>,
    /// Return cubes as they are rather than in grid cell order
    keep_shape: bool,
}

impl ArrayReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Read at most `limit` values from the start of the file
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    /// Padded shape of the stored volume, first axis fastest
    pub fn set_shape(&mut self, shape: [usize; 3]) {
        self.shape = Some(shape);
    }

    /// Number of ghost cells to strip from both ends of every axis
    pub fn set_margin(&mut self, margin: GhostMargin) {
        self.margin = Some(margin);
    }

    /// Keep trimmed volumes in their column-major storage order
    pub fn keep_shape(&mut self) {
        self.keep_shape = true;
    }

    /// Read the array at `path` with the current settings
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Volume> {
        let values = read_values(path.as_ref(), self.limit)?;

        let volume = match (self.margin, self.shape) {
            (Some(margin), Some(shape)) => trim_ghosts_3d(&values, shape, margin)?,
            (Some(margin), None) => Volume::Flat(trim_ghosts(&values, margin)?),
            (None, _) => Volume::Flat(values),
        };

        if self.keep_shape {
            Ok(volume)
        } else {
            Ok(Volume::Flat(volume.flatten()))
        }
    }
}

/// Read every value in a raw array
///
/// ```rust, no_run
/// # use zpolaris_zeus::read_raw;
/// let edges = read_raw("z_x1ap").unwrap();
/// ```
pub fn read_raw<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    read_values(path.as_ref(), None)
}

/// Read a one dimensional coordinate array without its ghost cells
pub fn read_edges<P: AsRef<Path>>(path: P, margin: GhostMargin) -> Result<Vec<f64>> {
    let mut reader = ArrayReader::new();
    reader.set_margin(margin);
    Ok(reader.read(path)?.flatten())
}

/// Read a physical quantity volume in grid cell order without its ghost cells
///
/// `shape` must be the padded on-disk shape, see
/// [GridGeometry::padded_shape()](crate::GridGeometry::padded_shape).
pub fn read_volume<P: AsRef<Path>>(
    path: P,
    shape: [usize; 3],
    margin: GhostMargin,
) -> Result<Vec<f64>> {
    let mut reader = ArrayReader::new();
    reader.set_shape(shape);
    reader.set_margin(margin);
    Ok(reader.read(path)?.flatten())
}

/// Open the file, failing early for anything that is not a readable file
fn init_reader(path: &Path) -> Result<BufReader<File>> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|_| Error::NotFound(path.to_path_buf()))?;
    Ok(BufReader::new(file))
}

/// Decode the byte stream into doubles
fn read_values(path: &Path, limit: Option<usize>) -> Result<Vec<f64>> {
    let mut reader = init_reader(path)?;

    let mut bytes = Vec::new();
    match limit {
        Some(n) => reader
            .by_ref()
            .take((n * std::mem::size_of::<f64>()) as u64)
            .read_to_end(&mut bytes)?,
        None => reader.read_to_end(&mut bytes)?,
    };

    let chunks = bytes.chunks_exact(std::mem::size_of::<f64>());
    if !chunks.remainder().is_empty() {
        return Err(Error::UnexpectedLength {
            operation: "read_data",
            expected: bytes.len() - chunks.remainder().len(),
            found: bytes.len(),
        });
    }

    let values = chunks
        .map(|chunk| {
            let mut buffer = [0u8; std::mem::size_of::<f64>()];
            buffer.copy_from_slice(chunk);
            f64::from_le_bytes(buffer)
        })
        .collect::<Vec<f64>>();

    trace!("read {} values from {}", values.len(), path.display());
    Ok(values)
}
