//! Read operations for POLARIS grid files
//!
//! Mostly useful for inspecting a converted grid, or checking that the binary
//! and ascii encodings hold the same data.

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::grid::{Encoding, GridHeader, PolarisGrid, SphericalGeometry, SPHERICAL_GRID_ID};

// zpolaris modules
use zpolaris_utils::f;

// external crates
use log::debug;
use nom::character::complete::{multispace0, u16 as ushort};
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::IResult;
use serde::Deserialize;

/// Fixed size geometry record following the header
///
/// Field order matches the file layout exactly, which is what lets the binary
/// record deserialise in one go.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeometryRecord {
    /// Inner radius
    pub r_min: f64,
    /// Outer radius
    pub r_max: f64,
    /// Number of cells along r
    pub n_r: u16,
    /// Number of cells along phi
    pub n_ph: u16,
    /// Number of cells along theta
    pub n_th: u16,
    /// Shape exponent along r
    pub f_r: f64,
    /// Shape exponent along phi
    pub f_ph: f64,
    /// Shape exponent along theta
    pub f_th: f64,
}

/// Read a complete grid file
///
/// ```rust, no_run
/// # use zpolaris_polaris::{read_grid, Encoding};
/// let grid = read_grid("grid.dat", Encoding::Binary).unwrap();
/// println!("{}", grid.geometry);
/// ```
pub fn read_grid<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<PolarisGrid> {
    let path = path.as_ref();
    debug!("Reading {encoding} grid from {}", path.display());

    match encoding {
        Encoding::Binary => {
            let mut source = BinarySource::new(init_reader(path)?);
            parse_grid(&mut source)
        }
        Encoding::Ascii => {
            let mut text = String::new();
            init_reader(path)?.read_to_string(&mut text)?;
            parse_grid(&mut AsciiSource::new(&text))
        }
    }
}

/// Read only the header and geometry record of a grid file
///
/// Nothing past the geometry record is touched, so this is cheap even for
/// very large grids.
pub fn read_header<P: AsRef<Path>>(
    path: P,
    encoding: Encoding,
) -> Result<(GridHeader, GeometryRecord)> {
    let mut reader = init_reader(path.as_ref())?;

    match encoding {
        Encoding::Binary => {
            let mut source = BinarySource::new(reader);
            parse_header(&mut source)
        }
        Encoding::Ascii => {
            // grid id and quantity count decide how many lines follow
            let mut text = read_lines(&mut reader, 2)?;
            let n = AsciiSource::new(&text).skip_ushort()?.ushort("number of quantities")?;
            text += &read_lines(&mut reader, n as usize + 5)?;
            parse_header(&mut AsciiSource::new(&text))
        }
    }
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| Error::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Collect the next `n` lines of text
fn read_lines<R: BufRead>(reader: &mut R, n: usize) -> Result<String> {
    let mut text = String::new();
    for _ in 0..n {
        if reader.read_line(&mut text)? == 0 {
            return Err(Error::ParseError("unexpected end of file in header".into()));
        }
    }
    Ok(text)
}

/// Field level input for one grid file encoding
trait GridSource {
    /// Next 2-byte unsigned integer field
    fn ushort(&mut self, what: &str) -> Result<u16>;

    /// Next 8-byte floating point field
    fn double(&mut self, what: &str) -> Result<f64>;

    /// Make sure nothing is left over
    fn finish(&mut self) -> Result<()>;

    /// Next `n` floating point fields
    fn doubles(&mut self, n: usize, what: &str) -> Result<Vec<f64>> {
        (0..n).map(|_| self.double(what)).collect()
    }

    /// Geometry record, field by field
    fn geometry_record(&mut self) -> Result<GeometryRecord> {
        Ok(GeometryRecord {
            r_min: self.double("inner radius")?,
            r_max: self.double("outer radius")?,
            n_r: self.ushort("r cell count")?,
            n_ph: self.ushort("phi cell count")?,
            n_th: self.ushort("theta cell count")?,
            f_r: self.double("r shape exponent")?,
            f_ph: self.double("phi shape exponent")?,
            f_th: self.double("theta shape exponent")?,
        })
    }
}

/// Binary fields decoded with bincode
struct BinarySource<R: Read> {
    inner: R,
}

impl<R: Read> BinarySource<R> {
    fn new(inner: R) -> Self {
        Self { inner }
    }

    fn field<T: serde::de::DeserializeOwned>(&mut self, what: &str) -> Result<T> {
        bincode::deserialize_from(&mut self.inner)
            .map_err(|e| Error::ParseError(f!("failed to read {what}: {e}")))
    }
}

impl<R: Read> GridSource for BinarySource<R> {
    fn ushort(&mut self, what: &str) -> Result<u16> {
        self.field(what)
    }

    fn double(&mut self, what: &str) -> Result<f64> {
        self.field(what)
    }

    fn geometry_record(&mut self) -> Result<GeometryRecord> {
        self.field("geometry record")
    }

    fn finish(&mut self) -> Result<()> {
        let mut buffer = [0u8; 1];
        match self.inner.read(&mut buffer)? {
            0 => Ok(()),
            _ => Err(Error::ParseError("trailing data after sentinel cell".into())),
        }
    }
}

/// Whitespace separated decimal tokens
struct AsciiSource<'a> {
    rest: &'a str,
}

impl<'a> AsciiSource<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn skip_ushort(mut self) -> Result<Self> {
        self.ushort("grid id")?;
        Ok(self)
    }
}

fn ushort_token(input: &str) -> IResult<&str, u16> {
    preceded(multispace0, ushort)(input)
}

fn double_token(input: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(input)
}

impl GridSource for AsciiSource<'_> {
    fn ushort(&mut self, what: &str) -> Result<u16> {
        let (rest, value) =
            ushort_token(self.rest).map_err(|_| Error::ParseError(f!("expected {what}")))?;
        self.rest = rest;
        Ok(value)
    }

    fn double(&mut self, what: &str) -> Result<f64> {
        let (rest, value) =
            double_token(self.rest).map_err(|_| Error::ParseError(f!("expected {what}")))?;
        self.rest = rest;
        Ok(value)
    }

    fn finish(&mut self) -> Result<()> {
        match self.rest.trim().is_empty() {
            true => Ok(()),
            false => Err(Error::ParseError("trailing data after sentinel cell".into())),
        }
    }
}

/// Grid id, quantity ids and geometry record
fn parse_header<S: GridSource>(source: &mut S) -> Result<(GridHeader, GeometryRecord)> {
    let grid_id = source.ushort("grid id")?;
    if grid_id != SPHERICAL_GRID_ID {
        return Err(Error::ParseError(f!(
            "grid id {grid_id} is not a spherical grid ({SPHERICAL_GRID_ID})"
        )));
    }

    let n = source.ushort("number of quantities")?;
    let quantity_ids = (0..n)
        .map(|_| source.ushort("quantity id"))
        .collect::<Result<Vec<u16>>>()?;

    let header = GridHeader {
        grid_id,
        quantity_ids,
    };
    Ok((header, source.geometry_record()?))
}

/// Everything from the header to the sentinel cell
fn parse_grid<S: GridSource>(source: &mut S) -> Result<PolarisGrid> {
    let (header, record) = parse_header(source)?;

    let geometry = SphericalGeometry {
        r_min: record.r_min,
        r_max: record.r_max,
        n_r: record.n_r,
        n_ph: record.n_ph,
        n_th: record.n_th,
        f_r: record.f_r,
        f_ph: record.f_ph,
        f_th: record.f_th,
        r_borders: source.doubles(record.n_r.saturating_sub(1) as usize, "r border")?,
        ph_borders: source.doubles(record.n_ph.saturating_sub(1) as usize, "phi border")?,
        th_borders: source.doubles(record.n_th.saturating_sub(1) as usize, "theta border")?,
    };

    let n_values = (geometry.number_of_cells() + 1) * header.quantity_ids.len();
    let cells = source.doubles(n_values, "cell value")?;
    source.finish()?;

    Ok(PolarisGrid {
        header,
        geometry,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_tokens() {
        let mut source = AsciiSource::new("30\n 2 1e-5 -2.5e16\n0\n");
        assert_eq!(source.ushort("a").unwrap(), 30);
        assert_eq!(source.ushort("b").unwrap(), 2);
        assert_eq!(source.double("c").unwrap(), 1e-5);
        assert_eq!(source.double("d").unwrap(), -2.5e16);
        assert_eq!(source.double("e").unwrap(), 0.0);
        assert!(source.finish().is_ok());
        assert!(source.double("f").is_err());
    }

    #[test]
    fn ascii_wrong_grid() {
        let mut source = AsciiSource::new("20\n0\n");
        assert!(matches!(
            parse_header(&mut source),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn binary_record_layout() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        bytes.extend_from_slice(&9.0f64.to_le_bytes());
        for n in [4u16, 3, 2] {
            bytes.extend_from_slice(&n.to_le_bytes());
        }
        for _ in 0..3 {
            bytes.extend_from_slice(&0.0f64.to_le_bytes());
        }

        let mut source = BinarySource::new(bytes.as_slice());
        let record = source.geometry_record().unwrap();
        assert_eq!((record.r_min, record.r_max), (1.0, 9.0));
        assert_eq!((record.n_r, record.n_ph, record.n_th), (4, 3, 2));
        assert!(source.finish().is_ok());
    }

    #[test]
    fn missing_file_is_named() {
        let error = read_grid("no/such/grid.dat", Encoding::Binary).unwrap_err();
        assert!(matches!(error, Error::OpenFailed { .. }));
        assert!(error.to_string().starts_with("[read_grid]"));
        assert!(error.to_string().contains("grid.dat"));
    }

    #[test]
    fn binary_truncated() {
        let bytes = 30u16.to_le_bytes();
        let mut source = BinarySource::new(&bytes[..1]);
        assert!(matches!(source.ushort("grid id"), Err(Error::ParseError(_))));
    }
}
