//! Write operations for POLARIS grid files

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::grid::{to_ushort, Encoding, SphericalGeometry, SPHERICAL_GRID_ID};
use crate::quantity::QuantityField;

// zpolaris modules
use zpolaris_utils::NumFormat;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info};

/// Field level output for one grid file encoding
///
/// Every field is written with an `endl` flag marking the end of a record
/// group. Only text encodings care about it.
pub trait GridWriter {
    /// Write a 2-byte unsigned integer field
    fn write_ushort(&mut self, value: u16, endl: bool) -> Result<()>;

    /// Write an 8-byte floating point field
    fn write_double(&mut self, value: f64, endl: bool) -> Result<()>;

    /// Close a record group that ended without an `endl` field
    fn end_line(&mut self) -> Result<()>;

    /// Flush everything through to the underlying writer
    fn finish(&mut self) -> Result<()>;
}

/// Packed little-endian fields with no separators
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    /// Wrap any writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> GridWriter for BinaryWriter<W> {
    fn write_ushort(&mut self, value: u16, _endl: bool) -> Result<()> {
        bincode::serialize_into(&mut self.inner, &value)?;
        Ok(())
    }

    fn write_double(&mut self, value: f64, _endl: bool) -> Result<()> {
        bincode::serialize_into(&mut self.inner, &value)?;
        Ok(())
    }

    fn end_line(&mut self) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }
}

/// Decimal tokens, space separated within a record group
///
/// Doubles are written as their shortest round-trip representation, see
/// [NumFormat::token()].
#[derive(Debug)]
pub struct AsciiWriter<W: Write> {
    inner: W,
}

impl<W: Write> AsciiWriter<W> {
    /// Wrap any writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    fn write_token(&mut self, token: &str, endl: bool) -> Result<()> {
        match endl {
            true => writeln!(self.inner, "{token}")?,
            false => write!(self.inner, "{token} ")?,
        }
        Ok(())
    }
}

impl<W: Write> GridWriter for AsciiWriter<W> {
    fn write_ushort(&mut self, value: u16, endl: bool) -> Result<()> {
        self.write_token(&value.to_string(), endl)
    }

    fn write_double(&mut self, value: f64, endl: bool) -> Result<()> {
        self.write_token(&value.token(), endl)
    }

    fn end_line(&mut self) -> Result<()> {
        writeln!(self.inner)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }
}

/// Writes complete grid files in a chosen [Encoding]
///
/// The encoding is fixed on construction, and every write goes through the
/// matching [GridWriter].
///
/// ```rust
/// # use zpolaris_polaris::{GridSerializer, Encoding, Quantity, QuantityField, SphericalGeometry};
/// let geometry = SphericalGeometry::from_edges(&[1.0, 2.0], &[0.0, 6.0], &[0.0, 3.0]).unwrap();
/// let density = [0.5];
///
/// let mut serializer = GridSerializer::new(Encoding::Ascii);
/// serializer.disable_progress();
///
/// let mut buffer = Vec::new();
/// serializer
///     .write_to(
///         &mut buffer,
///         &geometry,
///         &[QuantityField::new(Quantity::GasMassDensity, &density)],
///     )
///     .unwrap();
///
/// let text = String::from_utf8(buffer).unwrap();
/// assert_eq!(text, "30\n1\n28\n1 2\n1 1 1\n0\n0\n0\n\n\n\n0.5\n0\n");
/// ```
#[derive(Debug, Clone)]
pub struct GridSerializer {
    /// Output encoding
    encoding: Encoding,
    /// Disable progress bar?
    disable_progress: bool,
}

impl GridSerializer {
    /// Serializer for the given encoding
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            disable_progress: false,
        }
    }

    /// Turn off the progress bar over the cell records
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Encoding used for every write
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Write a complete grid file to `path`
    ///
    /// The quantity data are checked against the geometry before the file is
    /// created. A failure part way through leaves a truncated file behind.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        geometry: &SphericalGeometry,
        fields: &[QuantityField],
    ) -> Result<()> {
        check_fields(geometry, fields)?;

        let path = path.as_ref();
        info!("Writing {} grid to {}", self.encoding, path.display());
        let file = File::create(path).map_err(|source| Error::CreateFailed {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_unchecked(BufWriter::new(file), geometry, fields)
    }

    /// Write a complete grid to any writer
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        geometry: &SphericalGeometry,
        fields: &[QuantityField],
    ) -> Result<()> {
        check_fields(geometry, fields)?;
        self.write_unchecked(writer, geometry, fields)
    }

    fn write_unchecked<W: Write>(
        &self,
        writer: W,
        geometry: &SphericalGeometry,
        fields: &[QuantityField],
    ) -> Result<()> {
        let mut progress = self.init_progress_bar(geometry.number_of_cells())?;
        let result = match self.encoding {
            Encoding::Binary => {
                serialize(&mut BinaryWriter::new(writer), geometry, fields, &mut progress)
            }
            Encoding::Ascii => {
                serialize(&mut AsciiWriter::new(writer), geometry, fields, &mut progress)
            }
        };

        self.close_progress_bar(&mut std::io::stderr())?;
        result
    }

    /// End the line holding a visible progress bar
    ///
    /// The bar leaves the cursor on its own line, which would otherwise glue
    /// the next log message onto it.
    fn close_progress_bar<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.disable_progress {
            writeln!(out)?;
        }
        Ok(())
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        BarBuilder::default()
            .total(total)
            .desc("Writing cells")
            .unit(" cells")
            .unit_scale(true)
            .disable(self.disable_progress)
            .build()
            .map_err(|e| Error::ProgressBar(e.to_string()))
    }
}

/// Write a complete grid file with the default [GridSerializer]
pub fn write_grid<P: AsRef<Path>>(
    path: P,
    encoding: Encoding,
    geometry: &SphericalGeometry,
    fields: &[QuantityField],
) -> Result<()> {
    GridSerializer::new(encoding).write(path, geometry, fields)
}

/// Every field needs exactly one value per cell
fn check_fields(geometry: &SphericalGeometry, fields: &[QuantityField]) -> Result<()> {
    to_ushort("number of quantities", fields.len())?;

    let expected = geometry.number_of_cells();
    for field in fields {
        if field.values.len() != expected {
            return Err(Error::UnexpectedLength {
                quantity: field.quantity.to_string(),
                expected,
                found: field.values.len(),
            });
        }
    }
    Ok(())
}

/// Run through every section of the grid file in order
fn serialize<G: GridWriter>(
    writer: &mut G,
    geometry: &SphericalGeometry,
    fields: &[QuantityField],
    progress: &mut Bar,
) -> Result<()> {
    write_header(writer, fields)?;
    write_geometry(writer, geometry)?;
    write_borders(writer, geometry)?;

    debug!("Writing {} cell records", geometry.number_of_cells());
    let last = fields.len().saturating_sub(1);
    for cell in 0..geometry.number_of_cells() {
        for (i, field) in fields.iter().enumerate() {
            writer.write_double(field.values[cell], i == last)?;
        }
        progress.update(1)?;
    }

    // central cell is zero for every quantity
    for i in 0..fields.len() {
        writer.write_double(0.0, i == last)?;
    }

    writer.finish()
}

/// Grid id, number of quantities, and quantity ids, one per line
fn write_header<G: GridWriter>(writer: &mut G, fields: &[QuantityField]) -> Result<()> {
    writer.write_ushort(SPHERICAL_GRID_ID, true)?;
    writer.write_ushort(to_ushort("number of quantities", fields.len())?, true)?;
    for field in fields {
        writer.write_ushort(field.quantity.id(), true)?;
    }
    Ok(())
}

/// Radial bounds, cell counts, and shape exponents
fn write_geometry<G: GridWriter>(writer: &mut G, geometry: &SphericalGeometry) -> Result<()> {
    writer.write_double(geometry.r_min, false)?;
    writer.write_double(geometry.r_max, true)?;

    writer.write_ushort(geometry.n_r, false)?;
    writer.write_ushort(geometry.n_ph, false)?;
    writer.write_ushort(geometry.n_th, true)?;

    writer.write_double(geometry.f_r, true)?;
    writer.write_double(geometry.f_ph, true)?;
    writer.write_double(geometry.f_th, true)?;
    Ok(())
}

/// Interior borders in r, phi, theta order, one line per axis
fn write_borders<G: GridWriter>(writer: &mut G, geometry: &SphericalGeometry) -> Result<()> {
    for borders in [
        &geometry.r_borders,
        &geometry.ph_borders,
        &geometry.th_borders,
    ] {
        for border in borders {
            writer.write_double(*border, false)?;
        }
        writer.end_line()?;
    }
    Ok(())
}
