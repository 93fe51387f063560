//! In-memory representation of a POLARIS spherical grid

// standard library
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};

// zpolaris modules
use zpolaris_utils::f;

/// Grid type identifier for spherical grids
pub const SPHERICAL_GRID_ID: u16 = 30;

/// Supported encodings of a grid file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Packed little-endian `u16`/`f64` fields
    Binary,
    /// Whitespace separated decimal tokens
    #[default]
    Ascii,
}

impl Encoding {
    /// File extension conventionally used by POLARIS for the encoding
    ///
    /// ```rust
    /// # use zpolaris_polaris::Encoding;
    /// assert_eq!(Encoding::Binary.extension(), "dat");
    /// assert_eq!(Encoding::Ascii.extension(), "txt");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::Binary => "dat",
            Encoding::Ascii => "txt",
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    /// Parse the encoding name, which must be `binary` or `ascii`
    ///
    /// ```rust
    /// # use zpolaris_polaris::Encoding;
    /// assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::Binary);
    /// assert_eq!("ascii".parse::<Encoding>().unwrap(), Encoding::Ascii);
    /// assert!("hdf5".parse::<Encoding>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binary" => Ok(Encoding::Binary),
            "ascii" => Ok(Encoding::Ascii),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Encoding::Binary => write!(f, "binary"),
            Encoding::Ascii => write!(f, "ascii"),
        }
    }
}

/// Geometry record and cell borders of a spherical grid
///
/// POLARIS fixes the outer theta and phi boundaries itself, so only the
/// interior borders of each axis are stored. The radial boundaries are given
/// explicitly by `r_min` and `r_max`.
///
/// The shape exponents `f_r`, `f_ph`, `f_th` describe power-law spacing of the
/// cells. They are zero here because every border is listed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalGeometry {
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
    /// Interior radial borders, `n_r - 1` values
    pub r_borders: Vec<f64>,
    /// Interior azimuthal borders, `n_ph - 1` values
    pub ph_borders: Vec<f64>,
    /// Interior polar borders, `n_th - 1` values
    pub th_borders: Vec<f64>,
}

impl SphericalGeometry {
    /// Build the geometry from the full edge list of every axis
    ///
    /// Each slice holds every edge of the axis, so `n` cells need `n + 1`
    /// edges. The first edge is dropped from each border list, as is the last
    /// which is either `r_max` or fixed by POLARIS.
    ///
    /// ```rust
    /// # use zpolaris_polaris::SphericalGeometry;
    /// let geometry = SphericalGeometry::from_edges(
    ///     &[1.0, 2.0, 4.0, 8.0],
    ///     &[0.0, 2.0, 4.0, 6.0],
    ///     &[0.0, 1.0, 2.0, 3.0],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!((geometry.r_min, geometry.r_max), (1.0, 8.0));
    /// assert_eq!(geometry.r_borders, vec![2.0, 4.0]);
    /// assert_eq!(geometry.number_of_cells(), 27);
    /// ```
    pub fn from_edges(r_edges: &[f64], ph_edges: &[f64], th_edges: &[f64]) -> Result<Self> {
        let n_r = axis_cells("r", r_edges)?;
        let n_ph = axis_cells("phi", ph_edges)?;
        let n_th = axis_cells("theta", th_edges)?;

        Ok(Self {
            r_min: r_edges[0],
            r_max: r_edges[r_edges.len() - 1],
            n_r,
            n_ph,
            n_th,
            f_r: 0.0,
            f_ph: 0.0,
            f_th: 0.0,
            r_borders: interior(r_edges),
            ph_borders: interior(ph_edges),
            th_borders: interior(th_edges),
        })
    }

    /// Total number of cells, not counting the sentinel
    pub fn number_of_cells(&self) -> usize {
        self.n_r as usize * self.n_ph as usize * self.n_th as usize
    }
}

impl std::fmt::Display for SphericalGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "SphericalGeometry {\n".to_string();
        s += &f!("    radius: [{}, {}]\n", self.r_min, self.r_max);
        s += &f!(
            "    cells: {} ({}x{}x{})\n",
            self.number_of_cells(),
            self.n_r,
            self.n_ph,
            self.n_th
        );
        s += &f!(
            "    shape exponents: ({}, {}, {})\n}}",
            self.f_r,
            self.f_ph,
            self.f_th
        );
        write!(f, "{}", s)
    }
}

/// Cell count of an axis as a grid file field
fn axis_cells(axis: &'static str, edges: &[f64]) -> Result<u16> {
    if edges.len() < 2 {
        return Err(Error::TooFewEdges {
            axis,
            found: edges.len(),
        });
    }
    to_ushort(axis, edges.len() - 1)
}

/// Edges without the first and last
fn interior(edges: &[f64]) -> Vec<f64> {
    edges[1..edges.len() - 1].to_vec()
}

/// Narrow a count into a 2-byte grid file field
pub(crate) fn to_ushort(name: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::CountOverflow { name, value })
}

/// Grid file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHeader {
    /// Grid type, [SPHERICAL_GRID_ID] for everything written here
    pub grid_id: u16,
    /// Quantity ids in the order they appear in every cell record
    pub quantity_ids: Vec<u16>,
}

/// Complete contents of a grid file
///
/// Cell records are stored back to back in `cells`, with
/// `quantity_ids.len()` values per record. The trailing sentinel record is
/// included, see [sentinel()](PolarisGrid::sentinel).
#[derive(Debug, Clone, PartialEq)]
pub struct PolarisGrid {
    /// Grid type and quantity list
    pub header: GridHeader,
    /// Geometry record and cell borders
    pub geometry: SphericalGeometry,
    /// Every cell record, including the sentinel
    pub cells: Vec<f64>,
}

impl PolarisGrid {
    /// Number of values in every cell record
    pub fn number_of_quantities(&self) -> usize {
        self.header.quantity_ids.len()
    }

    /// Number of records including the sentinel
    pub fn number_of_records(&self) -> usize {
        match self.number_of_quantities() {
            0 => self.geometry.number_of_cells() + 1,
            n => self.cells.len() / n,
        }
    }

    /// Cell records, excluding the sentinel
    pub fn records(&self) -> Vec<&[f64]> {
        match self.number_of_quantities() {
            0 => Vec::new(),
            n => self
                .cells
                .chunks_exact(n)
                .take(self.number_of_records().saturating_sub(1))
                .collect(),
        }
    }

    /// Final record closing the file
    pub fn sentinel(&self) -> &[f64] {
        let n = self.number_of_quantities();
        &self.cells[self.cells.len() - n..]
    }

    /// Quantities in the header that are part of the catalog
    pub fn quantities(&self) -> Vec<crate::Quantity> {
        self.header
            .quantity_ids
            .iter()
            .filter_map(|id| crate::Quantity::try_from(*id).ok())
            .collect()
    }
}
