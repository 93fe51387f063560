//! Spherical grid geometry rebuilt from the ZEUS coordinate arrays

// standard library
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::reader::read_raw;
use crate::volume::{trim_ghosts, GhostMargin};

// zpolaris modules
use zpolaris_utils::{f, SliceExt};

// external crates
use log::{debug, warn};

/// Spherical coordinate axes, i.e. `r`, `theta`, `phi`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Radial axis, `x1` in ZEUS
    Radius,
    /// Polar axis, `x2` in ZEUS
    Theta,
    /// Azimuthal axis, `x3` in ZEUS
    Phi,
}

impl Axis {
    /// Name of the raw array holding the cell edges
    pub fn edge_file(&self) -> &'static str {
        match self {
            Axis::Radius => "z_x1ap",
            Axis::Theta => "z_x2ap",
            Axis::Phi => "z_x3ap",
        }
    }

    /// Name of the raw array holding the cell centres
    pub fn centre_file(&self) -> &'static str {
        match self {
            Axis::Radius => "z_x1bp",
            Axis::Theta => "z_x2bp",
            Axis::Phi => "z_x3bp",
        }
    }

    /// Short coordinate name i.e. 'r', 'theta', 'phi'
    pub fn short_name(&self) -> &'static str {
        match self {
            Axis::Radius => "r",
            Axis::Theta => "theta",
            Axis::Phi => "phi",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Cell edges along one spherical axis
///
/// ZEUS edge arrays hold the lower edge of every zone. After trimming the
/// ghost cells the physical grid is described by those lower edges plus the
/// upper edge of the last physical cell, which is the first ghost edge past
/// the trimmed range.
///
/// The full sequence of `n + 1` edges is therefore available for `n` cells.
///
/// ```rust
/// # use zpolaris_zeus::{Axis, AxisGrid, GhostMargin};
/// // ghost edges at either end of four physical cells
/// let raw = [-0.3, -0.2, -0.1, 0.0, 1.0, 3.0, 6.0, 10.0, 10.1, 10.2];
/// let axis = AxisGrid::from_source(Axis::Radius, &raw, GhostMargin(3)).unwrap();
///
/// assert_eq!(axis.number_of_cells(), 4);
/// assert_eq!(axis.edges(), &[0.0, 1.0, 3.0, 6.0, 10.0]);
/// assert_eq!(axis.widths(), vec![1.0, 2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGrid {
    /// Which coordinate the edges belong to
    pub axis: Axis,
    /// Cell edges, one more than the number of cells
    edges: Vec<f64>,
    /// Cell centres, if loaded
    centres: Vec<f64>,
}

impl AxisGrid {
    /// Axis from de-ghosted lower edges and the closing upper edge
    pub fn new(axis: Axis, lower_edges: Vec<f64>, upper_edge: f64) -> Self {
        let mut edges = lower_edges;
        edges.push(upper_edge);

        if !edges.is_strictly_increasing() {
            warn!("{axis} edges are not strictly increasing");
        }

        Self {
            axis,
            edges,
            centres: Vec::new(),
        }
    }

    /// Axis from a raw edge array that still carries its ghost cells
    ///
    /// Without ghost cells there is nothing beyond the last lower edge, so the
    /// final value of the array is taken as the closing edge instead.
    pub fn from_source(axis: Axis, raw: &[f64], margin: GhostMargin) -> Result<Self> {
        if margin.cells() == 0 {
            return match raw.split_last() {
                Some((upper, lower)) if !lower.is_empty() => {
                    Ok(Self::new(axis, lower.to_vec(), *upper))
                }
                _ => Err(Error::UnexpectedLength {
                    operation: "build_geometry",
                    expected: 2,
                    found: raw.len(),
                }),
            };
        }

        let lower_edges = trim_ghosts(raw, margin)?;
        let upper_edge = raw[raw.len() - margin.cells()];
        Ok(Self::new(axis, lower_edges, upper_edge))
    }

    /// Attach the de-ghosted cell centres
    pub fn with_centres(mut self, centres: Vec<f64>) -> Self {
        if centres.len() != self.number_of_cells() {
            warn!(
                "{} axis has {} centres for {} cells",
                self.axis,
                centres.len(),
                self.number_of_cells()
            );
        }
        self.centres = centres;
        self
    }

    /// Number of physical cells along the axis
    pub fn number_of_cells(&self) -> usize {
        self.edges.len() - 1
    }

    /// Every cell edge, lowest first
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lower edge of every physical cell, as listed in the ZEUS array
    pub fn lower_edges(&self) -> &[f64] {
        &self.edges[..self.number_of_cells()]
    }

    /// Edges between cells, i.e. everything but the first and last
    pub fn interior_edges(&self) -> &[f64] {
        &self.edges[1..self.number_of_cells()]
    }

    /// First edge of the axis
    pub fn lower_bound(&self) -> f64 {
        self.edges[0]
    }

    /// Last edge of the axis
    pub fn upper_bound(&self) -> f64 {
        self.edges[self.number_of_cells()]
    }

    /// Width of every cell
    pub fn widths(&self) -> Vec<f64> {
        self.edges.differences()
    }

    /// Cell centres, empty unless loaded with [with_centres()](AxisGrid::with_centres)
    pub fn centres(&self) -> &[f64] {
        &self.centres
    }
}

/// Number of physical cells along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Cells along r
    pub n_r: usize,
    /// Cells along theta
    pub n_th: usize,
    /// Cells along phi
    pub n_ph: usize,
}

impl GridShape {
    /// Total number of cells in the grid
    pub fn number_of_cells(&self) -> usize {
        self.n_r * self.n_th * self.n_ph
    }

    /// Shape of a stored volume that still carries its ghost cells
    ///
    /// Volumes are stored over `(r, phi, theta)`, so phi comes before theta
    /// here. Every physical quantity has to be trimmed with this exact shape.
    ///
    /// ```rust
    /// # use zpolaris_zeus::{GridShape, GhostMargin};
    /// let shape = GridShape { n_r: 64, n_th: 32, n_ph: 128 };
    /// assert_eq!(shape.padded(GhostMargin(3)), [70, 134, 38]);
    /// ```
    pub fn padded(&self, margin: GhostMargin) -> [usize; 3] {
        let p = margin.padding();
        [self.n_r + p, self.n_ph + p, self.n_th + p]
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} cells ({}x{}x{})",
            self.number_of_cells(),
            self.n_r,
            self.n_th,
            self.n_ph
        )
    }
}

/// Geometry of the physical spherical grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    /// Radial cell edges
    pub r: AxisGrid,
    /// Polar cell edges
    pub th: AxisGrid,
    /// Azimuthal cell edges
    pub ph: AxisGrid,
    /// Ghost cells stripped from the source arrays
    pub margin: GhostMargin,
}

impl GridGeometry {
    /// Combine the three axes of a grid
    pub fn new(r: AxisGrid, th: AxisGrid, ph: AxisGrid, margin: GhostMargin) -> Self {
        Self { r, th, ph, margin }
    }

    /// Physical cell counts
    pub fn shape(&self) -> GridShape {
        GridShape {
            n_r: self.r.number_of_cells(),
            n_th: self.th.number_of_cells(),
            n_ph: self.ph.number_of_cells(),
        }
    }

    /// Total number of cells in the grid
    pub fn number_of_cells(&self) -> usize {
        self.shape().number_of_cells()
    }

    /// Padded `(r, phi, theta)` shape for reading physical quantities
    pub fn padded_shape(&self) -> [usize; 3] {
        self.shape().padded(self.margin)
    }

    /// Whether cells along an axis all share the same width
    ///
    /// Widths are compared with a relative tolerance to absorb the rounding in
    /// the stored coordinates.
    pub fn is_uniform(&self, axis: Axis) -> bool {
        let widths = match axis {
            Axis::Radius => self.r.widths(),
            Axis::Theta => self.th.widths(),
            Axis::Phi => self.ph.widths(),
        };

        match widths.first() {
            None => true,
            Some(first) => widths
                .iter()
                .all(|w| (w - first).abs() <= 1e-9 * first.abs().max(w.abs())),
        }
    }
}

impl std::fmt::Display for GridGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "GridGeometry {\n".to_string();
        for axis in [&self.r, &self.th, &self.ph] {
            s += &f!(
                "    {:<5}: {} cells [{}, {}]\n",
                axis.axis.short_name(),
                axis.number_of_cells(),
                axis.lower_bound(),
                axis.upper_bound()
            );
        }
        s += &f!("    ghosts: {}\n}}", self.margin.cells());
        write!(f, "{}", s)
    }
}

/// Read the grid geometry from the coordinate arrays in `dir`
///
/// Both edge and centre arrays are required for every axis.
pub fn read_geometry<P: AsRef<Path>>(dir: P, margin: GhostMargin) -> Result<GridGeometry> {
    let dir = dir.as_ref();
    let read_axis = |axis: Axis| -> Result<AxisGrid> {
        let raw = read_raw(dir.join(axis.edge_file()))?;
        let centres = trim_ghosts(&read_raw(dir.join(axis.centre_file()))?, margin)?;
        Ok(AxisGrid::from_source(axis, &raw, margin)?.with_centres(centres))
    };

    let geometry = GridGeometry::new(
        read_axis(Axis::Radius)?,
        read_axis(Axis::Theta)?,
        read_axis(Axis::Phi)?,
        margin,
    );

    debug!("{geometry}");
    Ok(geometry)
}
