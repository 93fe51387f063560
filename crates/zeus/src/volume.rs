//! Ghost cell trimming and axis ordering for raw ZEUS volumes

// crate modules
use crate::error::{Error, Result};

/// Number of ghost cells padding both ends of every axis
///
/// ZEUS pads every axis with 3 ghost cells on each side, which is the
/// [Default]. A margin of zero leaves an array untouched.
///
/// ```rust
/// # use zpolaris_zeus::GhostMargin;
/// let margin = GhostMargin::default();
/// assert_eq!(margin.cells(), 3);
/// assert_eq!(margin.padding(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostMargin(pub usize);

impl GhostMargin {
    /// Ghost cells written by ZEUS on each side of an axis
    pub const ZEUS: Self = Self(3);

    /// Cells removed from each end of an axis
    pub fn cells(&self) -> usize {
        self.0
    }

    /// Total cells removed from an axis, i.e. both ends
    pub fn padding(&self) -> usize {
        2 * self.0
    }

    /// Make sure an axis of `extent` values survives trimming
    fn check(&self, extent: usize) -> Result<()> {
        if self.0 > 0 && extent <= self.padding() {
            return Err(Error::MarginTooLarge {
                margin: self.0,
                extent,
            });
        }
        Ok(())
    }
}

impl Default for GhostMargin {
    fn default() -> Self {
        Self::ZEUS
    }
}

/// Values loaded from a single source array
///
/// A [Volume::Cube] keeps its values in column-major order, so the first
/// dimension varies fastest in memory exactly as ZEUS writes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Volume {
    /// One dimensional buffer
    Flat(Vec<f64>),
    /// Three dimensional block of `dims[0] x dims[1] x dims[2]` values
    Cube { dims: [usize; 3], values: Vec<f64> },
}

impl Volume {
    /// Total number of values
    pub fn len(&self) -> usize {
        match self {
            Volume::Flat(values) => values.len(),
            Volume::Cube { values, .. } => values.len(),
        }
    }

    /// Check for an empty volume
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into the cell order expected by the grid
    ///
    /// Cubes go through [to_canonical_cell_order()], flat buffers are returned
    /// as they are.
    pub fn flatten(self) -> Vec<f64> {
        match self {
            Volume::Flat(values) => values,
            Volume::Cube { dims, values } => to_canonical_cell_order(&values, dims),
        }
    }
}

/// Strip `margin` values from both ends of a one dimensional array
///
/// ```rust
/// # use zpolaris_zeus::{trim_ghosts, GhostMargin};
/// let raw: Vec<f64> = (0..10).map(f64::from).collect();
/// let trimmed = trim_ghosts(&raw, GhostMargin(3)).unwrap();
/// assert_eq!(trimmed, vec![3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn trim_ghosts(values: &[f64], margin: GhostMargin) -> Result<Vec<f64>> {
    margin.check(values.len())?;
    let m = margin.cells();
    Ok(values[m..values.len() - m].to_vec())
}

/// Reshape a flat buffer into a column-major cube and strip the ghost cells
///
/// `dims` is the padded shape of the volume as stored on disk. The returned
/// [Volume::Cube] has `2 * margin` fewer values along every axis.
pub fn trim_ghosts_3d(values: &[f64], dims: [usize; 3], margin: GhostMargin) -> Result<Volume> {
    let expected = dims.iter().product::<usize>();
    if values.len() != expected {
        return Err(Error::UnexpectedLength {
            operation: "reshape",
            expected,
            found: values.len(),
        });
    }

    for extent in dims {
        margin.check(extent)?;
    }

    let m = margin.cells();
    let [a, b, c] = dims;
    let trimmed = [a - 2 * m, b - 2 * m, c - 2 * m];

    // column-major, so the first axis is innermost
    let mut cube = Vec::with_capacity(trimmed.iter().product());
    for k in m..c - m {
        for j in m..b - m {
            let offset = a * (j + b * k);
            cube.extend_from_slice(&values[offset + m..offset + a - m]);
        }
    }

    Ok(Volume::Cube {
        dims: trimmed,
        values: cube,
    })
}

/// Flatten a column-major cube into the grid cell order
///
/// ZEUS stores volumes over `(r, phi, theta)` with `r` varying fastest. The
/// grid enumerates cells with `r` slowest, then `theta`, then `phi` fastest.
/// In array terms this swaps the second and third axes and then flattens in
/// row-major order.
///
/// ```rust
/// # use zpolaris_zeus::to_canonical_cell_order;
/// // value at (i, j, k) is i + 2j + 4k
/// let values: Vec<f64> = (0..12).map(f64::from).collect();
/// let cells = to_canonical_cell_order(&values, [2, 2, 3]);
/// assert_eq!(
///     cells,
///     vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 1.0, 3.0, 5.0, 7.0, 9.0, 11.0]
/// );
/// ```
pub fn to_canonical_cell_order(values: &[f64], dims: [usize; 3]) -> Vec<f64> {
    let [a, b, c] = dims;
    let mut cells = Vec::with_capacity(values.len());
    for i in 0..a {
        for k in 0..c {
            for j in 0..b {
                cells.push(values[i + a * (j + b * k)]);
            }
        }
    }
    cells
}
