//! Module for reading ZEUS MHD binary output on spherical grids
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod field;
mod geometry;
mod reader;
mod volume;

// Inline anything important for a nice public API
#[doc(inline)]
pub use volume::{to_canonical_cell_order, trim_ghosts, trim_ghosts_3d, GhostMargin, Volume};

#[doc(inline)]
pub use reader::{read_edges, read_raw, read_volume, ArrayReader};

#[doc(inline)]
pub use geometry::{read_geometry, Axis, AxisGrid, GridGeometry, GridShape};

#[doc(inline)]
pub use field::{
    apply_velocity_floor, gaussian_factor, lorentz_heaviside_to_gaussian, read_field,
    read_field_with_floor, Field, Frame, VELOCITY_FLOOR,
};

#[doc(inline)]
pub use error::{Error, Result};
