//! Module for reading and writing POLARIS spherical grid files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod grid;
mod quantity;
mod reader;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use grid::{Encoding, GridHeader, PolarisGrid, SphericalGeometry, SPHERICAL_GRID_ID};

#[doc(inline)]
pub use quantity::{Quantity, QuantityField};

#[doc(inline)]
pub use writer::{write_grid, AsciiWriter, BinaryWriter, GridSerializer, GridWriter};

#[doc(inline)]
pub use reader::{read_grid, read_header, GeometryRecord};

#[doc(inline)]
pub use error::{Error, Result};
