//! `zpolaris` converts ZEUS MHD simulation frames into POLARIS spherical
//! grids
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]

// Re-exports of the format crates.
#[doc(inline)]
pub use zpolaris_polaris as polaris;

#[doc(inline)]
pub use zpolaris_utils as utils;

#[doc(inline)]
pub use zpolaris_zeus as zeus;

// Frame conversion
mod config;
mod convert;
mod error;

#[doc(inline)]
pub use config::{default_output, ConversionConfig, DUST_TO_GAS_RATIO};

#[doc(inline)]
pub use convert::convert_frame;

#[doc(inline)]
pub use error::{Error, Result};
