//! Common utility for extended `std` types
//!
#![doc = include_str!("../readme.md")]

// Alias for the format! macro
pub use std::format as f;

// Modules
mod num_format;
mod slice_ext;

// Flatten
pub use num_format::NumFormat;
pub use slice_ext::SliceExt;
