//! Physical quantities written by ZEUS and their preprocessing

// standard library
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::geometry::GridGeometry;
use crate::reader::read_volume;

// zpolaris modules
use zpolaris_utils::f;

// external crates
use log::debug;

/// Floor for velocity components that are exactly zero, in code units
pub const VELOCITY_FLOOR: f64 = 1e-5;

/// Zero-padded time frame number used in ZEUS file names
///
/// ```rust
/// # use zpolaris_zeus::Frame;
/// assert_eq!(Frame::new(42).to_string(), "00042");
/// assert_eq!(Frame::new(123456).to_string(), "123456");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Frame(pub u32);

impl Frame {
    /// Frame for a time step number
    pub fn new(number: u32) -> Self {
        Self(number)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

/// Physical quantity volumes written for every frame
///
/// Velocity and magnetic field components are numbered by ZEUS axis, so `2`
/// is the phi component and `3` the theta component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Gas mass density
    Density,
    /// Radial velocity
    VelocityR,
    /// Azimuthal velocity
    VelocityPhi,
    /// Polar velocity
    VelocityTheta,
    /// Radial magnetic field
    MagneticR,
    /// Azimuthal magnetic field
    MagneticPhi,
    /// Polar magnetic field
    MagneticTheta,
}

impl Field {
    /// Every field ZEUS writes for a frame
    pub const ALL: [Field; 7] = [
        Field::Density,
        Field::VelocityR,
        Field::VelocityPhi,
        Field::VelocityTheta,
        Field::MagneticR,
        Field::MagneticPhi,
        Field::MagneticTheta,
    ];

    /// File name prefix, always five characters
    pub fn tag(&self) -> &'static str {
        match self {
            Field::Density => "o_d__",
            Field::VelocityR => "o_v1_",
            Field::VelocityPhi => "o_v2_",
            Field::VelocityTheta => "o_v3_",
            Field::MagneticR => "o_b1_",
            Field::MagneticPhi => "o_b2_",
            Field::MagneticTheta => "o_b3_",
        }
    }

    /// Name of the file holding this field for a given frame
    ///
    /// ```rust
    /// # use zpolaris_zeus::{Field, Frame};
    /// assert_eq!(Field::Density.file_name(Frame::new(7)), "o_d__00007");
    /// assert_eq!(Field::MagneticPhi.file_name(Frame::new(7)), "o_b2_00007");
    /// ```
    pub fn file_name(&self, frame: Frame) -> String {
        f!("{}{}", self.tag(), frame)
    }

    /// Velocity component?
    pub fn is_velocity(&self) -> bool {
        matches!(
            self,
            Field::VelocityR | Field::VelocityPhi | Field::VelocityTheta
        )
    }

    /// Magnetic field component?
    pub fn is_magnetic(&self) -> bool {
        matches!(
            self,
            Field::MagneticR | Field::MagneticPhi | Field::MagneticTheta
        )
    }

    /// Apply the transformation required before writing this field
    ///
    /// - velocities that are exactly zero are raised to `floor`
    /// - magnetic fields are converted from Lorentz-Heaviside to Gaussian units
    /// - density passes through untouched
    pub fn preprocess(&self, values: Vec<f64>, floor: f64) -> Vec<f64> {
        if self.is_velocity() {
            apply_velocity_floor(values, floor)
        } else if self.is_magnetic() {
            lorentz_heaviside_to_gaussian(values)
        } else {
            values
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Field::Density => "density",
            Field::VelocityR => "velocity (r)",
            Field::VelocityPhi => "velocity (phi)",
            Field::VelocityTheta => "velocity (theta)",
            Field::MagneticR => "magnetic field (r)",
            Field::MagneticPhi => "magnetic field (phi)",
            Field::MagneticTheta => "magnetic field (theta)",
        };
        write!(f, "{name}")
    }
}

/// Replace exact zeros with `floor`
///
/// Only values that compare equal to zero are touched, anything else is left
/// exactly as it was.
///
/// ```rust
/// # use zpolaris_zeus::apply_velocity_floor;
/// let velocity = apply_velocity_floor(vec![0.0, -3.2, 1e-12, -0.0], 1e-5);
/// assert_eq!(velocity, vec![1e-5, -3.2, 1e-12, 1e-5]);
/// ```
pub fn apply_velocity_floor(values: Vec<f64>, floor: f64) -> Vec<f64> {
    values
        .into_iter()
        .map(|v| if v == 0.0 { floor } else { v })
        .collect()
}

/// Factor taking a Lorentz-Heaviside magnetic field to Gaussian units
pub fn gaussian_factor() -> f64 {
    (4.0 * std::f64::consts::PI).sqrt()
}

/// Convert magnetic field values from Lorentz-Heaviside to Gaussian units
///
/// Every value is multiplied by `sqrt(4 pi)`.
pub fn lorentz_heaviside_to_gaussian(values: Vec<f64>) -> Vec<f64> {
    let factor = gaussian_factor();
    values.into_iter().map(|b| b * factor).collect()
}

/// Read and preprocess a single field for a frame
///
/// The volume is trimmed with the padded shape of `geometry` and returned in
/// grid cell order. Velocities are floored with [VELOCITY_FLOOR].
pub fn read_field<P: AsRef<Path>>(
    dir: P,
    field: Field,
    frame: Frame,
    geometry: &GridGeometry,
) -> Result<Vec<f64>> {
    read_field_with_floor(dir, field, frame, geometry, VELOCITY_FLOOR)
}

/// Same as [read_field()], but with an explicit velocity floor
pub fn read_field_with_floor<P: AsRef<Path>>(
    dir: P,
    field: Field,
    frame: Frame,
    geometry: &GridGeometry,
    floor: f64,
) -> Result<Vec<f64>> {
    let path = dir.as_ref().join(field.file_name(frame));
    debug!("reading {field} from {}", path.display());

    let values = read_volume(&path, geometry.padded_shape(), geometry.margin)?;
    Ok(field.preprocess(values, floor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_removes_every_zero() {
        let raw = vec![0.0, 1.0, -0.0, 2.5e-7, 0.0, -4.0];
        let floored = apply_velocity_floor(raw.clone(), VELOCITY_FLOOR);

        assert!(floored.iter().all(|v| *v != 0.0));
        for (before, after) in raw.iter().zip(floored.iter()) {
            if *before != 0.0 {
                assert_eq!(before, after);
            } else {
                assert_eq!(*after, VELOCITY_FLOOR);
            }
        }
    }

    #[test]
    fn floor_is_exact_comparison() {
        let tiny = vec![f64::MIN_POSITIVE, -f64::MIN_POSITIVE, 1e-300];
        assert_eq!(apply_velocity_floor(tiny.clone(), 1.0), tiny);
    }

    #[test]
    fn magnetic_conversion() {
        let raw = vec![1.0, -0.5, 0.0, 3.3e-6];
        let converted = lorentz_heaviside_to_gaussian(raw.clone());
        let factor = (4.0 * std::f64::consts::PI).sqrt();
        for (b, g) in raw.iter().zip(converted.iter()) {
            assert_eq!(*g, b * factor);
        }
    }

    #[test]
    fn preprocess_by_kind() {
        let raw = vec![0.0, 2.0];
        assert_eq!(Field::Density.preprocess(raw.clone(), 1e-5), raw);
        assert_eq!(Field::VelocityTheta.preprocess(raw.clone(), 1e-5), vec![1e-5, 2.0]);
        assert_eq!(
            Field::MagneticR.preprocess(raw.clone(), 1e-5),
            vec![0.0, 2.0 * gaussian_factor()]
        );
    }

    #[test]
    fn tags_and_kinds() {
        for field in Field::ALL {
            assert_eq!(field.tag().len(), 5);
            assert!(!(field.is_velocity() && field.is_magnetic()));
        }
        assert_eq!(Field::ALL.iter().filter(|f| f.is_velocity()).count(), 3);
        assert_eq!(Field::ALL.iter().filter(|f| f.is_magnetic()).count(), 3);
    }
}
