//! POLARIS physical quantity identifiers

// crate modules
use crate::error::{Error, Result};

/// Catalog of physical quantities understood by POLARIS grids
///
/// The catalog only labels the quantities listed in a grid header. Nothing
/// here checks that the values written for a quantity are physical.
///
/// ```rust
/// # use zpolaris_polaris::Quantity;
/// assert_eq!(Quantity::GasMassDensity.id(), 28);
/// assert_eq!(Quantity::try_from(29).unwrap(), Quantity::DustMassDensity);
/// assert_eq!(Quantity::DustMassDensity.description(), "dust mass density");
/// assert!(Quantity::try_from(36).is_err());
/// ```
///
/// For reference, the full list of identifiers is shown below:
///
/// | ID | Description                                  |
/// | -- | -------------------------------------------- |
/// | 0  | gas number density                           |
/// | 1  | dust number density                          |
/// | 2  | dust temperature                             |
/// | 3  | gas temperature                              |
/// | 4  | mag. field x-direction                       |
/// | 5  | mag. field y-direction                       |
/// | 6  | mag. field z-direction                       |
/// | 7  | vel. field x-direction                       |
/// | 8  | vel. field y-direction                       |
/// | 9  | vel. field z-direction                       |
/// | 10 | rad. pressure x-direction                    |
/// | 11 | rad. pressure y-direction                    |
/// | 12 | rad. pressure z-direction                    |
/// | 13 | dust grain alignment radius                  |
/// | 14 | min. dust grain radius                       |
/// | 15 | max. dust grain radius                       |
/// | 16 | exponent of the grain size distribution      |
/// | 17 | number fraction of a gas species             |
/// | 18 | turbulent gas velocity                       |
/// | 19 | PDA photon count                             |
/// | 20 | ID for the opiate database                   |
/// | 21 | ID for dust composition                      |
/// | 22 | number density of thermal electrons          |
/// | 23 | temperature of thermal electrons             |
/// | 24 | number density of cosmic ray electrons       |
/// | 25 | min. Lorentz factor                          |
/// | 26 | max. Lorentz factor                          |
/// | 27 | power-law index of cosmic ray electrons      |
/// | 28 | gas mass density                             |
/// | 29 | dust mass density                            |
/// | 30 | rad. field density in x-direction            |
/// | 31 | rad. field density in y-direction            |
/// | 32 | rad. field density in z-direction            |
/// | 33 | total rad. field density                     |
/// | 34 | average angle between rad. and mag. field    |
/// | 35 | anisotropy factor of the rad. field          |
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    GasNumberDensity = 0,
    DustNumberDensity = 1,
    DustTemperature = 2,
    GasTemperature = 3,
    MagneticFieldX = 4,
    MagneticFieldY = 5,
    MagneticFieldZ = 6,
    VelocityFieldX = 7,
    VelocityFieldY = 8,
    VelocityFieldZ = 9,
    RadiationPressureX = 10,
    RadiationPressureY = 11,
    RadiationPressureZ = 12,
    AlignmentRadius = 13,
    MinGrainRadius = 14,
    MaxGrainRadius = 15,
    GrainSizeExponent = 16,
    GasSpeciesFraction = 17,
    TurbulentVelocity = 18,
    PdaPhotonCount = 19,
    OpiateId = 20,
    DustCompositionId = 21,
    ThermalElectronDensity = 22,
    ThermalElectronTemperature = 23,
    CosmicRayElectronDensity = 24,
    MinLorentzFactor = 25,
    MaxLorentzFactor = 26,
    CosmicRayPowerLawIndex = 27,
    GasMassDensity = 28,
    DustMassDensity = 29,
    RadiationFieldX = 30,
    RadiationFieldY = 31,
    RadiationFieldZ = 32,
    RadiationFieldTotal = 33,
    RadiationMagneticAngle = 34,
    RadiationAnisotropy = 35,
}

impl Quantity {
    /// Every quantity in the catalog, ordered by id
    pub const ALL: [Quantity; 36] = [
        Quantity::GasNumberDensity,
        Quantity::DustNumberDensity,
        Quantity::DustTemperature,
        Quantity::GasTemperature,
        Quantity::MagneticFieldX,
        Quantity::MagneticFieldY,
        Quantity::MagneticFieldZ,
        Quantity::VelocityFieldX,
        Quantity::VelocityFieldY,
        Quantity::VelocityFieldZ,
        Quantity::RadiationPressureX,
        Quantity::RadiationPressureY,
        Quantity::RadiationPressureZ,
        Quantity::AlignmentRadius,
        Quantity::MinGrainRadius,
        Quantity::MaxGrainRadius,
        Quantity::GrainSizeExponent,
        Quantity::GasSpeciesFraction,
        Quantity::TurbulentVelocity,
        Quantity::PdaPhotonCount,
        Quantity::OpiateId,
        Quantity::DustCompositionId,
        Quantity::ThermalElectronDensity,
        Quantity::ThermalElectronTemperature,
        Quantity::CosmicRayElectronDensity,
        Quantity::MinLorentzFactor,
        Quantity::MaxLorentzFactor,
        Quantity::CosmicRayPowerLawIndex,
        Quantity::GasMassDensity,
        Quantity::DustMassDensity,
        Quantity::RadiationFieldX,
        Quantity::RadiationFieldY,
        Quantity::RadiationFieldZ,
        Quantity::RadiationFieldTotal,
        Quantity::RadiationMagneticAngle,
        Quantity::RadiationAnisotropy,
    ];

    /// An alternative to using `Quantity::GasMassDensity as u16`
    pub fn id(&self) -> u16 {
        *self as u16
    }

    /// Human readable description from the POLARIS manual
    pub fn description(&self) -> &'static str {
        match self {
            Quantity::GasNumberDensity => "gas number density",
            Quantity::DustNumberDensity => "dust number density",
            Quantity::DustTemperature => "dust temperature",
            Quantity::GasTemperature => "gas temperature",
            Quantity::MagneticFieldX => "mag. field x-direction",
            Quantity::MagneticFieldY => "mag. field y-direction",
            Quantity::MagneticFieldZ => "mag. field z-direction",
            Quantity::VelocityFieldX => "vel. field x-direction",
            Quantity::VelocityFieldY => "vel. field y-direction",
            Quantity::VelocityFieldZ => "vel. field z-direction",
            Quantity::RadiationPressureX => "rad. pressure x-direction",
            Quantity::RadiationPressureY => "rad. pressure y-direction",
            Quantity::RadiationPressureZ => "rad. pressure z-direction",
            Quantity::AlignmentRadius => "dust grain alignment radius",
            Quantity::MinGrainRadius => "min. dust grain radius",
            Quantity::MaxGrainRadius => "max. dust grain radius",
            Quantity::GrainSizeExponent => "exponent of the grain size distribution",
            Quantity::GasSpeciesFraction => "number fraction of a gas species",
            Quantity::TurbulentVelocity => "turbulent gas velocity",
            Quantity::PdaPhotonCount => "PDA photon count",
            Quantity::OpiateId => "ID for the opiate database",
            Quantity::DustCompositionId => "ID for dust composition",
            Quantity::ThermalElectronDensity => "number density of thermal electrons",
            Quantity::ThermalElectronTemperature => "temperature of thermal electrons",
            Quantity::CosmicRayElectronDensity => "number density of cosmic ray electrons",
            Quantity::MinLorentzFactor => "min. Lorentz factor",
            Quantity::MaxLorentzFactor => "max. Lorentz factor",
            Quantity::CosmicRayPowerLawIndex => "power-law index of cosmic ray electrons",
            Quantity::GasMassDensity => "gas mass density",
            Quantity::DustMassDensity => "dust mass density",
            Quantity::RadiationFieldX => "rad. field density in x-direction",
            Quantity::RadiationFieldY => "rad. field density in y-direction",
            Quantity::RadiationFieldZ => "rad. field density in z-direction",
            Quantity::RadiationFieldTotal => "total rad. field density",
            Quantity::RadiationMagneticAngle => "average angle between rad. and mag. field",
            Quantity::RadiationAnisotropy => "anisotropy factor of the rad. field",
        }
    }
}

impl TryFrom<u16> for Quantity {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(Error::UnknownQuantity(id))
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.id())
    }
}

/// Values of a single quantity for every grid cell
///
/// Borrowed so that large volumes are never copied just to be written.
#[derive(Debug, Clone, Copy)]
pub struct QuantityField<'a> {
    /// What the values represent
    pub quantity: Quantity,
    /// One value per cell, in grid cell order
    pub values: &'a [f64],
}

impl<'a> QuantityField<'a> {
    /// Label a slice of cell values
    pub fn new(quantity: Quantity, values: &'a [f64]) -> Self {
        Self { quantity, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_by_id() {
        for (i, quantity) in Quantity::ALL.iter().enumerate() {
            assert_eq!(quantity.id() as usize, i);
            assert_eq!(Quantity::try_from(i as u16).unwrap(), *quantity);
        }
    }

    #[test]
    fn unknown_ids() {
        assert!(matches!(
            Quantity::try_from(36),
            Err(Error::UnknownQuantity(36))
        ));
        assert!(Quantity::try_from(u16::MAX).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(
            Quantity::MagneticFieldX.to_string(),
            "mag. field x-direction (4)"
        );
    }
}
