//! Conversion of a ZEUS frame into a POLARIS grid file

// standard library
use std::path::PathBuf;
use std::time::{Duration, Instant};

// crate modules
use crate::config::ConversionConfig;
use crate::error::{Error, Result};

// zpolaris modules
use zpolaris_polaris::{GridSerializer, Quantity, QuantityField, SphericalGeometry};
use zpolaris_utils::f;
use zpolaris_zeus::{read_field_with_floor, read_geometry, Field, GridGeometry};

// external crates
use log::{debug, info};

/// Velocity components in the order POLARIS expects them
const VELOCITY: [(Quantity, Field); 3] = [
    (Quantity::VelocityFieldX, Field::VelocityR),
    (Quantity::VelocityFieldY, Field::VelocityPhi),
    (Quantity::VelocityFieldZ, Field::VelocityTheta),
];

/// Magnetic field components in the order POLARIS expects them
const MAGNETIC: [(Quantity, Field); 3] = [
    (Quantity::MagneticFieldX, Field::MagneticR),
    (Quantity::MagneticFieldY, Field::MagneticPhi),
    (Quantity::MagneticFieldZ, Field::MagneticTheta),
];

/// Convert a single ZEUS frame into a POLARIS spherical grid
///
/// Reads the coordinate arrays and the fields needed for the requested
/// quantities from `config.input_dir`, then writes the grid to
/// [output_path()](ConversionConfig::output_path), which is returned.
///
/// The gas mass density is always written first, followed by the dust mass
/// density and then any optional magnetic and velocity components.
///
/// ```rust, no_run
/// # use zpolaris::{convert_frame, ConversionConfig};
/// # use zpolaris::zeus::Frame;
/// let config = ConversionConfig::new(Frame::new(42));
/// let path = convert_frame(&config).unwrap();
/// println!("grid written to {}", path.display());
/// ```
pub fn convert_frame(config: &ConversionConfig) -> Result<PathBuf> {
    let start = Instant::now();

    let geometry = read_geometry(&config.input_dir, config.margin)?;
    info!("Grid of {}", geometry.shape());

    let density = match config.constant_density {
        Some(rho) => {
            debug!("Using constant gas density of {rho}");
            vec![rho; geometry.number_of_cells()]
        }
        None => read(config, &geometry, Field::Density)?,
    };
    let dust = density
        .iter()
        .map(|rho| rho * config.dust_to_gas)
        .collect::<Vec<f64>>();

    let mut extra = Vec::new();
    if config.include_magnetic {
        for (quantity, field) in MAGNETIC {
            extra.push((quantity, read(config, &geometry, field)?));
        }
    }
    if config.include_velocity {
        for (quantity, field) in VELOCITY {
            extra.push((quantity, read(config, &geometry, field)?));
        }
    }

    let mut fields = vec![
        QuantityField::new(Quantity::GasMassDensity, &density),
        QuantityField::new(Quantity::DustMassDensity, &dust),
    ];
    fields.extend(
        extra
            .iter()
            .map(|(quantity, values)| QuantityField::new(*quantity, values)),
    );

    let spherical = SphericalGeometry::from_edges(
        geometry.r.edges(),
        geometry.ph.edges(),
        geometry.th.edges(),
    )?;

    let path = config.output_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::OutputDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut serializer = GridSerializer::new(config.encoding);
    if config.disable_progress {
        serializer.disable_progress();
    }
    serializer.write(&path, &spherical, &fields)?;

    info!("Elapsed time: {}", hms(start.elapsed()));
    Ok(path)
}

/// Read one field of the configured frame
fn read(config: &ConversionConfig, geometry: &GridGeometry, field: Field) -> Result<Vec<f64>> {
    Ok(read_field_with_floor(
        &config.input_dir,
        field,
        config.frame,
        geometry,
        config.velocity_floor,
    )?)
}

/// Duration as HH:MM:SS
fn hms(duration: Duration) -> String {
    let seconds = duration.as_secs();
    f!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_format() {
        assert_eq!(hms(Duration::from_secs(0)), "00:00:00");
        assert_eq!(hms(Duration::from_millis(61_900)), "00:01:01");
        assert_eq!(hms(Duration::from_secs(3 * 3600 + 25 * 60 + 7)), "03:25:07");
    }
}
