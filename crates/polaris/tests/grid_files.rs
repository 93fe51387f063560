//! Integration tests for writing and reading back grid files

use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;
use zpolaris_polaris::{
    read_grid, read_header, Encoding, GridSerializer, Quantity, QuantityField, SphericalGeometry,
    SPHERICAL_GRID_ID,
};

/// Small 2x2x2 grid with awkward values for decimal conversion
struct Sample {
    geometry: SphericalGeometry,
    rho: Vec<f64>,
    dust: Vec<f64>,
}

impl Sample {
    fn fields(&self) -> [QuantityField<'_>; 2] {
        [
            QuantityField::new(Quantity::GasMassDensity, &self.rho),
            QuantityField::new(Quantity::DustMassDensity, &self.dust),
        ]
    }
}

#[fixture]
fn sample() -> Sample {
    let geometry = SphericalGeometry::from_edges(
        &[1.496e13, 2.0 / 3.0 * 1e14, 7.48e14],
        &[0.0, std::f64::consts::PI, 2.0 * std::f64::consts::PI],
        &[0.0, std::f64::consts::FRAC_PI_2, std::f64::consts::PI],
    )
    .unwrap();

    let rho: Vec<f64> = (1..=8).map(|i| 3.94959572359999973744e-16 / i as f64).collect();
    let dust = rho.iter().map(|r| 0.01 * r).collect();

    Sample {
        geometry,
        rho,
        dust,
    }
}

/// Scratch directory, removed when dropped
#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write_sample(dir: &TempDir, sample: &Sample, encoding: Encoding, name: &str) -> PathBuf {
    let path = dir
        .path()
        .join(format!("{name}.{}", encoding.extension()));

    let mut serializer = GridSerializer::new(encoding);
    serializer.disable_progress();
    serializer
        .write(&path, &sample.geometry, &sample.fields())
        .unwrap();
    path
}

#[rstest]
#[case(Encoding::Binary)]
#[case(Encoding::Ascii)]
fn header_round_trip(dir: TempDir, sample: Sample, #[case] encoding: Encoding) {
    let path = write_sample(&dir, &sample, encoding, &format!("header_{encoding}"));
    let (header, record) = read_header(&path, encoding).unwrap();

    assert_eq!(header.grid_id, SPHERICAL_GRID_ID);
    assert_eq!(header.quantity_ids, vec![28, 29]);
    assert_eq!((record.n_r, record.n_ph, record.n_th), (2, 2, 2));
    assert_eq!(record.r_min, 1.496e13);
    assert_eq!(record.r_max, 7.48e14);
    assert_eq!((record.f_r, record.f_ph, record.f_th), (0.0, 0.0, 0.0));
}

#[rstest]
#[case(Encoding::Binary)]
#[case(Encoding::Ascii)]
fn full_round_trip(dir: TempDir, sample: Sample, #[case] encoding: Encoding) {
    let path = write_sample(&dir, &sample, encoding, &format!("full_{encoding}"));
    let grid = read_grid(&path, encoding).unwrap();

    assert_eq!(grid.geometry, sample.geometry);
    assert_eq!(grid.number_of_records(), 9);
    assert_eq!(grid.sentinel(), &[0.0, 0.0]);
    assert_eq!(
        grid.quantities(),
        vec![Quantity::GasMassDensity, Quantity::DustMassDensity]
    );

    for (i, record) in grid.records().iter().enumerate() {
        assert_eq!(record.to_vec(), vec![sample.rho[i], sample.dust[i]]);
    }
}

#[rstest]
fn encodings_agree(dir: TempDir, sample: Sample) {
    let binary = write_sample(&dir, &sample, Encoding::Binary, "agree");
    let ascii = write_sample(&dir, &sample, Encoding::Ascii, "agree");
    let binary = read_grid(binary, Encoding::Binary);
    let ascii = read_grid(ascii, Encoding::Ascii);
    assert_eq!(binary.unwrap(), ascii.unwrap());
}

#[rstest]
fn wrong_encoding_fails(dir: TempDir, sample: Sample) {
    let path = write_sample(&dir, &sample, Encoding::Binary, "wrong");
    assert!(read_grid(&path, Encoding::Ascii).is_err());
}

#[rstest]
fn truncated_file_fails(dir: TempDir, sample: Sample) {
    let path = write_sample(&dir, &sample, Encoding::Binary, "truncated");
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();
    assert!(read_grid(&path, Encoding::Binary).is_err());
}
