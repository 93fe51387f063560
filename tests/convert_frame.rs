//! End-to-end conversion of a synthetic ZEUS frame

use std::fs;
use std::path::Path;

use rstest::{fixture, rstest};
use tempfile::TempDir;
use zpolaris::polaris::{read_grid, Encoding, SPHERICAL_GRID_ID};
use zpolaris::zeus::{Field, Frame, GhostMargin};
use zpolaris::{convert_frame, ConversionConfig, Error};

/// Ghost cells on either side of every axis
const GHOSTS: usize = 3;

/// Padded length of every axis, 4 physical cells each
const PADDED: usize = 4 + 2 * GHOSTS;

const FRAME: Frame = Frame(7);

fn write_array(dir: &Path, name: &str, values: &[f64]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    fs::write(dir.join(name), bytes).unwrap();
}

/// Column-major volume with `1 + i + 10 j + 100 k` at storage index (r, phi, theta)
fn density_volume() -> Vec<f64> {
    let mut volume = Vec::with_capacity(PADDED.pow(3));
    for k in 0..PADDED {
        for j in 0..PADDED {
            for i in 0..PADDED {
                volume.push((1 + i + 10 * j + 100 * k) as f64);
            }
        }
    }
    volume
}

/// Coordinates and density of frame 7, no velocity or magnetic field
#[fixture]
fn frame_dir() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    // physical r edges are 1..4, closed by 5 at index len - 3
    let r = [0.25, 0.5, 0.75, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let th: Vec<f64> = (0..PADDED).map(|i| 0.25 * i as f64).collect();
    let ph: Vec<f64> = (0..PADDED).map(|i| 0.5 * i as f64).collect();
    for (name, edges) in [("x1", &r[..]), ("x2", &th[..]), ("x3", &ph[..])] {
        let centres: Vec<f64> = edges.iter().map(|e| e + 0.1).collect();
        write_array(dir, &format!("z_{name}ap"), edges);
        write_array(dir, &format!("z_{name}bp"), &centres);
    }

    write_array(dir, &Field::Density.file_name(FRAME), &density_volume());
    tmp
}

fn config(dir: &TempDir, encoding: Encoding) -> ConversionConfig {
    let mut config = ConversionConfig::new(FRAME);
    config.input_dir = dir.path().to_path_buf();
    config.output = dir.path().join("out").join("lmd2.4-1k-Slw_00007");
    config.margin = GhostMargin(GHOSTS);
    config.encoding = encoding;
    config.disable_progress = true;
    config
}

#[rstest]
#[case(Encoding::Binary, "dat")]
#[case(Encoding::Ascii, "txt")]
fn density_grid(frame_dir: TempDir, #[case] encoding: Encoding, #[case] extension: &str) {
    let path = convert_frame(&config(&frame_dir, encoding)).unwrap();
    assert_eq!(path.extension().unwrap(), extension);
    assert!(path
        .to_str()
        .unwrap()
        .ends_with(&format!("lmd2.4-1k-Slw_00007.{extension}")));

    let grid = read_grid(&path, encoding).unwrap();
    assert_eq!(grid.header.grid_id, SPHERICAL_GRID_ID);
    assert_eq!(grid.header.quantity_ids, vec![28, 29]);

    let geometry = &grid.geometry;
    assert_eq!((geometry.r_min, geometry.r_max), (1.0, 5.0));
    assert_eq!((geometry.n_r, geometry.n_ph, geometry.n_th), (4, 4, 4));
    assert_eq!(geometry.r_borders, vec![2.0, 3.0, 4.0]);
    assert_eq!(geometry.th_borders, vec![1.0, 1.25, 1.5]);
    assert_eq!(geometry.ph_borders, vec![2.0, 2.5, 3.0]);

    let records = grid.records();
    assert_eq!(records.len(), 64);
    assert_eq!(grid.number_of_records(), 65);

    // r slowest, theta next, phi fastest
    let expected = [(0, 334.0), (1, 344.0), (4, 434.0), (16, 335.0), (63, 667.0)];
    for (index, rho) in expected {
        assert_eq!(records[index].to_vec(), vec![rho, rho * 0.01]);
    }
    assert_eq!(grid.sentinel().to_vec(), vec![0.0, 0.0]);
}

#[rstest]
fn encodings_hold_same_grid(frame_dir: TempDir) {
    let binary = convert_frame(&config(&frame_dir, Encoding::Binary)).unwrap();
    let ascii = convert_frame(&config(&frame_dir, Encoding::Ascii)).unwrap();

    assert_eq!(
        read_grid(binary, Encoding::Binary).unwrap(),
        read_grid(ascii, Encoding::Ascii).unwrap()
    );
}

#[rstest]
fn velocity_and_magnetic_field(frame_dir: TempDir) {
    let cells = PADDED.pow(3);
    for field in [Field::VelocityR, Field::VelocityPhi, Field::VelocityTheta] {
        write_array(frame_dir.path(), &field.file_name(FRAME), &vec![0.0; cells]);
    }
    for field in [Field::MagneticR, Field::MagneticPhi, Field::MagneticTheta] {
        write_array(frame_dir.path(), &field.file_name(FRAME), &vec![1.0; cells]);
    }

    let mut config = config(&frame_dir, Encoding::Binary);
    config.include_velocity = true;
    config.include_magnetic = true;

    let grid = read_grid(convert_frame(&config).unwrap(), Encoding::Binary).unwrap();
    assert_eq!(grid.header.quantity_ids, vec![28, 29, 4, 5, 6, 7, 8, 9]);

    let b = (4.0 * std::f64::consts::PI).sqrt();
    let first = grid.records()[0].to_vec();
    assert_eq!(first[2..5], [b, b, b]);
    assert_eq!(first[5..], [1e-5, 1e-5, 1e-5]);
    assert_eq!(grid.sentinel().len(), 8);
}

#[rstest]
fn constant_density(frame_dir: TempDir) {
    let mut config = config(&frame_dir, Encoding::Ascii);
    config.constant_density = Some(2.5);
    config.dust_to_gas = 0.5;

    let grid = read_grid(convert_frame(&config).unwrap(), Encoding::Ascii).unwrap();
    assert!(grid.records().iter().all(|r| r.to_vec() == vec![2.5, 1.25]));
}

#[rstest]
fn missing_field_is_reported(frame_dir: TempDir) {
    let mut config = config(&frame_dir, Encoding::Binary);
    config.include_velocity = true;

    let result = convert_frame(&config);
    assert!(matches!(result, Err(Error::ZeusError(_))));
    assert!(!config.output_path().exists());
}

#[rstest]
fn missing_coordinates_are_reported(frame_dir: TempDir) {
    fs::remove_file(frame_dir.path().join("z_x3ap")).unwrap();
    let result = convert_frame(&config(&frame_dir, Encoding::Ascii));
    assert!(matches!(result, Err(Error::ZeusError(_))));
}

#[rstest]
fn unwritable_output_is_explained(frame_dir: TempDir) {
    let blocker = frame_dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();

    let mut config = config(&frame_dir, Encoding::Ascii);
    config.output = blocker.join("grid");

    let error = convert_frame(&config).unwrap_err();
    assert!(matches!(error, Error::OutputDirectory { .. }));

    // operation, path and the reason from the operating system
    let message = error.chain();
    assert!(message.starts_with("[convert_frame]"));
    assert!(message.contains("blocker"));
    assert!(message.len() > error.to_string().len());
}
