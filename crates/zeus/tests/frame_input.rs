//! Integration tests for reading a complete ZEUS frame from disk

use std::fs;
use std::path::Path;

use rstest::{fixture, rstest};
use tempfile::TempDir;
use zpolaris_zeus::{
    gaussian_factor, read_field, read_geometry, Axis, Error, Field, Frame, GhostMargin,
    GridGeometry, VELOCITY_FLOOR,
};

const GHOSTS: usize = 3;

/// Physical cells per axis (r, theta, phi)
const CELLS: [usize; 3] = [4, 2, 3];

fn write_array(dir: &Path, name: &str, values: &[f64]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    fs::write(dir.join(name), bytes).unwrap();
}

/// Coordinates plus every field of frame 12, with value `1000 i + 100 j + k`
/// at padded storage index (i, j, k)
#[fixture]
fn frame_dir() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    let axes = [Axis::Radius, Axis::Theta, Axis::Phi];
    for (axis, n) in axes.iter().zip(CELLS) {
        let edges: Vec<f64> = (0..n + 2 * GHOSTS).map(|i| 10.0 + i as f64).collect();
        let centres: Vec<f64> = edges.iter().map(|e| e + 0.5).collect();
        write_array(dir, axis.edge_file(), &edges);
        write_array(dir, axis.centre_file(), &centres);
    }

    let [n_r, n_th, n_ph] = CELLS;
    let (a, b, c) = (n_r + 2 * GHOSTS, n_ph + 2 * GHOSTS, n_th + 2 * GHOSTS);
    let mut volume = Vec::with_capacity(a * b * c);
    for k in 0..c {
        for j in 0..b {
            for i in 0..a {
                volume.push((1000 * i + 100 * j + k) as f64);
            }
        }
    }

    for field in Field::ALL {
        write_array(dir, &field.file_name(Frame::new(12)), &volume);
    }

    tmp
}

#[fixture]
fn geometry(frame_dir: TempDir) -> (TempDir, GridGeometry) {
    let geometry = read_geometry(frame_dir.path(), GhostMargin(GHOSTS)).unwrap();
    (frame_dir, geometry)
}

#[rstest]
fn geometry_from_coordinates(geometry: (TempDir, GridGeometry)) {
    let (_, geometry) = geometry;
    let shape = geometry.shape();

    assert_eq!([shape.n_r, shape.n_th, shape.n_ph], CELLS);
    assert_eq!(geometry.padded_shape(), [10, 9, 8]);
    assert_eq!(geometry.r.lower_bound(), 13.0);
    assert_eq!(geometry.r.upper_bound(), 17.0);
    assert_eq!(geometry.r.centres(), &[13.5, 14.5, 15.5, 16.5]);
    assert!(geometry.is_uniform(Axis::Theta));
}

#[rstest]
#[case(Field::Density, 1.0)]
#[case(Field::VelocityPhi, 1.0)]
#[case(Field::MagneticTheta, gaussian_factor())]
fn field_in_cell_order(geometry: (TempDir, GridGeometry), #[case] field: Field, #[case] scale: f64) {
    let (tmp, geometry) = geometry;
    let dir = tmp.path();
    let values = read_field(dir, field, Frame::new(12), &geometry).unwrap();
    assert_eq!(values.len(), geometry.number_of_cells());

    // r slowest, theta next, phi fastest
    let [n_r, n_th, n_ph] = CELLS;
    let mut cell = 0;
    for i in 0..n_r {
        for k in 0..n_th {
            for j in 0..n_ph {
                let stored = (1000 * (i + GHOSTS) + 100 * (j + GHOSTS) + (k + GHOSTS)) as f64;
                assert_eq!(values[cell], stored * scale);
                cell += 1;
            }
        }
    }
}

#[rstest]
fn no_zero_velocities(geometry: (TempDir, GridGeometry)) {
    let (tmp, geometry) = geometry;
    let dir = tmp.path();
    let zeros = vec![0.0; 10 * 9 * 8];
    write_array(dir, &Field::VelocityR.file_name(Frame::new(13)), &zeros);

    let values = read_field(dir, Field::VelocityR, Frame::new(13), &geometry).unwrap();
    assert!(values.iter().all(|v| *v == VELOCITY_FLOOR));
}

#[rstest]
fn missing_frame(geometry: (TempDir, GridGeometry)) {
    let (tmp, geometry) = geometry;
    let dir = tmp.path();
    let result = read_field(dir, Field::Density, Frame::new(99), &geometry);
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[rstest]
fn wrong_volume_size(geometry: (TempDir, GridGeometry)) {
    let (tmp, geometry) = geometry;
    let dir = tmp.path();
    write_array(dir, &Field::Density.file_name(Frame::new(14)), &[1.0; 100]);

    let result = read_field(dir, Field::Density, Frame::new(14), &geometry);
    assert!(matches!(
        result,
        Err(Error::UnexpectedLength {
            expected: 720,
            found: 100,
            ..
        })
    ));
}
