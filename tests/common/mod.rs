#![allow(dead_code)]

use std::fs::File;

use approx::assert_abs_diff_eq;
use skyframe::catalog::{read_csv_catalog, read_json_catalog, StarRecord};
use skyframe::constants::Degree;
use skyframe::ref_system::Direction;

/// 2024 March equinox, 03:06 UTC.
pub const EQUINOX_2024: f64 = 1_710_903_960.0;

pub fn assert_direction_close(actual: &Direction, expected: &Direction, epsilon: f64) {
    assert_abs_diff_eq!(actual.x(), expected.x(), epsilon = epsilon);
    assert_abs_diff_eq!(actual.y(), expected.y(), epsilon = epsilon);
    assert_abs_diff_eq!(actual.z(), expected.z(), epsilon = epsilon);
}

/// Smallest difference between two angles in degrees, wrap-around included.
pub fn angle_diff(a: Degree, b: Degree) -> Degree {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

pub fn json_catalog() -> Vec<StarRecord> {
    let file = File::open("tests/data/bright_stars.json").expect("test catalog is present");
    read_json_catalog(file).expect("test catalog is valid")
}

pub fn csv_catalog() -> Vec<StarRecord> {
    let file = File::open("tests/data/bright_stars.csv").expect("test catalog is present");
    read_csv_catalog(file).expect("test catalog is valid")
}
