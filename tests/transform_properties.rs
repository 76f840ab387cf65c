use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skyframe::constants::{DEFAULT_MAX_SIZE, DPI, SIDEREAL_DAY_SECONDS};
use skyframe::conversion::{parse_catalog_dec, parse_catalog_ra};
use skyframe::magnitude::MagnitudeScaler;
use skyframe::ref_system::to_direction;
use skyframe::skyframe_errors::SkyframeError;
use skyframe::solar_ephemeris::sun_direction;
use skyframe::time::{parse_instant, sidereal_angle};

mod common;
use common::{angle_diff, EQUINOX_2024};

const SAMPLES: usize = 5_000;

#[test]
fn catalog_ra_is_monotonic_in_time_of_day() {
    let mut rng = StdRng::seed_from_u64(42);

    // time of day in tenths of seconds, so the formatted text is exact
    let mut ticks: Vec<u32> = (0..SAMPLES)
        .map(|_| rng.random_range(0..24 * 3600 * 10))
        .collect();
    ticks.sort_unstable();
    ticks.dedup();

    let parsed: Vec<f64> = ticks
        .iter()
        .map(|&t| {
            let (h, rest) = (t / 36_000, t % 36_000);
            let (m, tenths) = (rest / 600, rest % 600);
            let text = format!("{h:02}h {m:02}m {:02}.{}s", tenths / 10, tenths % 10);
            parse_catalog_ra(&text).unwrap()
        })
        .collect();

    assert!(parsed.iter().all(|ra| (0.0..360.0).contains(ra)));
    assert!(parsed.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn catalog_reference_values() {
    assert_abs_diff_eq!(
        parse_catalog_ra("00h 04m 36.7s").unwrap(),
        1.152_916_666_666_7,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        parse_catalog_dec("+42° 05′ 32″").unwrap(),
        42.092_222_222_2,
        epsilon = 1e-9
    );
    assert!(matches!(
        parse_catalog_ra("00:04:36.7"),
        Err(SkyframeError::Format(_))
    ));
}

#[test]
fn directions_are_unit_vectors() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let ra = rng.random_range(0.0..360.0);
        let dec = rng.random_range(-90.0..=90.0);
        let direction = to_direction(ra, dec).unwrap();
        assert_abs_diff_eq!(direction.as_unit().norm(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn non_finite_angles_are_rejected() {
    for (ra, dec) in [
        (f64::NAN, 0.0),
        (0.0, f64::NAN),
        (f64::INFINITY, 10.0),
        (10.0, f64::NEG_INFINITY),
    ] {
        assert!(matches!(
            to_direction(ra, dec),
            Err(SkyframeError::InvalidAngle(_))
        ));
    }
}

#[test]
fn direction_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..SAMPLES {
        let ra = rng.random_range(0.0..360.0);
        let dec = rng.random_range(-89.9..89.9);
        let (ra_back, dec_back) = to_direction(ra, dec).unwrap().to_radec();
        assert!(angle_diff(ra, ra_back) < 1e-6, "ra {ra} came back as {ra_back}");
        assert_abs_diff_eq!(dec, dec_back, epsilon = 1e-6);
    }
}

#[test]
fn sidereal_angle_is_periodic() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..SAMPLES {
        let t = rng.random_range(-2.0e9..4.0e9);
        let a = sidereal_angle(t);
        let b = sidereal_angle(t + SIDEREAL_DAY_SECONDS);
        assert!((-DPI..=0.0).contains(&a));

        let d = (a - b).rem_euclid(DPI);
        assert!(d.min(DPI - d) < 1e-6, "t = {t}: {a} vs {b}");
    }
}

#[test]
fn sidereal_angle_is_continuous_across_epoch() {
    let before = sidereal_angle(-1.0);
    let after = sidereal_angle(1.0);
    let d = (before - after).rem_euclid(DPI);
    assert!(d.min(DPI - d) < 1e-3);
}

#[test]
fn size_is_decreasing_and_bounded() {
    let scaler = MagnitudeScaler::default();
    let mut rng = StdRng::seed_from_u64(99);

    let mut vmags: Vec<f64> = (0..SAMPLES)
        .map(|_| (rng.random_range(-3000..=3000) as f64) / 100.0)
        .collect();
    vmags.sort_by(|a, b| a.total_cmp(b));
    vmags.dedup();

    let sizes: Vec<f64> = vmags
        .iter()
        .map(|&v| scaler.size_for_magnitude(v).unwrap())
        .collect();
    assert!(sizes.iter().all(|&s| s > 0.0 && s < DEFAULT_MAX_SIZE));
    assert!(sizes.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn sun_near_equator_at_equinox() {
    let instant = parse_instant("2024-03-20T03:06:00").unwrap();
    assert_eq!(instant, EQUINOX_2024);

    let (_, dec) = sun_direction(instant).unwrap().to_radec();
    assert!(dec.abs() < 0.3, "solar declination at equinox was {dec}");
}
