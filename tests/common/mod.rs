#![allow(dead_code)]

use heliograph::body::Sun;
use heliograph::ephemeris::Ephemeris;
use heliograph::location::Location;
use heliograph::time::TimeOfInterest;

/// 2020-10-22 06:15:00 UT.
pub fn reference_time() -> TimeOfInterest {
    TimeOfInterest::from_time(2020, 10, 22, 6, 15, 0.0).unwrap()
}

/// Berlin, sea level.
pub fn berlin() -> Location {
    Location::at(52.519, 13.408).unwrap()
}

pub fn reference_sun() -> Ephemeris<Sun> {
    Ephemeris::new(Sun, reference_time())
}

/// Julian Day of a UTC clock time on the reference day.
pub fn reference_day_at(hour: u8, min: u8, sec: f64) -> f64 {
    TimeOfInterest::from_time(2020, 10, 22, hour, min, sec)
        .unwrap()
        .jd()
}

/// Assert that two Julian Days are within `seconds` of each other.
pub fn assert_within_seconds(actual: f64, expected: f64, seconds: f64) {
    let diff = (actual - expected).abs() * 86_400.0;
    assert!(
        diff <= seconds,
        "instants differ by {diff:.1} s (actual JD {actual}, expected JD {expected})"
    );
}

/// Route solver logs to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
