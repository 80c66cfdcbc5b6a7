//! # Sexagesimal formatting and parsing
//!
//! Human readable renderings of the quantities produced by the
//! [`Ephemeris`](crate::ephemeris::Ephemeris):
//!
//! - [`deg_to_angle_string`]: `0.535995°` → `0° 32' 09.582"`,
//! - [`sec_to_time_string`]: `496.58 s` → `0h 8m 16.58s`,
//!
//! and the parsers reading such values back, together with the accuracy implied by the
//! number of decimals written in the last field.
use crate::constants::{ArcSec, Degree, Seconds};
use crate::heliograph_errors::HeliographError;

/// Format an angle as degrees, arcminutes and arcseconds with millisecond precision.
///
/// Rounding is done on the total number of milli-arcseconds so that a carry never prints
/// `60.000"`.
///
/// Arguments
/// ---------
/// * `angle`: the angle in degrees, may be negative.
///
/// Return
/// ------
/// * A string such as `0° 32' 09.582"` or `-11° 13' 33.384"`.
pub fn deg_to_angle_string(angle: Degree) -> String {
    let sign = if angle < 0.0 { "-" } else { "" };
    let total = (angle.abs() * 3_600_000.0).round() as u64;
    let degrees = total / 3_600_000;
    let minutes = (total / 60_000) % 60;
    let millis = total % 60_000;
    format!(
        "{sign}{degrees}° {minutes:02}' {:02}.{:03}\"",
        millis / 1000,
        millis % 1000
    )
}

/// Format a duration as hours, minutes and seconds with centisecond precision.
///
/// Arguments
/// ---------
/// * `seconds`: the duration, may be negative.
///
/// Return
/// ------
/// * A string such as `0h 8m 16.58s`.
pub fn sec_to_time_string(seconds: Seconds) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = (seconds.abs() * 100.0).round() as u64;
    let hours = total / 360_000;
    let minutes = (total / 6_000) % 60;
    let centis = total % 6_000;
    format!(
        "{sign}{hours}h {minutes}m {}.{:02}s",
        centis / 100,
        centis % 100
    )
}

/// Accuracy of a numeric field from its number of decimals, scaled by `factor`.
fn compute_accuracy(field: &str, factor: f64) -> f64 {
    let field = field.trim();
    match field.find('.') {
        Some(dot_pos) => {
            let digits_after_dot = field.len() - dot_pos - 1;
            10f64.powi(-(digits_after_dot as i32)) * factor
        }
        None => factor,
    }
}

/// Split a sexagesimal string into its three fields, dropping the unit symbols.
fn sexagesimal_fields(input: &str) -> Result<[String; 3], HeliographError> {
    let cleaned: String = input
        .chars()
        .map(|c| match c {
            '°' | '\'' | '"' | 'h' | 'm' | 's' | ':' => ' ',
            c => c,
        })
        .collect();
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    match parts.as_slice() {
        [a, b, c] => Ok([a.to_string(), b.to_string(), c.to_string()]),
        _ => Err(HeliographError::InvalidCoordinate(format!(
            "expected three sexagesimal fields, got {input:?}"
        ))),
    }
}

fn parse_field(field: &str, input: &str) -> Result<f64, HeliographError> {
    field.parse().map_err(|_| {
        HeliographError::InvalidCoordinate(format!("malformed sexagesimal field {field:?} in {input:?}"))
    })
}

/// Parse a signed angle written as degrees, arcminutes and arcseconds.
///
/// Both `-11 13 33.38` and `-11° 13' 33.38"` are accepted.
///
/// Return
/// ------
/// * The angle in degrees and the accuracy implied by the last field, in degrees.
pub fn parse_angle_to_deg(angle: &str) -> Result<(Degree, ArcSec), HeliographError> {
    let [d_raw, m_raw, s_raw] = sexagesimal_fields(angle)?;

    let sign = if d_raw.starts_with('-') { -1.0 } else { 1.0 };
    let d = parse_field(d_raw.trim_start_matches(['-', '+']), angle)?;
    let m = parse_field(&m_raw, angle)?;
    let s = parse_field(&s_raw, angle)?;

    let deg = sign * (d + m / 60.0 + s / 3600.0);
    Ok((deg, compute_accuracy(&s_raw, 1.0 / 3600.0)))
}

/// Parse a right ascension written as hours, minutes and seconds of time.
///
/// Both `13 49 00.97` and `13h 49m 00.97s` are accepted.
///
/// Return
/// ------
/// * The right ascension in degrees and the accuracy implied by the last field, in degrees.
pub fn parse_hms_to_deg(ra: &str) -> Result<(Degree, ArcSec), HeliographError> {
    let [h_raw, m_raw, s_raw] = sexagesimal_fields(ra)?;

    let h = parse_field(&h_raw, ra)?;
    let m = parse_field(&m_raw, ra)?;
    let s = parse_field(&s_raw, ra)?;

    let deg = (h + m / 60.0 + s / 3600.0) * 15.0;
    Ok((deg, compute_accuracy(&s_raw, 15.0 / 3600.0)))
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_to_angle_string() {
        assert_eq!(deg_to_angle_string(1929.582 / 3600.0), "0° 32' 09.582\"");
        assert_eq!(deg_to_angle_string(-11.22593849), "-11° 13' 33.379\"");
        assert_eq!(deg_to_angle_string(0.0), "0° 00' 00.000\"");
        assert_eq!(deg_to_angle_string(29.9999999999), "30° 00' 00.000\"");
    }

    #[test]
    fn test_sec_to_time_string() {
        assert_eq!(sec_to_time_string(496.58), "0h 8m 16.58s");
        assert_eq!(sec_to_time_string(3725.0), "1h 2m 5.00s");
        assert_eq!(sec_to_time_string(-59.999), "-0h 1m 0.00s");
    }

    #[test]
    fn test_parse_angle_to_deg() {
        let (deg, acc) = parse_angle_to_deg("-00 30 14.2").unwrap();
        assert_relative_eq!(deg, -0.5039444444444444, epsilon = 1e-12);
        assert_relative_eq!(acc, 2.777777777777778e-5, epsilon = 1e-15);

        let (deg, acc) = parse_angle_to_deg("0° 32' 09.582\"").unwrap();
        assert_relative_eq!(deg, 1929.582 / 3600.0, epsilon = 1e-12);
        assert_relative_eq!(acc, 1e-3 / 3600.0, epsilon = 1e-15);

        let (deg, _) = parse_angle_to_deg("+13 55 42.7").unwrap();
        assert_relative_eq!(deg, 13.928527777777777, epsilon = 1e-12);

        assert!(parse_angle_to_deg("89 15 50.2.3").is_err());
        assert!(parse_angle_to_deg("89 15").is_err());
    }

    #[test]
    fn test_parse_hms_to_deg() {
        let (deg, _) = parse_hms_to_deg("22 52 23.37").unwrap();
        assert_relative_eq!(deg, 343.097375, epsilon = 1e-9);
        let (deg, acc) = parse_hms_to_deg("13h 49m 00.970s").unwrap();
        assert_relative_eq!(deg, (13.0 + 49.0 / 60.0 + 0.97 / 3600.0) * 15.0, epsilon = 1e-9);
        assert_relative_eq!(acc, 15.0e-3 / 3600.0, epsilon = 1e-15);
        assert!(parse_hms_to_deg("1 2").is_err());
    }

    #[test]
    fn test_round_trip_formatting() {
        let angle = -11.22593849;
        let (parsed, acc) = parse_angle_to_deg(&deg_to_angle_string(angle)).unwrap();
        assert!((parsed - angle).abs() <= acc);
    }
}
