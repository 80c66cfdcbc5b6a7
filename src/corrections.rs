//! # Apparent-position corrections
//!
//! Turns geometric positions into apparent ones:
//!
//! - [`correct_aberration`]: annual aberration in ecliptic coordinates (Meeus, ch. 23),
//! - [`correct_nutation`]: nutation in longitude Δψ added to the ecliptic longitude,
//! - [`correct_refraction`]: mean atmospheric refraction added to a geometric altitude
//!   (Sæmundsson's formula, Meeus ch. 16).
//!
//! Aberration and nutation only depend on `T`. The nutation in obliquity is not applied
//! here: it is carried by the true obliquity used when rotating apparent coordinates into
//! the equatorial frame (see [`crate::earth_orientation::true_obliquity`]).
//!
//! The rise/set solver does not use [`correct_refraction`]: refraction is part of the
//! standard altitude it targets.
use crate::constants::{ArcSec, Degree, ARCSEC_TO_DEG, RADEG};
use crate::coordinates::{normalize_angle, EclipticSphericalCoordinates};
use crate::earth_orientation::nutation;
use crate::heliograph_errors::HeliographError;

/// Constant of aberration κ.
pub const ABERRATION_CONSTANT: ArcSec = 20.49552;

/// Below this geometric altitude the refraction formula is not used.
const REFRACTION_MIN_ALTITUDE: Degree = -1.9;

/// Geometric true longitude of the Sun (Meeus 25.2 to 25.4), in degrees.
fn sun_true_longitude(t: f64) -> Degree {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t) * RADEG;
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    normalize_angle(l0 + c)
}

/// Correct ecliptic coordinates for the annual aberration.
///
/// Arguments
/// ---------
/// * `coords`: geocentric ecliptic coordinates of date.
/// * `t`: Julian centuries since J2000.0.
///
/// Return
/// ------
/// * The coordinates displaced by
///
/// ```text
/// Δλ = (−κ cos(☉ − λ) + e κ cos(π − λ)) / cos β
/// Δβ = −κ sin β (sin(☉ − λ) − e sin(π − λ))
/// ```
///
/// where ☉ is the true longitude of the Sun, `e` the eccentricity of the Earth's orbit and
/// `π` the longitude of its perihelion.
pub fn correct_aberration(
    coords: &EclipticSphericalCoordinates,
    t: f64,
) -> Result<EclipticSphericalCoordinates, HeliographError> {
    coords.validate()?;

    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let pi = (102.93735 + 1.71946 * t + 0.00046 * t * t) * RADEG;
    let sun = sun_true_longitude(t) * RADEG;

    let lon = coords.lon * RADEG;
    let lat = coords.lat * RADEG;
    let kappa = ABERRATION_CONSTANT;

    let dlon = (-kappa * (sun - lon).cos() + e * kappa * (pi - lon).cos()) / lat.cos();
    let dlat = -kappa * lat.sin() * ((sun - lon).sin() - e * (pi - lon).sin());

    Ok(EclipticSphericalCoordinates {
        lon: normalize_angle(coords.lon + dlon * ARCSEC_TO_DEG),
        lat: coords.lat + dlat * ARCSEC_TO_DEG,
        radius_vector: coords.radius_vector,
    })
}

/// Add the nutation in longitude Δψ to an ecliptic longitude.
pub fn correct_nutation(
    coords: &EclipticSphericalCoordinates,
    t: f64,
) -> Result<EclipticSphericalCoordinates, HeliographError> {
    coords.validate()?;
    let (dpsi, _) = nutation(t);
    Ok(EclipticSphericalCoordinates {
        lon: normalize_angle(coords.lon + dpsi * ARCSEC_TO_DEG),
        lat: coords.lat,
        radius_vector: coords.radius_vector,
    })
}

/// Atmospheric refraction for a geometric altitude, in degrees.
///
/// Sæmundsson: `R = 1.02 / tan(h + 10.3 / (h + 5.11))` arc minutes, for a pressure of
/// 1010 mbar and 10 °C. Returns 0 below −1.9°, where the body is well below the horizon.
pub fn refraction(altitude: Degree) -> Degree {
    if altitude < REFRACTION_MIN_ALTITUDE {
        return 0.0;
    }
    let arg = (altitude + 10.3 / (altitude + 5.11)) * RADEG;
    1.02 / arg.tan() / 60.0
}

/// Apparent altitude of a body seen through the atmosphere.
pub fn correct_refraction(altitude: Degree) -> Degree {
    (altitude + refraction(altitude)).min(90.0)
}

#[cfg(test)]
mod corrections_test {
    use super::*;
    use approx::assert_relative_eq;

    const T_REFERENCE: f64 = 0.20807010038785795;

    #[test]
    fn test_reference_apparent_longitude() {
        let date = EclipticSphericalCoordinates::new(209.31555315, -0.00014017, 0.99514386)
            .unwrap();
        let aberrated = correct_aberration(&date, T_REFERENCE).unwrap();
        let apparent = correct_nutation(&aberrated, T_REFERENCE).unwrap();

        assert_relative_eq!(apparent.lon, 209.30479579, epsilon = 1e-5);
        assert_relative_eq!(apparent.lat, -0.00014017, epsilon = 1e-8);
        assert_eq!(apparent.radius_vector, date.radius_vector);
    }

    #[test]
    fn test_aberration_of_the_sun_is_about_kappa() {
        // for the Sun itself λ = ☉, the displacement is ≈ −κ/R
        let lon = sun_true_longitude(T_REFERENCE);
        let coords = EclipticSphericalCoordinates::new(lon, 0.0, 1.0).unwrap();
        let corrected = correct_aberration(&coords, T_REFERENCE).unwrap();
        let shift = (corrected.lon - lon) * 3600.0;
        assert!(shift < -20.0 && shift > -21.0, "shift = {shift}");
        assert_eq!(corrected.lat, 0.0);
    }

    #[test]
    fn test_nutation_wraps_longitude() {
        let coords = EclipticSphericalCoordinates::new(0.001, 0.0, 1.0).unwrap();
        let corrected = correct_nutation(&coords, T_REFERENCE).unwrap();
        // Δψ ≈ −18″ pushes the longitude across 0°
        assert!(corrected.lon > 359.99);
    }

    #[test]
    fn test_refraction() {
        // about 29′ on the horizon
        assert_relative_eq!(refraction(0.0), 0.4830, epsilon = 1e-4);
        assert_relative_eq!(
            correct_refraction(3.4314),
            3.6410,
            epsilon = 1e-3
        );
        assert!(refraction(45.0) < 0.02);
        assert_eq!(refraction(-5.0), 0.0);
        assert_eq!(correct_refraction(-5.0), -5.0);
    }
}
