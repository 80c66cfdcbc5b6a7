//! # Distance and angular size
//!
//! Small closed-form helpers turning a radius vector into observable quantities.
use crate::constants::{AstronomicalUnit, Degree, Kilometer, Seconds, AU, VLIGHT};
use crate::heliograph_errors::HeliographError;

/// Distance in kilometers for a radius vector in AU.
pub fn distance_km(radius_vector: AstronomicalUnit) -> Kilometer {
    radius_vector * AU
}

/// Time taken by light to travel a distance, in seconds.
pub fn light_time_seconds(distance: Kilometer) -> Seconds {
    distance / VLIGHT
}

/// Angular diameter of a sphere, in degrees.
///
/// Arguments
/// ---------
/// * `distance`: distance to the center of the body, in kilometers.
/// * `diameter`: linear diameter of the body, in kilometers.
///
/// Return
/// ------
/// * `2·atan(d / 2Δ)` in degrees, or [`HeliographError::InvalidCoordinate`] when the
///   distance is not strictly positive.
pub fn angular_diameter(distance: Kilometer, diameter: Kilometer) -> Result<Degree, HeliographError> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(HeliographError::InvalidCoordinate(format!(
            "distance must be strictly positive to compute an angular diameter, got {distance}"
        )));
    }
    Ok(2.0 * (diameter / (2.0 * distance)).atan().to_degrees())
}

#[cfg(test)]
mod observation_test {
    use super::*;
    use crate::constants::DIAMETER_SUN;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_distance_and_light_time() {
        let d = distance_km(0.99514386);
        assert_relative_eq!(d, 148871402.78, epsilon = 1.0);
        // 0h 8m 16.58s
        assert_relative_eq!(light_time_seconds(d), 496.58, epsilon = 0.01);
    }

    #[test]
    fn test_reference_angular_diameter() {
        let delta = angular_diameter(148871402.777339, DIAMETER_SUN).unwrap();
        // 0° 32′ 09.582″
        assert_relative_eq!(delta * 3600.0, 1929.582, epsilon = 1e-3);
    }

    #[test]
    fn test_angular_diameter_rejects_null_distance() {
        assert!(angular_diameter(0.0, DIAMETER_SUN).is_err());
        assert!(angular_diameter(f64::NAN, DIAMETER_SUN).is_err());
    }
}
