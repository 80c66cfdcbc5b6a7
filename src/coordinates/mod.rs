//! # Coordinate types
//!
//! Plain value types for the positions produced by the crate, one per frame family:
//!
//! | Type | Components | Units |
//! |------|------------|-------|
//! | [`RectangularCoordinates`] | `x`, `y`, `z` | AU |
//! | [`EclipticSphericalCoordinates`] | `lon` ∈ [0, 360), `lat` ∈ [−90, 90], `radius_vector` | °, °, AU |
//! | [`EquatorialSphericalCoordinates`] | `right_ascension` ∈ [0, 360), `declination` ∈ [−90, 90], `radius_vector` | °, °, AU |
//! | [`HorizontalCoordinates`] | `azimuth` ∈ [0, 360) from north through east, `altitude` ∈ [−90, 90], `radius_vector` | °, °, AU |
//!
//! The frame (heliocentric/geocentric, J2000/date) is implied by the producing query.
//! Values are created fresh by every query and never mutated afterwards.
//!
//! The checked constructors (`new`) normalise the longitude-like component and reject
//! malformed values with [`HeliographError::InvalidCoordinate`].
//!
//! ## See also
//! * [`conversion`] – the frame converter working on these types.
pub mod conversion;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{AstronomicalUnit, Degree};
use crate::heliograph_errors::HeliographError;

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: Degree) -> Degree {
    let a = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Normalize an angle in degrees into `[−180, 180)`.
pub fn normalize_angle_180(angle: Degree) -> Degree {
    normalize_angle(angle + 180.0) - 180.0
}

fn check_finite(name: &str, value: f64) -> Result<(), HeliographError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HeliographError::InvalidCoordinate(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

fn check_latitude(name: &str, value: Degree) -> Result<(), HeliographError> {
    check_finite(name, value)?;
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(HeliographError::InvalidCoordinate(format!(
            "{name} must be in [-90, 90], got {value}"
        )))
    }
}

fn check_radius(value: AstronomicalUnit) -> Result<(), HeliographError> {
    check_finite("radius vector", value)?;
    if value < 0.0 {
        return Err(HeliographError::InvalidCoordinate(format!(
            "radius vector must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Cartesian position in astronomical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectangularCoordinates {
    pub x: AstronomicalUnit,
    pub y: AstronomicalUnit,
    pub z: AstronomicalUnit,
}

impl RectangularCoordinates {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Euclidean distance to the origin.
    pub fn norm(&self) -> AstronomicalUnit {
        self.as_vector().norm()
    }
}

/// Ecliptic longitude, latitude and radius vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EclipticSphericalCoordinates {
    pub lon: Degree,
    pub lat: Degree,
    pub radius_vector: AstronomicalUnit,
}

impl EclipticSphericalCoordinates {
    /// Checked constructor, the longitude is normalized into `[0, 360)`.
    pub fn new(
        lon: Degree,
        lat: Degree,
        radius_vector: AstronomicalUnit,
    ) -> Result<Self, HeliographError> {
        check_finite("ecliptic longitude", lon)?;
        check_latitude("ecliptic latitude", lat)?;
        check_radius(radius_vector)?;
        Ok(Self {
            lon: normalize_angle(lon),
            lat,
            radius_vector,
        })
    }

    /// Check the invariants of a value built field by field.
    pub fn validate(&self) -> Result<(), HeliographError> {
        check_finite("ecliptic longitude", self.lon)?;
        check_latitude("ecliptic latitude", self.lat)?;
        check_radius(self.radius_vector)
    }
}

/// Right ascension, declination and radius vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquatorialSphericalCoordinates {
    pub right_ascension: Degree,
    pub declination: Degree,
    pub radius_vector: AstronomicalUnit,
}

impl EquatorialSphericalCoordinates {
    /// Checked constructor, the right ascension is normalized into `[0, 360)`.
    pub fn new(
        right_ascension: Degree,
        declination: Degree,
        radius_vector: AstronomicalUnit,
    ) -> Result<Self, HeliographError> {
        check_finite("right ascension", right_ascension)?;
        check_latitude("declination", declination)?;
        check_radius(radius_vector)?;
        Ok(Self {
            right_ascension: normalize_angle(right_ascension),
            declination,
            radius_vector,
        })
    }

    pub fn validate(&self) -> Result<(), HeliographError> {
        check_finite("right ascension", self.right_ascension)?;
        check_latitude("declination", self.declination)?;
        check_radius(self.radius_vector)
    }
}

/// Azimuth (from north, through east), altitude and radius vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HorizontalCoordinates {
    pub azimuth: Degree,
    pub altitude: Degree,
    pub radius_vector: AstronomicalUnit,
}

impl HorizontalCoordinates {
    pub fn new(
        azimuth: Degree,
        altitude: Degree,
        radius_vector: AstronomicalUnit,
    ) -> Result<Self, HeliographError> {
        check_finite("azimuth", azimuth)?;
        check_latitude("altitude", altitude)?;
        check_radius(radius_vector)?;
        Ok(Self {
            azimuth: normalize_angle(azimuth),
            altitude,
            radius_vector,
        })
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-10.0), 350.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(-1e-20), 0.0);
        assert_eq!(normalize_angle_180(190.0), -170.0);
        assert_eq!(normalize_angle_180(-190.0), 170.0);
        assert_eq!(normalize_angle_180(45.0), 45.0);
    }

    #[test]
    fn test_checked_constructors() {
        let c = EclipticSphericalCoordinates::new(-30.0, 10.0, 1.0).unwrap();
        assert_eq!(c.lon, 330.0);

        assert!(EclipticSphericalCoordinates::new(10.0, 91.0, 1.0).is_err());
        assert_eq!(
            EquatorialSphericalCoordinates::new(10.0, 0.0, -1.0),
            Err(HeliographError::InvalidCoordinate(
                "radius vector must be non-negative, got -1".into()
            ))
        );
        assert!(HorizontalCoordinates::new(f64::NAN, 0.0, 1.0).is_err());

        let bad = EclipticSphericalCoordinates {
            lon: 0.0,
            lat: 0.0,
            radius_vector: -0.5,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_rectangular_vector_round_trip() {
        let r = RectangularCoordinates::new(1.0, -2.0, 2.0);
        assert_eq!(RectangularCoordinates::from_vector(&r.as_vector()), r);
        assert_eq!(r.norm(), 3.0);
    }
}
