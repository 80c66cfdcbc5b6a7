//! # Observer location
//!
//! A [`Location`] is an immutable geodetic position on the WGS84 ellipsoid: latitude,
//! east-positive longitude (degrees) and elevation above the ellipsoid (meters).
//!
//! Ranges are checked once in [`Location::new`]; every downstream computation can
//! then rely on them. The elevation only enters the diurnal parallax through
//! [`Location::parallax_terms`].
use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Meter, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU, RADEG};
use crate::heliograph_errors::HeliographError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    lat: Degree,
    lon: Degree,
    elevation: Meter,
}

impl Location {
    /// Create a validated observer location.
    ///
    /// Arguments
    /// ---------
    /// * `lat`: geodetic latitude in degrees, in `[−90, 90]`.
    /// * `lon`: longitude in degrees, east positive, in `[−180, 180]`.
    /// * `elevation`: height above the ellipsoid in meters.
    ///
    /// Return
    /// ------
    /// * The location, or [`HeliographError::InvalidLocation`] when a value is out of range
    ///   or not finite.
    pub fn new(lat: Degree, lon: Degree, elevation: Meter) -> Result<Self, HeliographError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(HeliographError::InvalidLocation(format!(
                "latitude must be in [-90, 90], got {lat}"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(HeliographError::InvalidLocation(format!(
                "longitude must be in [-180, 180], got {lon}"
            )));
        }
        if !elevation.is_finite() {
            return Err(HeliographError::InvalidLocation(format!(
                "elevation must be finite, got {elevation}"
            )));
        }
        Ok(Self {
            lat,
            lon,
            elevation,
        })
    }

    /// Location at sea level.
    pub fn at(lat: Degree, lon: Degree) -> Result<Self, HeliographError> {
        Self::new(lat, lon, 0.0)
    }

    pub fn latitude(&self) -> Degree {
        self.lat
    }

    pub fn longitude(&self) -> Degree {
        self.lon
    }

    pub fn elevation(&self) -> Meter {
        self.elevation
    }

    /// Geocentric parallax terms `(ρ cos φ′, ρ sin φ′)` in Earth equatorial radii.
    ///
    /// `φ′` is the geocentric latitude and `ρ` the distance to the Earth center. The reduced
    /// latitude `u = atan(b/a · tan φ)` accounts for the flattening of the ellipsoid:
    ///
    /// ```text
    /// ρ sin φ′ = (b/a) sin u + (h/a) sin φ
    /// ρ cos φ′ = cos u + (h/a) cos φ
    /// ```
    pub fn parallax_terms(&self) -> (f64, f64) {
        let lat = self.lat * RADEG;
        let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

        let u = (lat.sin() * axis_ratio).atan2(lat.cos());
        let rho_sin_phi = axis_ratio * u.sin() + (self.elevation / EARTH_MAJOR_AXIS) * lat.sin();
        let rho_cos_phi = u.cos() + (self.elevation / EARTH_MAJOR_AXIS) * lat.cos();

        (rho_cos_phi, rho_sin_phi)
    }

    /// Geocentric equatorial position of the observer, in AU, for a local sidereal time.
    ///
    /// Arguments
    /// ---------
    /// * `local_sidereal_time`: local apparent sidereal time in degrees.
    pub fn geocentric_position(&self, local_sidereal_time: Degree) -> Vector3<f64> {
        let (rho_cos_phi, rho_sin_phi) = self.parallax_terms();
        let lst = local_sidereal_time * RADEG;
        Vector3::new(
            rho_cos_phi * lst.cos(),
            rho_cos_phi * lst.sin(),
            rho_sin_phi,
        ) * ERAU
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{} {:.4}°{} {:.0} m",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew,
            self.elevation
        )
    }
}
