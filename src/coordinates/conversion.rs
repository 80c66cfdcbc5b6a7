//! # Frame converter
//!
//! Pure functions moving positions between the frames used by the crate.
//!
//! ## Overview
//!
//! - rectangular ↔ spherical ([`spherical_to_rectangular`], [`rectangular_to_spherical`])
//! - ecliptic ↔ equatorial, a rotation by the obliquity ε about the equinox direction
//!   ([`ecliptic_to_equatorial`], [`equatorial_to_ecliptic`])
//! - heliocentric → geocentric ([`heliocentric_to_geocentric`], [`earth_to_sun_geocentric`])
//! - geocentric → topocentric, diurnal parallax ([`geocentric_to_topocentric`])
//! - equatorial → horizontal ([`equatorial_to_horizontal`])
//!
//! Angles in and out are in degrees, distances in AU. Rotations are built with
//! [`nalgebra::Rotation3`] and angles are recovered with `atan2`, which keeps the quadrant
//! of the right ascension and longitude.
//!
//! ## Conventions
//!
//! - Longitudes are east positive.
//! - Azimuth is measured from the north, through the east (north = 0°, east = 90°).
use nalgebra::{Rotation3, Vector3};

use crate::constants::{Degree, RADEG};
use crate::coordinates::{
    normalize_angle, EclipticSphericalCoordinates, EquatorialSphericalCoordinates,
    HorizontalCoordinates, RectangularCoordinates,
};
use crate::heliograph_errors::HeliographError;
use crate::location::Location;

/// Rotation about the x axis, in the direct sense, by an angle in degrees.
fn rotation_x(angle: Degree) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle * RADEG)
}

/// Unit vector pointing to a longitude-like and latitude-like pair of angles.
fn unit_vector(lon: Degree, lat: Degree) -> Vector3<f64> {
    let (sin_lon, cos_lon) = (lon * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (lat * RADEG).sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Longitude-like angle, latitude-like angle and norm of a vector.
///
/// A null vector gives `(0, 0, 0)`; a vector along the polar axis gets a longitude of 0.
fn vector_angles(v: &Vector3<f64>) -> (Degree, Degree, f64) {
    let norm = v.norm();
    if norm == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let lat = (v.z / norm).clamp(-1.0, 1.0).asin().to_degrees();
    let lon = if v.x == 0.0 && v.y == 0.0 {
        0.0
    } else {
        normalize_angle(v.y.atan2(v.x).to_degrees())
    };
    (lon, lat, norm)
}

/// Convert ecliptic spherical coordinates into rectangular coordinates.
///
/// `x = r cos β cos λ`, `y = r cos β sin λ`, `z = r sin β`. A radius vector of 0 is valid
/// and gives the origin.
///
/// Return
/// ------
/// * The rectangular position, or [`HeliographError::InvalidCoordinate`] for a negative or
///   non-finite radius vector.
pub fn spherical_to_rectangular(
    coords: &EclipticSphericalCoordinates,
) -> Result<RectangularCoordinates, HeliographError> {
    coords.validate()?;
    let v = unit_vector(coords.lon, coords.lat) * coords.radius_vector;
    Ok(RectangularCoordinates::from_vector(&v))
}

/// Convert rectangular coordinates into ecliptic spherical coordinates.
pub fn rectangular_to_spherical(coords: &RectangularCoordinates) -> EclipticSphericalCoordinates {
    let (lon, lat, radius_vector) = vector_angles(&coords.as_vector());
    EclipticSphericalCoordinates {
        lon,
        lat,
        radius_vector,
    }
}

/// Rotate ecliptic coordinates into the equatorial frame.
///
/// Arguments
/// ---------
/// * `coords`: ecliptic spherical coordinates.
/// * `obliquity`: obliquity of the ecliptic ε in degrees (mean or true, depending on the
///   frame wanted).
///
/// Return
/// ------
/// * Equatorial coordinates with the same radius vector.
///
/// The closed form equivalent is
/// `α = atan2(sin λ cos ε − tan β sin ε, cos λ)` and
/// `δ = asin(sin β cos ε + cos β sin ε sin λ)`.
pub fn ecliptic_to_equatorial(
    coords: &EclipticSphericalCoordinates,
    obliquity: Degree,
) -> Result<EquatorialSphericalCoordinates, HeliographError> {
    coords.validate()?;
    let v = rotation_x(obliquity) * unit_vector(coords.lon, coords.lat);
    let (right_ascension, declination, _) = vector_angles(&v);
    Ok(EquatorialSphericalCoordinates {
        right_ascension,
        declination,
        radius_vector: coords.radius_vector,
    })
}

/// Rotate equatorial coordinates back into the ecliptic frame.
pub fn equatorial_to_ecliptic(
    coords: &EquatorialSphericalCoordinates,
    obliquity: Degree,
) -> Result<EclipticSphericalCoordinates, HeliographError> {
    coords.validate()?;
    let v = rotation_x(-obliquity) * unit_vector(coords.right_ascension, coords.declination);
    let (lon, lat, _) = vector_angles(&v);
    Ok(EclipticSphericalCoordinates {
        lon,
        lat,
        radius_vector: coords.radius_vector,
    })
}

/// Geocentric ecliptic position of a body from its heliocentric position and the Earth's.
///
/// The subtraction is done on rectangular vectors, then converted back; the longitude is
/// normalized into `[0, 360)`.
pub fn heliocentric_to_geocentric(
    body: &EclipticSphericalCoordinates,
    earth: &EclipticSphericalCoordinates,
) -> Result<EclipticSphericalCoordinates, HeliographError> {
    let body = spherical_to_rectangular(body)?.as_vector();
    let earth = spherical_to_rectangular(earth)?.as_vector();
    Ok(rectangular_to_spherical(
        &RectangularCoordinates::from_vector(&(body - earth)),
    ))
}

/// Geocentric position of the Sun from the heliocentric position of the Earth.
///
/// `λ☉ = λ⊕ + 180°`, `β☉ = −β⊕`, same radius vector.
pub fn earth_to_sun_geocentric(
    earth: &EclipticSphericalCoordinates,
) -> Result<EclipticSphericalCoordinates, HeliographError> {
    earth.validate()?;
    Ok(EclipticSphericalCoordinates {
        lon: normalize_angle(earth.lon + 180.0),
        lat: -earth.lat,
        radius_vector: earth.radius_vector,
    })
}

/// Apply the diurnal parallax to geocentric equatorial coordinates.
///
/// The observer's geocentric position (with the ellipsoid flattening and elevation, see
/// [`Location::geocentric_position`]) is subtracted from the body's geocentric position.
///
/// Arguments
/// ---------
/// * `coords`: geocentric equatorial coordinates (any equinox).
/// * `location`: the observer.
/// * `local_sidereal_time`: local sidereal time in degrees, consistent with the equinox of
///   `coords`.
///
/// Return
/// ------
/// * Topocentric equatorial coordinates; the radius vector is the observer–body distance.
pub fn geocentric_to_topocentric(
    coords: &EquatorialSphericalCoordinates,
    location: &Location,
    local_sidereal_time: Degree,
) -> Result<EquatorialSphericalCoordinates, HeliographError> {
    coords.validate()?;
    let body = unit_vector(coords.right_ascension, coords.declination) * coords.radius_vector;
    let topo = body - location.geocentric_position(local_sidereal_time);
    let (right_ascension, declination, radius_vector) = vector_angles(&topo);
    Ok(EquatorialSphericalCoordinates {
        right_ascension,
        declination,
        radius_vector,
    })
}

/// Convert equatorial coordinates into horizontal coordinates.
///
/// With the hour angle `H = θ_local − α`:
///
/// ```text
/// A = atan2(sin H, cos H sin φ − tan δ cos φ) + 180°   (from north)
/// h = asin(sin φ sin δ + cos φ cos δ cos H)
/// ```
pub fn equatorial_to_horizontal(
    coords: &EquatorialSphericalCoordinates,
    location: &Location,
    local_sidereal_time: Degree,
) -> Result<HorizontalCoordinates, HeliographError> {
    coords.validate()?;
    let hour_angle = (local_sidereal_time - coords.right_ascension) * RADEG;
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_phi, cos_phi) = (location.latitude() * RADEG).sin_cos();
    let (sin_dec, cos_dec) = (coords.declination * RADEG).sin_cos();

    // tan δ multiplied through by cos δ to stay defined at the poles
    let azimuth = (sin_h * cos_dec).atan2(cos_h * cos_dec * sin_phi - sin_dec * cos_phi);
    let altitude = (sin_phi * sin_dec + cos_phi * cos_dec * cos_h)
        .clamp(-1.0, 1.0)
        .asin();

    Ok(HorizontalCoordinates {
        azimuth: normalize_angle(azimuth.to_degrees() + 180.0),
        altitude: altitude.to_degrees(),
        radius_vector: coords.radius_vector,
    })
}
