//! # Orbital models
//!
//! The crate does not own any planetary theory. The raw heliocentric position of a body
//! comes from an [`OrbitalModel`], the only collaborator whose output is taken as given.
//!
//! [`Vsop87Earth`] is the provider used for the Earth, backed by the `vsop87` crate:
//!
//! - VSOP87B: heliocentric ecliptic spherical coordinates, J2000.0 ecliptic and equinox,
//! - VSOP87D: heliocentric ecliptic spherical coordinates, ecliptic and equinox of date.
//!
//! The series are evaluated at the Julian Day of the time of interest, without ΔT.
use crate::constants::Radian;
use crate::coordinates::EclipticSphericalCoordinates;
use crate::heliograph_errors::HeliographError;
use crate::time::TimeOfInterest;

/// Source of heliocentric ecliptic positions for one body.
///
/// Implementations return a radius vector strictly greater than zero and a longitude in
/// `[0, 360)`.
pub trait OrbitalModel {
    /// Heliocentric ecliptic spherical coordinates, J2000.0 ecliptic and equinox.
    fn heliocentric_ecliptic_spherical_j2000(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError>;

    /// Heliocentric ecliptic spherical coordinates, ecliptic and equinox of date.
    fn heliocentric_ecliptic_spherical_date(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError>;
}

/// Earth position from the VSOP87 theory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vsop87Earth;

fn checked_position(
    longitude: Radian,
    latitude: Radian,
    distance: f64,
) -> Result<EclipticSphericalCoordinates, HeliographError> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(HeliographError::OrbitalModel(format!(
            "VSOP87 returned an invalid radius vector: {distance}"
        )));
    }
    EclipticSphericalCoordinates::new(longitude.to_degrees(), latitude.to_degrees(), distance)
        .map_err(|e| HeliographError::OrbitalModel(e.to_string()))
}

impl OrbitalModel for Vsop87Earth {
    fn heliocentric_ecliptic_spherical_j2000(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        let coords = vsop87::vsop87b::earth(toi.jd());
        checked_position(coords.longitude(), coords.latitude(), coords.distance())
    }

    fn heliocentric_ecliptic_spherical_date(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        let coords = vsop87::vsop87d::earth(toi.jd());
        checked_position(coords.longitude(), coords.latitude(), coords.distance())
    }
}
