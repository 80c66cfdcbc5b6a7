//! # Bodies
//!
//! The [`Body`] trait is what distinguishes one celestial body from another for the
//! [`Ephemeris`](crate::ephemeris::Ephemeris) pipeline: where it is with respect to the
//! Sun, how big it is and how bright it looks. Frame conversions, corrections and the
//! rise/set solver are shared by every body.
//!
//! [`Sun`] is the body shipped with the crate. Its heliocentric position is the origin,
//! so all of its geocentric positions come from the Earth orbital model.
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Kilometer, DIAMETER_SUN, STANDARD_ALTITUDE_STARS_REFRACTION,
    STANDARD_ALTITUDE_SUN_CENTER_REFRACTION, STANDARD_ALTITUDE_SUN_UPPER_LIMB_REFRACTION,
    SUN_APPARENT_MAGNITUDE,
};
use crate::coordinates::EclipticSphericalCoordinates;
use crate::heliograph_errors::HeliographError;
use crate::time::TimeOfInterest;

pub trait Body {
    /// Lower-case name of the body.
    fn name(&self) -> &str;

    /// Linear diameter, in kilometers.
    fn diameter(&self) -> Kilometer;

    /// Visual apparent magnitude for a distance from the observer, in kilometers.
    fn apparent_magnitude(&self, distance: Kilometer) -> f64;

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

    /// Standard altitude for rise and set of the center of the body, in degrees.
    fn standard_altitude(&self) -> Degree {
        STANDARD_ALTITUDE_STARS_REFRACTION
    }

    /// Standard altitude for rise and set of the upper limb, in degrees.
    fn standard_altitude_upper_limb(&self) -> Degree {
        self.standard_altitude()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sun;

impl Body for Sun {
    fn name(&self) -> &str {
        "sun"
    }

    fn diameter(&self) -> Kilometer {
        DIAMETER_SUN
    }

    fn apparent_magnitude(&self, _distance: Kilometer) -> f64 {
        SUN_APPARENT_MAGNITUDE
    }

    fn heliocentric_ecliptic_spherical_j2000(
        &self,
        _toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        Ok(EclipticSphericalCoordinates::default())
    }

    fn heliocentric_ecliptic_spherical_date(
        &self,
        _toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        Ok(EclipticSphericalCoordinates::default())
    }

    fn standard_altitude(&self) -> Degree {
        STANDARD_ALTITUDE_SUN_CENTER_REFRACTION
    }

    fn standard_altitude_upper_limb(&self) -> Degree {
        STANDARD_ALTITUDE_SUN_UPPER_LIMB_REFRACTION
    }
}
