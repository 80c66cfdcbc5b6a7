//! # Ephemeris of one body at one instant
//!
//! [`Ephemeris`] composes the whole pipeline for a [`Body`] seen from the Earth:
//!
//! ```text
//! orbital model ─► heliocentric ─► geocentric ─► apparent ─► topocentric ─► horizontal
//!                                        │             │
//!                                        │             └─► rise / transit / set
//!                                        └─► distance, light time, angular diameter
//! ```
//!
//! Every query is a pure function of the body, the [`TimeOfInterest`] given at construction
//! and, for topocentric queries, a [`Location`]. Nothing is cached: calling the same query
//! twice gives bit-identical results.
//!
//! ## Frames
//!
//! - *J2000*: ecliptic and equinox J2000.0 (VSOP87B for the Earth).
//! - *date*: ecliptic and mean equinox of date (VSOP87D for the Earth).
//! - *apparent*: date coordinates corrected for aberration and nutation.
//!
//! Equatorial coordinates of every flavour are rotated with the true obliquity of date.
//!
//! ## Example
//!
//! ```rust,no_run
//! use heliograph::body::Sun;
//! use heliograph::ephemeris::Ephemeris;
//! use heliograph::location::Location;
//! use heliograph::time::TimeOfInterest;
//!
//! let toi = TimeOfInterest::from_time(2020, 10, 22, 6, 15, 0.0).unwrap();
//! let berlin = Location::at(52.519, 13.408).unwrap();
//! let sun = Ephemeris::new(Sun, toi);
//!
//! let horizontal = sun.apparent_topocentric_horizontal(&berlin).unwrap();
//! let rise = sun.rise(&berlin, None).unwrap();
//! println!("{:.4}° above the horizon, rose at {rise}", horizontal.altitude);
//! ```
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::Body;
use crate::constants::{Degree, JulianDay, Kilometer, Seconds};
use crate::coordinates::conversion::{
    ecliptic_to_equatorial, equatorial_to_horizontal, geocentric_to_topocentric,
    heliocentric_to_geocentric, spherical_to_rectangular,
};
use crate::coordinates::{
    EclipticSphericalCoordinates, EquatorialSphericalCoordinates, HorizontalCoordinates,
    RectangularCoordinates,
};
use crate::corrections::{correct_aberration, correct_nutation, correct_refraction};
use crate::earth_orientation::true_obliquity;
use crate::heliograph_errors::HeliographError;
use crate::location::Location;
use crate::observation::{angular_diameter, distance_km, light_time_seconds};
use crate::orbital_model::{OrbitalModel, Vsop87Earth};
use crate::rise_set_transit::{self, DayEvents, EventTime, RiseSetParams};
use crate::time::{local_apparent_sidereal_time, TimeOfInterest};

/// Reference frame flavour of equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equinox {
    J2000,
    Date,
    Apparent,
}

/// All positions and events of one body at one time of interest.
#[derive(Debug, Clone)]
pub struct Ephemeris<B: Body, M: OrbitalModel = Vsop87Earth> {
    body: B,
    earth: M,
    toi: TimeOfInterest,
    params: RiseSetParams,
}

impl<B: Body> Ephemeris<B, Vsop87Earth> {
    /// Ephemeris using the VSOP87 Earth and the default solver parameters.
    pub fn new(body: B, toi: TimeOfInterest) -> Self {
        Self::with_model(body, Vsop87Earth, toi)
    }
}

impl<B: Body, M: OrbitalModel> Ephemeris<B, M> {
    /// Ephemeris using a custom Earth orbital model.
    pub fn with_model(body: B, earth: M, toi: TimeOfInterest) -> Self {
        Self {
            body,
            earth,
            toi,
            params: RiseSetParams::default(),
        }
    }

    /// Replace the rise/set/transit solver parameters.
    pub fn with_params(mut self, params: RiseSetParams) -> Self {
        self.params = params;
        self
    }

    pub fn name(&self) -> &str {
        self.body.name()
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn time_of_interest(&self) -> &TimeOfInterest {
        &self.toi
    }

    /// Julian centuries since J2000.0 of the time of interest.
    pub fn julian_centuries(&self) -> f64 {
        self.toi.julian_centuries()
    }

    /// Julian Day of 0h UT of the day of the time of interest.
    pub fn jd0(&self) -> JulianDay {
        self.toi.jd0()
    }

    pub fn params(&self) -> &RiseSetParams {
        &self.params
    }

    // ---------------------------------------------------------------------------------------------
    // Heliocentric
    // ---------------------------------------------------------------------------------------------

    pub fn heliocentric_ecliptic_spherical_j2000(
        &self,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        self.body.heliocentric_ecliptic_spherical_j2000(&self.toi)
    }

    pub fn heliocentric_ecliptic_spherical_date(
        &self,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        self.body.heliocentric_ecliptic_spherical_date(&self.toi)
    }

    pub fn heliocentric_ecliptic_rectangular_j2000(
        &self,
    ) -> Result<RectangularCoordinates, HeliographError> {
        spherical_to_rectangular(&self.heliocentric_ecliptic_spherical_j2000()?)
    }

    pub fn heliocentric_ecliptic_rectangular_date(
        &self,
    ) -> Result<RectangularCoordinates, HeliographError> {
        spherical_to_rectangular(&self.heliocentric_ecliptic_spherical_date()?)
    }

    // ---------------------------------------------------------------------------------------------
    // Geocentric ecliptic
    // ---------------------------------------------------------------------------------------------

    fn geocentric_ecliptic_spherical_j2000_at(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        heliocentric_to_geocentric(
            &self.body.heliocentric_ecliptic_spherical_j2000(toi)?,
            &self.earth.heliocentric_ecliptic_spherical_j2000(toi)?,
        )
    }

    fn geocentric_ecliptic_spherical_date_at(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        heliocentric_to_geocentric(
            &self.body.heliocentric_ecliptic_spherical_date(toi)?,
            &self.earth.heliocentric_ecliptic_spherical_date(toi)?,
        )
    }

    fn apparent_geocentric_ecliptic_spherical_at(
        &self,
        toi: &TimeOfInterest,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        let t = toi.julian_centuries();
        let coords = self.geocentric_ecliptic_spherical_date_at(toi)?;
        let coords = correct_aberration(&coords, t)?;
        correct_nutation(&coords, t)
    }

    pub fn geocentric_ecliptic_spherical_j2000(
        &self,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        self.geocentric_ecliptic_spherical_j2000_at(&self.toi)
    }

    pub fn geocentric_ecliptic_spherical_date(
        &self,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        self.geocentric_ecliptic_spherical_date_at(&self.toi)
    }

    pub fn geocentric_ecliptic_rectangular_j2000(
        &self,
    ) -> Result<RectangularCoordinates, HeliographError> {
        spherical_to_rectangular(&self.geocentric_ecliptic_spherical_j2000()?)
    }

    pub fn geocentric_ecliptic_rectangular_date(
        &self,
    ) -> Result<RectangularCoordinates, HeliographError> {
        spherical_to_rectangular(&self.geocentric_ecliptic_spherical_date()?)
    }

    /// Geocentric ecliptic coordinates of date corrected for aberration and nutation.
    pub fn apparent_geocentric_ecliptic_spherical(
        &self,
    ) -> Result<EclipticSphericalCoordinates, HeliographError> {
        self.apparent_geocentric_ecliptic_spherical_at(&self.toi)
    }

    pub fn apparent_geocentric_ecliptic_rectangular(
        &self,
    ) -> Result<RectangularCoordinates, HeliographError> {
        spherical_to_rectangular(&self.apparent_geocentric_ecliptic_spherical()?)
    }

    // ---------------------------------------------------------------------------------------------
    // Geocentric equatorial
    // ---------------------------------------------------------------------------------------------

    fn geocentric_equatorial_at(
        &self,
        equinox: Equinox,
        toi: &TimeOfInterest,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        let ecliptic = match equinox {
            Equinox::J2000 => self.geocentric_ecliptic_spherical_j2000_at(toi)?,
            Equinox::Date => self.geocentric_ecliptic_spherical_date_at(toi)?,
            Equinox::Apparent => self.apparent_geocentric_ecliptic_spherical_at(toi)?,
        };
        ecliptic_to_equatorial(&ecliptic, true_obliquity(toi.julian_centuries()))
    }

    /// Geocentric equatorial coordinates for an equinox flavour.
    pub fn geocentric_equatorial_spherical(
        &self,
        equinox: Equinox,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        self.geocentric_equatorial_at(equinox, &self.toi)
    }

    pub fn geocentric_equatorial_spherical_j2000(
        &self,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        self.geocentric_equatorial_spherical(Equinox::J2000)
    }

    pub fn geocentric_equatorial_spherical_date(
        &self,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        self.geocentric_equatorial_spherical(Equinox::Date)
    }

    pub fn apparent_geocentric_equatorial_spherical(
        &self,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        self.geocentric_equatorial_spherical(Equinox::Apparent)
    }

    // ---------------------------------------------------------------------------------------------
    // Topocentric
    // ---------------------------------------------------------------------------------------------

    fn local_sidereal_time(&self, location: &Location) -> Degree {
        local_apparent_sidereal_time(self.toi.jd(), location.longitude())
    }

    /// Topocentric equatorial coordinates for an equinox flavour.
    pub fn topocentric_equatorial_spherical_for(
        &self,
        equinox: Equinox,
        location: &Location,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        geocentric_to_topocentric(
            &self.geocentric_equatorial_spherical(equinox)?,
            location,
            self.local_sidereal_time(location),
        )
    }

    /// Apparent topocentric equatorial coordinates.
    pub fn topocentric_equatorial_spherical(
        &self,
        location: &Location,
    ) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        self.topocentric_equatorial_spherical_for(Equinox::Apparent, location)
    }

    /// Azimuth and geometric altitude (no refraction) seen by the observer.
    ///
    /// The apparent geocentric equatorial position is rotated with the local apparent
    /// sidereal time; the diurnal parallax (below 9″ for the Sun) is not applied. See
    /// [`Ephemeris::topocentric_horizontal_with_parallax`] for the parallax-corrected value.
    pub fn topocentric_horizontal(
        &self,
        location: &Location,
    ) -> Result<HorizontalCoordinates, HeliographError> {
        equatorial_to_horizontal(
            &self.apparent_geocentric_equatorial_spherical()?,
            location,
            self.local_sidereal_time(location),
        )
    }

    /// Azimuth and geometric altitude from the parallax-corrected topocentric position.
    pub fn topocentric_horizontal_with_parallax(
        &self,
        location: &Location,
    ) -> Result<HorizontalCoordinates, HeliographError> {
        equatorial_to_horizontal(
            &self.topocentric_equatorial_spherical(location)?,
            location,
            self.local_sidereal_time(location),
        )
    }

    /// Topocentric azimuth and altitude raised by the atmospheric refraction.
    pub fn apparent_topocentric_horizontal(
        &self,
        location: &Location,
    ) -> Result<HorizontalCoordinates, HeliographError> {
        let coords = self.topocentric_horizontal(location)?;
        Ok(HorizontalCoordinates {
            altitude: correct_refraction(coords.altitude),
            ..coords
        })
    }

    // ---------------------------------------------------------------------------------------------
    // Distance, size and brightness
    // ---------------------------------------------------------------------------------------------

    /// Geometric geocentric distance, in kilometers.
    pub fn distance_to_earth(&self) -> Result<Kilometer, HeliographError> {
        Ok(distance_km(
            self.geocentric_ecliptic_spherical_date()?.radius_vector,
        ))
    }

    /// Geocentric distance of the apparent position, in kilometers.
    pub fn apparent_distance_to_earth(&self) -> Result<Kilometer, HeliographError> {
        Ok(distance_km(
            self.apparent_geocentric_ecliptic_spherical()?.radius_vector,
        ))
    }

    /// Distance from the observer, in kilometers.
    pub fn topocentric_distance_to_earth(
        &self,
        location: &Location,
    ) -> Result<Kilometer, HeliographError> {
        Ok(distance_km(
            self.topocentric_equatorial_spherical(location)?.radius_vector,
        ))
    }

    /// Light travel time from the body to the Earth center, in seconds.
    pub fn light_time(&self) -> Result<Seconds, HeliographError> {
        Ok(light_time_seconds(self.distance_to_earth()?))
    }

    /// Angular diameter seen from the Earth center, in degrees.
    pub fn angular_diameter(&self) -> Result<Degree, HeliographError> {
        angular_diameter(self.apparent_distance_to_earth()?, self.body.diameter())
    }

    /// Angular diameter seen by the observer, in degrees.
    pub fn topocentric_angular_diameter(
        &self,
        location: &Location,
    ) -> Result<Degree, HeliographError> {
        angular_diameter(
            self.topocentric_distance_to_earth(location)?,
            self.body.diameter(),
        )
    }

    pub fn apparent_magnitude(&self) -> Result<f64, HeliographError> {
        Ok(self
            .body
            .apparent_magnitude(self.apparent_distance_to_earth()?))
    }

    pub fn topocentric_apparent_magnitude(
        &self,
        location: &Location,
    ) -> Result<f64, HeliographError> {
        Ok(self
            .body
            .apparent_magnitude(self.topocentric_distance_to_earth(location)?))
    }

    // ---------------------------------------------------------------------------------------------
    // Rise, transit and set
    // ---------------------------------------------------------------------------------------------

    fn apparent_position(
        &self,
    ) -> impl Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError> + '_ {
        move |jd| {
            let toi = TimeOfInterest::from_julian_day(jd)?;
            self.geocentric_equatorial_at(Equinox::Apparent, &toi)
        }
    }

    /// Meridian transit of the day, with the solver diagnostics.
    pub fn transit_event(&self, location: &Location) -> Result<EventTime, HeliographError> {
        rise_set_transit::transit(self.apparent_position(), location, self.jd0(), &self.params)
    }

    /// Rise of the day, with the solver diagnostics.
    pub fn rise_event(
        &self,
        location: &Location,
        standard_altitude: Degree,
    ) -> Result<EventTime, HeliographError> {
        rise_set_transit::rise(
            self.apparent_position(),
            location,
            self.jd0(),
            standard_altitude,
            &self.params,
        )
    }

    /// Set of the day, with the solver diagnostics.
    pub fn set_event(
        &self,
        location: &Location,
        standard_altitude: Degree,
    ) -> Result<EventTime, HeliographError> {
        rise_set_transit::set(
            self.apparent_position(),
            location,
            self.jd0(),
            standard_altitude,
            &self.params,
        )
    }

    /// Rise, transit and set of the day for the center of the body.
    pub fn day_events(&self, location: &Location) -> Result<DayEvents, HeliographError> {
        let events = rise_set_transit::rise_set_transit(
            self.apparent_position(),
            location,
            self.jd0(),
            self.body.standard_altitude(),
            &self.params,
        )?;
        debug!(
            body = self.name(),
            %location,
            jd0 = self.jd0(),
            has_rise = events.rise.is_some(),
            has_set = events.set.is_some(),
            "day events"
        );
        Ok(events)
    }

    pub fn transit(&self, location: &Location) -> Result<TimeOfInterest, HeliographError> {
        self.transit_event(location)?.to_time_of_interest()
    }

    /// Rise of the center of the body, or at `standard_altitude` when given.
    pub fn rise(
        &self,
        location: &Location,
        standard_altitude: Option<Degree>,
    ) -> Result<TimeOfInterest, HeliographError> {
        let h0 = standard_altitude.unwrap_or_else(|| self.body.standard_altitude());
        self.rise_event(location, h0)?.to_time_of_interest()
    }

    pub fn rise_upper_limb(&self, location: &Location) -> Result<TimeOfInterest, HeliographError> {
        self.rise(location, Some(self.body.standard_altitude_upper_limb()))
    }

    /// Set of the center of the body, or at `standard_altitude` when given.
    pub fn set(
        &self,
        location: &Location,
        standard_altitude: Option<Degree>,
    ) -> Result<TimeOfInterest, HeliographError> {
        let h0 = standard_altitude.unwrap_or_else(|| self.body.standard_altitude());
        self.set_event(location, h0)?.to_time_of_interest()
    }

    pub fn set_upper_limb(&self, location: &Location) -> Result<TimeOfInterest, HeliographError> {
        self.set(location, Some(self.body.standard_altitude_upper_limb()))
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::body::Sun;
    use approx::assert_relative_eq;

    /// Earth on a circular orbit in the ecliptic, one degree per day.
    struct CircularEarth;

    impl OrbitalModel for CircularEarth {
        fn heliocentric_ecliptic_spherical_j2000(
            &self,
            toi: &TimeOfInterest,
        ) -> Result<EclipticSphericalCoordinates, HeliographError> {
            EclipticSphericalCoordinates::new(toi.jd() - 2451545.0, 0.0, 1.0)
        }

        fn heliocentric_ecliptic_spherical_date(
            &self,
            toi: &TimeOfInterest,
        ) -> Result<EclipticSphericalCoordinates, HeliographError> {
            self.heliocentric_ecliptic_spherical_j2000(toi)
        }
    }

    #[test]
    fn test_custom_model_is_used() {
        let toi = TimeOfInterest::from_julian_day(2451545.0 + 10.0).unwrap();
        let sun = Ephemeris::with_model(Sun, CircularEarth, toi);
        let geo = sun.geocentric_ecliptic_spherical_date().unwrap();
        assert_relative_eq!(geo.lon, 190.0, epsilon = 1e-9);
        assert_relative_eq!(geo.lat, 0.0, epsilon = 1e-12);
        assert_relative_eq!(geo.radius_vector, 1.0, epsilon = 1e-12);
        assert_eq!(sun.name(), "sun");
    }

    #[test]
    fn test_heliocentric_sun_is_origin() {
        let toi = TimeOfInterest::from_julian_day(2451545.0).unwrap();
        let sun = Ephemeris::with_model(Sun, CircularEarth, toi);
        assert_eq!(
            sun.heliocentric_ecliptic_rectangular_date().unwrap(),
            RectangularCoordinates::default()
        );
    }

    #[test]
    fn test_solver_parameters_are_forwarded() {
        let toi = TimeOfInterest::from_julian_day(2451545.0).unwrap();
        let params = RiseSetParams::builder()
            .max_iterations(1)
            .tolerance_days(1e-15)
            .build()
            .unwrap();
        let sun = Ephemeris::with_model(Sun, CircularEarth, toi).with_params(params);
        let location = Location::at(10.0, 0.0).unwrap();
        let event = sun.transit_event(&location).unwrap();
        assert_eq!(event.iterations, 1);
        assert!(!event.converged);
    }
}
