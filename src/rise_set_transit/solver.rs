//! Iterative solver for the instants of rise, set and meridian transit.
//!
//! All functions take the position of the body as a closure returning apparent geocentric
//! equatorial coordinates for a Julian Day, so that the solver stays independent of the
//! body. Longitudes are east positive.
use tracing::{debug, trace, warn};

use crate::constants::{Degree, JulianDay, RADEG, SECONDS_PER_DAY, SIDEREAL_RATE};
use crate::coordinates::{normalize_angle, normalize_angle_180, EquatorialSphericalCoordinates};
use crate::heliograph_errors::HeliographError;
use crate::location::Location;
use crate::rise_set_transit::{DayEvents, EventKind, EventTime, RiseSetParams};
use crate::time::apparent_sidereal_time;

/// Below this, `360 cos δ cos φ sin H` is treated as zero.
const DEGENERATE_DENOMINATOR: f64 = 1e-12;

/// Right ascension and declination at 0h UT of three consecutive days.
#[derive(Debug, Clone, Copy)]
struct DailySamples {
    ra: [Degree; 3],
    dec: [Degree; 3],
}

impl DailySamples {
    fn sample<F>(position: &F, jd0: JulianDay) -> Result<Self, HeliographError>
    where
        F: Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError>,
    {
        let mut ra = [0.0; 3];
        let mut dec = [0.0; 3];
        for (i, offset) in [-1.0, 0.0, 1.0].into_iter().enumerate() {
            let coords = position(jd0 + offset)?;
            coords.validate()?;
            ra[i] = coords.right_ascension;
            dec[i] = coords.declination;
        }
        Ok(Self { ra, dec })
    }

    /// Quadratic interpolation at `n` days after the central sample.
    fn interpolate(&self, n: f64) -> (Degree, Degree) {
        let ra = interpolate3(self.ra, n, true);
        let dec = interpolate3(self.dec, n, false);
        (normalize_angle(ra), dec)
    }
}

/// Three-point interpolation (Meeus 3.3): `y = y2 + n/2 (a + b + n c)`.
///
/// Differences of right ascensions are unwrapped across 0°/360°.
fn interpolate3(y: [f64; 3], n: f64, wrapped: bool) -> f64 {
    let (mut a, mut b) = (y[1] - y[0], y[2] - y[1]);
    if wrapped {
        a = normalize_angle_180(a);
        b = normalize_angle_180(b);
    }
    let c = b - a;
    y[1] + n / 2.0 * (a + b + n * c)
}

/// Fractional part in `[0, 1)`.
fn frac(x: f64) -> f64 {
    let f = x - x.floor();
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Quantities shared by the three events of one day.
#[derive(Debug, Clone, Copy)]
struct DaySetup {
    jd0: JulianDay,
    samples: DailySamples,
    /// Apparent sidereal time at Greenwich at `jd0`, degrees.
    theta0: Degree,
    /// First estimate of the transit, fraction of day.
    m0: f64,
}

impl DaySetup {
    fn new<F>(position: &F, location: &Location, jd0: JulianDay) -> Result<Self, HeliographError>
    where
        F: Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError>,
    {
        if !jd0.is_finite() {
            return Err(HeliographError::InvalidTime(format!(
                "reference julian day must be finite, got {jd0}"
            )));
        }
        let samples = DailySamples::sample(position, jd0)?;
        let theta0 = apparent_sidereal_time(jd0);
        let m0 = frac((samples.ra[1] - location.longitude() - theta0) / 360.0);
        debug!(jd0, theta0, m0, "rise/set/transit first estimate");
        Ok(Self {
            jd0,
            samples,
            theta0,
            m0,
        })
    }

    /// Hour angle half-width H0 (degrees) for the standard altitude `h0`.
    fn half_width(
        &self,
        location: &Location,
        h0: Degree,
        event: EventKind,
    ) -> Result<Degree, HeliographError> {
        let phi = location.latitude() * RADEG;
        let dec = self.samples.dec[1] * RADEG;
        let cos_h0 = ((h0 * RADEG).sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
        if !cos_h0.is_finite() || cos_h0.abs() > 1.0 {
            debug!(%event, cos_h0, "no crossing of the standard altitude");
            return Err(HeliographError::NoEvent { event, cos_h0 });
        }
        Ok(cos_h0.acos().to_degrees())
    }

    /// Refine a fraction-of-day estimate for one event.
    fn refine(
        &self,
        event: EventKind,
        m_start: f64,
        location: &Location,
        h0: Degree,
        params: &RiseSetParams,
    ) -> EventTime {
        let phi = location.latitude() * RADEG;
        let mut m = m_start;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < params.max_iterations {
            iterations += 1;

            let theta = self.theta0 + SIDEREAL_RATE * m;
            let n = m + params.delta_t_seconds / SECONDS_PER_DAY;
            let (ra, dec) = self.samples.interpolate(n);
            let hour_angle = normalize_angle_180(theta + location.longitude() - ra);

            let dm = match event {
                EventKind::Transit => -hour_angle / 360.0,
                EventKind::Rise | EventKind::Set => {
                    let dec_r = dec * RADEG;
                    let h_r = hour_angle * RADEG;
                    let altitude = (phi.sin() * dec_r.sin() + phi.cos() * dec_r.cos() * h_r.cos())
                        .clamp(-1.0, 1.0)
                        .asin()
                        .to_degrees();
                    let denominator = 360.0 * dec_r.cos() * phi.cos() * h_r.sin();
                    let raw = if denominator.abs() < DEGENERATE_DENOMINATOR {
                        (altitude - h0).signum() * denominator.signum() * params.max_correction_days
                    } else {
                        (altitude - h0) / denominator
                    };
                    raw.clamp(-params.max_correction_days, params.max_correction_days)
                }
            };

            m = frac(m + dm);
            trace!(%event, iterations, m, dm, "correction");

            if dm.abs() < params.tolerance_days {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                %event,
                jd0 = self.jd0,
                iterations,
                "solver stopped at the iteration bound before reaching the tolerance"
            );
        }

        EventTime {
            kind: event,
            jd: self.jd0 + m,
            iterations,
            converged,
        }
    }
}

/// Instant of the upper meridian transit.
///
/// Arguments
/// ---------
/// * `position`: apparent geocentric equatorial coordinates for a Julian Day.
/// * `location`: the observer.
/// * `jd0`: Julian Day of 0h UT of the day of interest.
/// * `params`: solver parameters.
///
/// Return
/// ------
/// * The transit, always defined.
pub fn transit<F>(
    position: F,
    location: &Location,
    jd0: JulianDay,
    params: &RiseSetParams,
) -> Result<EventTime, HeliographError>
where
    F: Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError>,
{
    let day = DaySetup::new(&position, location, jd0)?;
    Ok(day.refine(EventKind::Transit, day.m0, location, 0.0, params))
}

/// Instant at which the body climbs through the standard altitude `h0` (degrees).
///
/// Returns [`HeliographError::NoEvent`] when the body stays above or below `h0` the whole day.
pub fn rise<F>(
    position: F,
    location: &Location,
    jd0: JulianDay,
    h0: Degree,
    params: &RiseSetParams,
) -> Result<EventTime, HeliographError>
where
    F: Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError>,
{
    let day = DaySetup::new(&position, location, jd0)?;
    let half_width = day.half_width(location, h0, EventKind::Rise)?;
    let m1 = frac(day.m0 - half_width / 360.0);
    Ok(day.refine(EventKind::Rise, m1, location, h0, params))
}

/// Instant at which the body sinks through the standard altitude `h0` (degrees).
///
/// Returns [`HeliographError::NoEvent`] when the body stays above or below `h0` the whole day.
pub fn set<F>(
    position: F,
    location: &Location,
    jd0: JulianDay,
    h0: Degree,
    params: &RiseSetParams,
) -> Result<EventTime, HeliographError>
where
    F: Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError>,
{
    let day = DaySetup::new(&position, location, jd0)?;
    let half_width = day.half_width(location, h0, EventKind::Set)?;
    let m2 = frac(day.m0 + half_width / 360.0);
    Ok(day.refine(EventKind::Set, m2, location, h0, params))
}

/// Rise, transit and set of one day, sampling the body position only once.
///
/// `rise` and `set` are `None` when [`rise`]/[`set`] would report
/// [`HeliographError::NoEvent`]; every other error is propagated.
pub fn rise_set_transit<F>(
    position: F,
    location: &Location,
    jd0: JulianDay,
    h0: Degree,
    params: &RiseSetParams,
) -> Result<DayEvents, HeliographError>
where
    F: Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError>,
{
    let day = DaySetup::new(&position, location, jd0)?;
    let transit = day.refine(EventKind::Transit, day.m0, location, 0.0, params);

    let (rise, set) = match day.half_width(location, h0, EventKind::Rise) {
        Ok(half_width) => (
            Some(day.refine(
                EventKind::Rise,
                frac(day.m0 - half_width / 360.0),
                location,
                h0,
                params,
            )),
            Some(day.refine(
                EventKind::Set,
                frac(day.m0 + half_width / 360.0),
                location,
                h0,
                params,
            )),
        ),
        Err(HeliographError::NoEvent { .. }) => (None, None),
        Err(e) => return Err(e),
    };

    Ok(DayEvents { rise, transit, set })
}

#[cfg(test)]
mod solver_test {
    use super::*;
    use approx::assert_relative_eq;

    fn fixed(ra: f64, dec: f64) -> impl Fn(JulianDay) -> Result<EquatorialSphericalCoordinates, HeliographError> {
        move |_| EquatorialSphericalCoordinates::new(ra, dec, 1.0)
    }

    #[test]
    fn test_interpolate3() {
        // Meeus, example 3.a: distance of Mars, n = 4.35 hours
        let y = [0.884226, 0.877366, 0.870531];
        assert_relative_eq!(interpolate3(y, 0.18125, false), 0.876125, epsilon = 1e-6);
    }

    #[test]
    fn test_interpolate3_unwraps_right_ascension() {
        let samples = DailySamples {
            ra: [359.0, 0.0, 1.0],
            dec: [0.0, 0.0, 0.0],
        };
        let (ra, _) = samples.interpolate(-0.5);
        assert_relative_eq!(ra, 359.5, epsilon = 1e-12);
        let (ra, _) = samples.interpolate(0.5);
        assert_relative_eq!(ra, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_frac() {
        assert_eq!(frac(1.25), 0.25);
        assert_eq!(frac(-0.25), 0.75);
        assert_eq!(frac(-1e-20), 0.0);
    }

    #[test]
    fn test_circumpolar_guard() {
        let location = Location::at(89.0, 0.0).unwrap();
        let params = RiseSetParams::default();
        let err = rise(fixed(10.0, -5.0), &location, 2459144.5, -0.5833, &params).unwrap_err();
        assert!(err.is_no_event());
        assert!(matches!(
            err,
            HeliographError::NoEvent {
                event: EventKind::Rise,
                ..
            }
        ));
        assert!(set(fixed(10.0, -5.0), &location, 2459144.5, -0.5833, &params)
            .unwrap_err()
            .is_no_event());

        // the transit still exists
        let t = transit(fixed(10.0, -5.0), &location, 2459144.5, &params).unwrap();
        assert!(t.converged);

        let day = rise_set_transit(fixed(10.0, -5.0), &location, 2459144.5, -0.5833, &params)
            .unwrap();
        assert!(day.rise.is_none() && day.set.is_none());
    }

    #[test]
    fn test_fixed_star_symmetric_around_transit() {
        let location = Location::at(45.0, 10.0).unwrap();
        let params = RiseSetParams::builder().max_iterations(10).build().unwrap();
        let day = rise_set_transit(fixed(120.0, 20.0), &location, 2459144.5, -0.5667, &params)
            .unwrap();
        let (rise, set) = (day.rise.unwrap(), day.set.unwrap());
        assert!(rise.converged && day.transit.converged && set.converged);

        // H0 expressed in sidereal time, both sides of the transit
        let before = frac(day.transit.jd - rise.jd);
        let after = frac(set.jd - day.transit.jd);
        assert_relative_eq!(before, after, epsilon = 1e-5);
    }

    #[test]
    fn test_position_errors_are_propagated() {
        let location = Location::at(45.0, 0.0).unwrap();
        let failing = |_: JulianDay| -> Result<EquatorialSphericalCoordinates, HeliographError> {
            Err(HeliographError::OrbitalModel("offline".into()))
        };
        assert_eq!(
            transit(failing, &location, 2459144.5, &RiseSetParams::default()),
            Err(HeliographError::OrbitalModel("offline".into()))
        );
    }

    #[test]
    fn test_iteration_bound_is_soft() {
        let location = Location::at(45.0, 10.0).unwrap();
        let params = RiseSetParams::builder()
            .max_iterations(1)
            .tolerance_days(1e-15)
            .build()
            .unwrap();
        let t = transit(fixed(120.0, 20.0), &location, 2459144.5, &params).unwrap();
        assert!(!t.converged);
        assert_eq!(t.iterations, 1);
    }
}
