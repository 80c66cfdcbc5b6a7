//! # Time of interest and sidereal time
//!
//! [`TimeOfInterest`] is the immutable instant every query of the crate is evaluated at.
//! It wraps a [`hifitime::Epoch`] in the UTC time scale and caches the two quantities used by
//! all astronomical series: the Julian Day and `T`, the Julian centuries since J2000.0.
//!
//! ## Time scale
//!
//! Julian Days are treated as Universal Time. No ΔT correction is applied to positions; the
//! rise/set solver accepts an optional ΔT through
//! [`RiseSetParams`](crate::rise_set_transit::RiseSetParams).
//!
//! ## See also
//! * [`gmst`] and [`apparent_sidereal_time`] – Earth rotation angle used by the
//!   equatorial → horizontal conversion and the rise/set solver.
use std::fmt;

use hifitime::{Epoch, TimeScale, Unit};
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, JulianDay, DAYS_PER_JULIAN_CENTURY, DPI, JD2000, JDTOMJD, SECONDS_PER_DAY,
};
use crate::coordinates::normalize_angle;
use crate::earth_orientation::equation_of_equinoxes;
use crate::heliograph_errors::HeliographError;

/// Calendar decomposition of a [`TimeOfInterest`], rounded to the nearest second (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.min, self.sec
        )
    }
}

/// An immutable instant, with its Julian Day and Julian centuries kept consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeOfInterest {
    epoch: Epoch,
    jd: JulianDay,
    t: f64,
}

impl TimeOfInterest {
    /// Build a time of interest from a Julian Day (UT).
    ///
    /// Arguments
    /// ---------
    /// * `jd`: the Julian Day, must be finite.
    ///
    /// Return
    /// ------
    /// * The time of interest, or [`HeliographError::InvalidTime`] for NaN/infinite input.
    pub fn from_julian_day(jd: JulianDay) -> Result<Self, HeliographError> {
        if !jd.is_finite() {
            return Err(HeliographError::InvalidTime(format!(
                "julian day must be finite, got {jd}"
            )));
        }
        Ok(Self {
            epoch: Epoch::from_jde_utc(jd),
            jd,
            t: julian_centuries(jd),
        })
    }

    /// Build a time of interest from a UTC calendar date and time of day.
    ///
    /// `sec` may carry a fractional part, it must lie in `[0, 60)`.
    pub fn from_time(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        min: u8,
        sec: f64,
    ) -> Result<Self, HeliographError> {
        if !(1..=12).contains(&month) {
            return Err(HeliographError::InvalidTime(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        let last_day = days_in_month(year, month);
        if day == 0 || day > last_day {
            return Err(HeliographError::InvalidTime(format!(
                "day must be in 1..={last_day} for {year}-{month:02}, got {day}"
            )));
        }
        if hour > 23 || min > 59 {
            return Err(HeliographError::InvalidTime(format!(
                "invalid time of day {hour:02}:{min:02}"
            )));
        }
        if !(0.0..60.0).contains(&sec) {
            return Err(HeliographError::InvalidTime(format!(
                "seconds must be in [0, 60), got {sec}"
            )));
        }

        let whole = sec.trunc();
        let nanos = ((sec - whole) * 1e9).round().min(999_999_999.0) as u32;
        let epoch = Epoch::from_gregorian(
            year,
            month,
            day,
            hour,
            min,
            whole as u8,
            nanos,
            TimeScale::UTC,
        );
        Ok(Self::from_epoch(epoch))
    }

    /// Build a time of interest from an existing UTC epoch.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let jd = epoch.to_jde_utc_days();
        Self {
            epoch,
            jd,
            t: julian_centuries(jd),
        }
    }

    /// Julian Day (UT).
    pub fn jd(&self) -> JulianDay {
        self.jd
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn julian_centuries(&self) -> f64 {
        self.t
    }

    /// Julian Day at 0h UT of the same calendar day.
    pub fn jd0(&self) -> JulianDay {
        (self.jd - 0.5).floor() + 0.5
    }

    /// Underlying `hifitime` epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Calendar form, rounded to the nearest whole second.
    pub fn time(&self) -> CalendarTime {
        let (year, month, day, hour, min, sec, _) =
            self.epoch.round(Unit::Second * 1).to_gregorian_utc();
        CalendarTime {
            year,
            month,
            day,
            hour,
            min,
            sec,
        }
    }

    /// New time of interest shifted by a number of days.
    pub fn add_days(&self, days: f64) -> Result<Self, HeliographError> {
        Self::from_julian_day(self.jd + days)
    }
}

impl fmt::Display for TimeOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} UT (JD {:.6})", self.time(), self.jd)
        } else {
            write!(f, "{}", self.time())
        }
    }
}

/// Julian centuries since J2000.0 for a Julian Day.
pub fn julian_centuries(jd: JulianDay) -> f64 {
    (jd - JD2000) / DAYS_PER_JULIAN_CENTURY
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Greenwich Mean Sidereal Time for a Julian Day (UT).
///
/// Implements the IAU 1982 polynomial for the mean sidereal time at 0h UT, then adds the
/// Earth rotation accumulated over the fraction of the day.
///
/// Arguments
/// ---------
/// * `jd`: Julian Day (UT).
///
/// Return
/// ------
/// * GMST in degrees, in `[0, 360)`.
pub fn gmst(jd: JulianDay) -> Degree {
    // GMST at 0h UT, in seconds of time
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // sidereal day / solar day
    const RAP: f64 = 1.00273790934;

    let mjd = jd - JDTOMJD;
    let day_start = mjd.floor();
    let t = (day_start + JDTOMJD - JD2000) / DAYS_PER_JULIAN_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;
    let gmst = gmst0 + (mjd - day_start) * DPI * RAP;

    normalize_angle(gmst.to_degrees())
}

/// Greenwich apparent sidereal time, GMST corrected by the equation of the equinoxes.
pub fn apparent_sidereal_time(jd: JulianDay) -> Degree {
    normalize_angle(gmst(jd) + equation_of_equinoxes(julian_centuries(jd)))
}

/// Local apparent sidereal time for an east-positive longitude in degrees.
pub fn local_apparent_sidereal_time(jd: JulianDay, longitude: Degree) -> Degree {
    normalize_angle(apparent_sidereal_time(jd) + longitude)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_time_reference_instant() {
        let toi = TimeOfInterest::from_time(2020, 10, 22, 6, 15, 0.0).unwrap();
        assert_relative_eq!(toi.jd(), 2459144.760416667, epsilon = 1e-8);
        assert_relative_eq!(toi.julian_centuries(), 0.20807010038785795, epsilon = 1e-12);
        assert_relative_eq!(toi.jd0(), 2459144.5, epsilon = 1e-12);
        assert_eq!(
            toi.time(),
            CalendarTime {
                year: 2020,
                month: 10,
                day: 22,
                hour: 6,
                min: 15,
                sec: 0
            }
        );
        assert_eq!(toi.to_string(), "2020-10-22 06:15:00");
    }

    #[test]
    fn test_from_julian_day_rounds_calendar_to_second() {
        // 10:50:45.6 UT
        let jd = 2459144.5 + (10.0 * 3600.0 + 50.0 * 60.0 + 45.6) / 86400.0;
        let toi = TimeOfInterest::from_julian_day(jd).unwrap();
        let time = toi.time();
        assert_eq!((time.hour, time.min, time.sec), (10, 50, 46));
        assert_eq!(toi.jd(), jd);
    }

    #[test]
    fn test_jd0_before_and_after_noon() {
        let morning = TimeOfInterest::from_julian_day(2459144.6).unwrap();
        let evening = TimeOfInterest::from_julian_day(2459145.4).unwrap();
        assert_eq!(morning.jd0(), 2459144.5);
        assert_eq!(evening.jd0(), 2459144.5);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(TimeOfInterest::from_julian_day(f64::NAN).is_err());
        assert!(TimeOfInterest::from_time(2021, 2, 29, 0, 0, 0.0).is_err());
        assert!(TimeOfInterest::from_time(2020, 2, 29, 0, 0, 0.0).is_ok());
        assert!(TimeOfInterest::from_time(2020, 13, 1, 0, 0, 0.0).is_err());
        assert!(TimeOfInterest::from_time(2020, 1, 1, 24, 0, 0.0).is_err());
        assert!(TimeOfInterest::from_time(2020, 1, 1, 0, 0, 60.0).is_err());
    }

    #[test]
    fn test_gmst() {
        // MJD 57028.478514610404
        let res_gmst = gmst(57028.478514610404 + JDTOMJD);
        assert_relative_eq!(res_gmst.to_radians(), 4.851925725092499, epsilon = 1e-9);

        let res_gmst = gmst(JD2000);
        assert_relative_eq!(res_gmst, 280.46061837, epsilon = 1e-6);
    }

    #[test]
    fn test_apparent_sidereal_time() {
        // Meeus, example 12.a: 1987 April 10, 0h UT
        let jd = 2446895.5;
        assert_relative_eq!(gmst(jd), 197.693195, epsilon = 1e-5);
        let ast = apparent_sidereal_time(jd);
        // 13h10m46.1351s
        assert_relative_eq!(ast, 197.692229, epsilon = 2e-5);

        let last = local_apparent_sidereal_time(jd, -170.0);
        assert_relative_eq!(last, 27.692229, epsilon = 2e-5);
    }
}
