//! # Rise, set and transit times
//!
//! This module defines the [`RiseSetParams`] configuration struct with its builder, the
//! result types of the solver and re-exports the solver entry points from [`solver`].
//!
//! ## Algorithm overview
//!
//! The solver follows the classical three-day interpolation scheme (Meeus, ch. 15):
//!
//! 1. **Sampling**: the apparent geocentric right ascension and declination are computed
//!    at 0h UT of the day before, the day itself and the day after.
//! 2. **First estimate**: the transit is approximated from the apparent sidereal time at
//!    Greenwich Θ0; rise and set are placed at ± H0 around it, H0 being the hour angle at
//!    which the body reaches the standard altitude h0.
//! 3. **Refinement**: each estimate is corrected a bounded number of times, interpolating
//!    α and δ at the current fraction of day, until the correction drops below
//!    [`RiseSetParams::tolerance_days`].
//!
//! When `|cos H0| > 1` the body stays above (or below) the standard altitude the whole
//! day: rise and set report [`HeliographError::NoEvent`](crate::heliograph_errors::HeliographError::NoEvent).
//! Running out of iterations is not an error: the last estimate is returned with
//! [`EventTime::converged`] set to `false`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use heliograph::rise_set_transit::RiseSetParams;
//!
//! let params = RiseSetParams::builder()
//!     .max_iterations(5)
//!     .tolerance_days(1e-6)
//!     .delta_t_seconds(69.2)
//!     .build()
//!     .unwrap();
//! println!("{params:#}");
//! ```
pub mod solver;

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::JulianDay;
use crate::heliograph_errors::HeliographError;
use crate::time::TimeOfInterest;

pub use solver::{rise, rise_set_transit, set, transit};

/// Kind of event searched by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Rise,
    Transit,
    Set,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Rise => "rise",
            EventKind::Transit => "transit",
            EventKind::Set => "set",
        };
        write!(f, "{s}")
    }
}

/// Instant of an event found by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    pub kind: EventKind,
    /// Julian Day (UT) of the event.
    pub jd: JulianDay,
    /// Number of corrections applied.
    pub iterations: usize,
    /// `false` when the iteration bound was reached before the tolerance.
    pub converged: bool,
}

impl EventTime {
    pub fn to_time_of_interest(&self) -> Result<TimeOfInterest, HeliographError> {
        TimeOfInterest::from_julian_day(self.jd)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match TimeOfInterest::from_julian_day(self.jd) {
            Ok(toi) => write!(f, "{}: {} UT", self.kind, toi)?,
            Err(_) => write!(f, "{}: JD {}", self.kind, self.jd)?,
        }
        if !self.converged {
            write!(f, " (not converged after {} iterations)", self.iterations)?;
        }
        Ok(())
    }
}

/// Events of one day. `rise` and `set` are `None` when the body does not cross the standard
/// altitude that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayEvents {
    pub rise: Option<EventTime>,
    pub transit: EventTime,
    pub set: Option<EventTime>,
}

/// Tunable parameters of the rise/set/transit solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseSetParams {
    /// Maximum number of corrections applied to each estimate.
    pub max_iterations: usize,
    /// Stop as soon as a correction is smaller than this, in days.
    pub tolerance_days: f64,
    /// ΔT = TT − UT, in seconds, shifting the interpolation argument.
    pub delta_t_seconds: f64,
    /// Cap on one correction, in days, used when sin H is close to zero.
    pub max_correction_days: f64,
}

impl RiseSetParams {
    /// Same as [`RiseSetParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RiseSetParamsBuilder {
        RiseSetParamsBuilder::new()
    }
}

impl Default for RiseSetParams {
    fn default() -> Self {
        RiseSetParams {
            max_iterations: 3,
            tolerance_days: 1e-5,
            delta_t_seconds: 0.0,
            max_correction_days: 0.5,
        }
    }
}

/// Builder for [`RiseSetParams`].
#[derive(Debug, Clone)]
pub struct RiseSetParamsBuilder {
    params: RiseSetParams,
}

impl Default for RiseSetParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RiseSetParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: RiseSetParams::default(),
        }
    }

    pub fn max_iterations(mut self, v: usize) -> Self {
        self.params.max_iterations = v;
        self
    }
    pub fn tolerance_days(mut self, v: f64) -> Self {
        self.params.tolerance_days = v;
        self
    }
    pub fn delta_t_seconds(mut self, v: f64) -> Self {
        self.params.delta_t_seconds = v;
        self
    }
    pub fn max_correction_days(mut self, v: f64) -> Self {
        self.params.max_correction_days = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff a <= b and comparable (i.e., not NaN).
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(std::cmp::Ordering::Less) | Some(Equal))
    }

    /// Validate and produce the parameters.
    ///
    /// Validation rules
    /// -----------------
    /// * `max_iterations ≥ 1`
    /// * `tolerance_days > 0`
    /// * `0 < max_correction_days ≤ 1`
    /// * `delta_t_seconds` finite
    pub fn build(self) -> Result<RiseSetParams, HeliographError> {
        let p = &self.params;

        if p.max_iterations == 0 {
            return Err(HeliographError::InvalidSolverParameter(
                "max_iterations must be >= 1".into(),
            ));
        }
        if !Self::gt0(p.tolerance_days) {
            return Err(HeliographError::InvalidSolverParameter(
                "tolerance_days must be > 0".into(),
            ));
        }
        if !(Self::gt0(p.max_correction_days) && Self::le(p.max_correction_days, 1.0)) {
            return Err(HeliographError::InvalidSolverParameter(
                "require 0 < max_correction_days <= 1".into(),
            ));
        }
        if !p.delta_t_seconds.is_finite() {
            return Err(HeliographError::InvalidSolverParameter(
                "delta_t_seconds must be finite".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for RiseSetParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Rise/Set/Transit Solver Parameters")?;
            writeln!(f, "----------------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "max_iterations      = {}",
                self.max_iterations,
                "Corrections applied per estimate"
            )?;
            line!(
                "tolerance_days      = {:.1e} d",
                self.tolerance_days,
                "Early exit threshold on |Δm|"
            )?;
            line!(
                "delta_t_seconds     = {:.1} s",
                self.delta_t_seconds,
                "TT − UT added to the interpolation argument"
            )?;
            line!(
                "max_correction_days = {:.3} d",
                self.max_correction_days,
                "Cap on |Δm| near sin H = 0"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "RiseSetParams(max_iterations={}, tolerance={:.1e}d, ΔT={:.1}s, max_correction={:.3}d)",
                self.max_iterations,
                self.tolerance_days,
                self.delta_t_seconds,
                self.max_correction_days
            )
        }
    }
}
