//! # Constants and type definitions for Heliograph
//!
//! This module centralizes the **physical constants**, **conversion factors**, **standard
//! altitudes** and **common type aliases** used throughout the `heliograph` library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (AU, speed of light, Earth ellipsoid)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ degrees, days ↔ seconds)
//! - Physical constants of the Sun (diameter, visual magnitude)
//! - Standard altitudes targeted by the rise/set solver
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const JD2000: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Arcseconds → degrees
pub const ARCSEC_TO_DEG: f64 = 1.0 / 3600.0;

/// Earth equatorial radius in meters (WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Rotation rate of the Earth with respect to the equinox, in degrees per solar day
pub const SIDEREAL_RATE: Degree = 360.985647;

// -------------------------------------------------------------------------------------------------
// Sun
// -------------------------------------------------------------------------------------------------

/// Mean diameter of the solar photosphere in kilometers
pub const DIAMETER_SUN: Kilometer = 1_392_684.0;

/// Visual apparent magnitude of the Sun seen from the Earth
pub const SUN_APPARENT_MAGNITUDE: f64 = -26.74;

// -------------------------------------------------------------------------------------------------
// Standard altitudes (degrees) for the rise/set solver
// -------------------------------------------------------------------------------------------------

/// Geometric altitude of a point-like body on the apparent horizon (mean refraction 34′)
pub const STANDARD_ALTITUDE_STARS_REFRACTION: Degree = -0.5667;

/// Center of the solar disk on the apparent horizon
pub const STANDARD_ALTITUDE_SUN_CENTER_REFRACTION: Degree = -0.5833;

/// Upper limb of the solar disk on the apparent horizon (refraction + semi-diameter)
pub const STANDARD_ALTITUDE_SUN_UPPER_LIMB_REFRACTION: Degree = -0.8333;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Date (days)
pub type JulianDay = f64;
/// Duration in seconds
pub type Seconds = f64;
