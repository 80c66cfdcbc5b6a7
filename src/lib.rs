//! # heliograph
//!
//! Positions of the Sun as seen from the Earth, computed from the VSOP87 theory:
//! geocentric and topocentric coordinates in several frames, apparent corrections
//! (aberration, nutation, refraction), distance and angular size, and the daily rise,
//! transit and set times.
//!
//! The entry point is [`ephemeris::Ephemeris`], generic over the observed [`body::Body`]
//! and the Earth [`orbital_model::OrbitalModel`].
//!
//! ## See also
//! * [`rise_set_transit`] – the iterative event solver and its parameters.
//! * [`coordinates`] – coordinate types and frame conversions.
pub mod body;
pub mod constants;
pub mod conversion;
pub mod coordinates;
pub mod corrections;
pub mod earth_orientation;
pub mod ephemeris;
pub mod heliograph_errors;
pub mod location;
pub mod observation;
pub mod orbital_model;
pub mod rise_set_transit;
pub mod time;

pub use body::{Body, Sun};
pub use ephemeris::{Ephemeris, Equinox};
pub use heliograph_errors::HeliographError;
pub use location::Location;
pub use time::TimeOfInterest;
