use thiserror::Error;

use crate::rise_set_transit::EventKind;

#[derive(Error, Debug, Clone)]
pub enum HeliographError {
    #[error("No {event} on this day (cos H0 = {cos_h0:.6}, body is circumpolar or never rises)")]
    NoEvent { event: EventKind, cos_h0: f64 },

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid time of interest: {0}")]
    InvalidTime(String),

    #[error("Invalid rise/set solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Orbital model failure: {0}")]
    OrbitalModel(String),
}

impl PartialEq for HeliographError {
    fn eq(&self, other: &Self) -> bool {
        use HeliographError::*;
        match (self, other) {
            // cos H0 is a diagnostic payload, only the event is compared
            (NoEvent { event: a, .. }, NoEvent { event: b, .. }) => a == b,

            (InvalidLocation(a), InvalidLocation(b)) => a == b,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (InvalidTime(a), InvalidTime(b)) => a == b,
            (InvalidSolverParameter(a), InvalidSolverParameter(b)) => a == b,
            (OrbitalModel(a), OrbitalModel(b)) => a == b,

            _ => false,
        }
    }
}

impl HeliographError {
    /// True when the error only states that a rise or set does not happen on the requested day.
    pub fn is_no_event(&self) -> bool {
        matches!(self, HeliographError::NoEvent { .. })
    }
}
