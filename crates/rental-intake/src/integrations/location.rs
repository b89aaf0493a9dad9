use crate::intake::{Coordinates, LocationError, LocationProvider};

/// Location as reported by whoever holds the device: the browser over HTTP,
/// or flags on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedLocation {
    Position(Coordinates),
    Denied(String),
    Unsupported,
}

impl LocationProvider for ReportedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self {
            ReportedLocation::Position(coordinates) => Ok(*coordinates),
            ReportedLocation::Denied(reason) => Err(LocationError::Unavailable {
                reason: reason.clone(),
            }),
            ReportedLocation::Unsupported => Err(LocationError::Unsupported),
        }
    }
}
