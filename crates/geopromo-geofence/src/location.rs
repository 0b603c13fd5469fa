use geopromo_core::Coordinate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classes a location provider may report instead of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationError {
    #[error("location access denied by user")]
    PermissionDenied,

    #[error("location information is unavailable")]
    Unavailable,

    #[error("location request timed out")]
    Timeout,
}

/// One delivery from a location provider.
pub type LocationSample = Result<Coordinate, LocationError>;

/// Advisory provider state exposed to consumers. Never blocks resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationStatus {
    /// No sample has been delivered yet.
    #[default]
    Unknown,
    Available,
    PermissionDenied,
    Unavailable,
    Timeout,
}

impl LocationStatus {
    #[must_use]
    pub fn is_available(self) -> bool {
        self == LocationStatus::Available
    }
}

impl From<LocationError> for LocationStatus {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => LocationStatus::PermissionDenied,
            LocationError::Unavailable => LocationStatus::Unavailable,
            LocationError::Timeout => LocationStatus::Timeout,
        }
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationStatus::Unknown => write!(f, "unknown"),
            LocationStatus::Available => write!(f, "available"),
            LocationStatus::PermissionDenied => write!(f, "permission-denied"),
            LocationStatus::Unavailable => write!(f, "unavailable"),
            LocationStatus::Timeout => write!(f, "timeout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_matching_status() {
        assert_eq!(
            LocationStatus::from(LocationError::PermissionDenied),
            LocationStatus::PermissionDenied
        );
        assert_eq!(
            LocationStatus::from(LocationError::Unavailable),
            LocationStatus::Unavailable
        );
        assert_eq!(
            LocationStatus::from(LocationError::Timeout),
            LocationStatus::Timeout
        );
    }

    #[test]
    fn error_deserializes_from_kebab_case() {
        let err: LocationError = serde_json::from_str("\"permission-denied\"").unwrap();
        assert_eq!(err, LocationError::PermissionDenied);
        assert_eq!(err.to_string(), "location access denied by user");
    }

    #[test]
    fn only_available_is_available() {
        assert!(LocationStatus::Available.is_available());
        assert!(!LocationStatus::Unknown.is_available());
        assert!(!LocationStatus::Timeout.is_available());
    }
}
