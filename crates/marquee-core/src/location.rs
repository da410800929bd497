//! Device location capability.

use thiserror::Error;

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
}

/// Source of the caller's current position.
pub trait LocationProvider {
    /// # Errors
    ///
    /// Returns [`LocationError::PermissionDenied`] when no position may be read.
    fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// A provider that answers with a position resolved up front, e.g. from
/// command-line flags or configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinate>);

impl FixedLocation {
    #[must_use]
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self(coordinate)
    }

    /// Prefer an explicit latitude/longitude pair, else the fallback.
    ///
    /// A half-specified pair counts as absent.
    #[must_use]
    pub fn resolve(
        latitude: Option<f64>,
        longitude: Option<f64>,
        fallback: Option<Coordinate>,
    ) -> Self {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self(Some(Coordinate::new(lat, lon))),
            _ => Self(fallback),
        }
    }
}

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Result<Coordinate, LocationError> {
        self.0.ok_or(LocationError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_pair_wins_over_fallback() {
        let loc = FixedLocation::resolve(Some(1.0), Some(2.0), Some(Coordinate::new(9.0, 9.0)));
        assert_eq!(loc.current_location(), Ok(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn half_pair_uses_fallback() {
        let loc = FixedLocation::resolve(Some(1.0), None, Some(Coordinate::new(9.0, 9.0)));
        assert_eq!(loc.current_location(), Ok(Coordinate::new(9.0, 9.0)));
    }

    #[test]
    fn nothing_available_is_permission_denied() {
        let loc = FixedLocation::resolve(None, None, None);
        assert_eq!(
            loc.current_location(),
            Err(LocationError::PermissionDenied)
        );
    }
}
