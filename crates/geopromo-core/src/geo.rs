//! Geographic primitives: location samples, zone rectangles, and zones.
//!
//! Zones are axis-aligned latitude/longitude rectangles. Containment is a plain
//! comparison against the four edges, so results near the poles or across the
//! antimeridian are approximate by construction.

use serde::{Deserialize, Serialize};

/// A single location sample delivered by a location provider.
///
/// `accuracy` is the provider's reported radius of uncertainty in meters. It is
/// carried for consumers but never consulted by containment checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Returns `true` when both latitude and longitude are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A bare lat/lng pair, used for zone centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Rectangle edges in decimal degrees. Valid bounds satisfy
/// `north > south` and `east > west`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Inclusive containment on all four edges.
    ///
    /// NaN inputs compare false against every edge and therefore never match.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }

    /// Returns a description of the first violated invariant, if any.
    pub(crate) fn invalid_reason(&self) -> Option<String> {
        let edges = [self.north, self.south, self.east, self.west];
        if edges.iter().any(|e| !e.is_finite()) {
            return Some("bounds must be finite numbers".to_string());
        }
        if self.north <= self.south {
            return Some(format!(
                "north ({}) must be greater than south ({})",
                self.north, self.south
            ));
        }
        if self.east <= self.west {
            return Some(format!(
                "east ({}) must be greater than west ({})",
                self.east, self.west
            ));
        }
        None
    }
}

/// A named geofenced region that offers are bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub bounds: Bounds,
    pub center: GeoPoint,
    /// Advisory radius in meters for circular presentation. Not used for containment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Zone {
    #[must_use]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.bounds.contains(coordinate.latitude, coordinate.longitude)
    }
}
