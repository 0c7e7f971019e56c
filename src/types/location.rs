//! Geographical types produced by postal code lookups and consumed by archive requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use historical_temps::LatLon;
///
/// let seattle = LatLon(47.6114, -122.3305);
/// assert_eq!(seattle.0, 47.6114); // Latitude
/// assert_eq!(seattle.1, -122.3305); // Longitude
/// assert!(seattle.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }

    /// `false` when either coordinate is NaN or infinite, which is how an
    /// unresolvable postal code is reported.
    pub fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.0, self.1)
    }
}

/// The result of resolving a postal code.
///
/// Unknown postal codes are not an error at this level: they come back with NaN
/// coordinates and an empty `place_name`, see [`PostalPlace::unresolved`].
#[derive(Debug, Clone, PartialEq)]
pub struct PostalPlace {
    /// Coordinates of the postal code's centroid.
    pub coordinates: LatLon,
    /// Human readable place name (e.g. "Beverly Hills"), possibly empty.
    pub place_name: String,
}

impl PostalPlace {
    pub fn new(coordinates: LatLon, place_name: impl Into<String>) -> Self {
        Self {
            coordinates,
            place_name: place_name.into(),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            coordinates: LatLon(f64::NAN, f64::NAN),
            place_name: String::new(),
        }
    }
}
