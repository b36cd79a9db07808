//! Geographic extent type definitions

use std::fmt;

/// Valid longitude range in degrees
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Valid latitude range in degrees
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Detail level range for raster sources (tile-tree depth)
pub const MIN_LEVEL: u8 = 0;
pub const MAX_LEVEL: u8 = 30;

/// Axis-aligned geographic rectangle with closed bounds.
///
/// Coordinates are interpreted in the caller's reference system; the
/// compositing engine uses degrees. Invariant: `min <= max` on both axes,
/// enforced by [`Extents::new`]. Zero-width or zero-height extents are
/// legal and represent lines or points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Western edge
    pub min_lon: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl Extents {
    /// The whole geographic world.
    pub const WORLD: Extents = Extents {
        min_lon: MIN_LON,
        min_lat: MIN_LAT,
        max_lon: MAX_LON,
        max_lat: MAX_LAT,
    };

    /// Creates a new extents rectangle.
    ///
    /// Returns an error unless `min <= max` holds on both axes; NaN
    /// bounds never satisfy the comparison and are rejected with it.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, ExtentsError> {
        if !(min_lon <= max_lon) {
            return Err(ExtentsError::InvertedLongitude(min_lon, max_lon));
        }
        if !(min_lat <= max_lat) {
            return Err(ExtentsError::InvertedLatitude(min_lat, max_lat));
        }
        Ok(Extents {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Width of the rectangle in coordinate units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the rectangle in coordinate units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Tests whether two extents overlap.
    ///
    /// Closed-interval test: extents that share only an edge or a corner
    /// do intersect. Consequently a degenerate extents (zero width or
    /// height) intersects exactly the rectangles it touches.
    #[inline]
    pub fn intersects(&self, other: &Extents) -> bool {
        !(self.max_lon < other.min_lon
            || other.max_lon < self.min_lon
            || self.max_lat < other.min_lat
            || other.max_lat < self.min_lat)
    }

    /// Tests whether a point lies inside the rectangle (closed bounds).
    #[inline]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Smallest extents containing both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Extents) -> Extents {
        Extents {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

/// Errors that can occur constructing extents.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtentsError {
    /// Longitude bounds fail `min <= max` (inverted or NaN)
    InvertedLongitude(f64, f64),
    /// Latitude bounds fail `min <= max` (inverted or NaN)
    InvertedLatitude(f64, f64),
}

impl fmt::Display for ExtentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtentsError::InvertedLongitude(min, max) => {
                write!(f, "Longitude bounds out of order: min {}, max {}", min, max)
            }
            ExtentsError::InvertedLatitude(min, max) => {
                write!(f, "Latitude bounds out of order: min {}, max {}", min, max)
            }
        }
    }
}

impl std::error::Error for ExtentsError {}
