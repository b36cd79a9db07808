//! Geographic extents module
//!
//! Provides the closed axis-aligned rectangle used to describe the
//! coverage of raster sources and the footprint of sample requests,
//! together with the level range raster sources may declare.

mod types;

#[cfg(test)]
mod tests;

pub use types::{Extents, ExtentsError, MAX_LAT, MAX_LEVEL, MAX_LON, MIN_LAT, MIN_LEVEL, MIN_LON};
