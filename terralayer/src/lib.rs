//! TerraLayer - Geospatial data core for layered raster and vector sources
//!
//! This library provides the data backbone of a GIS viewer: a decoder for
//! OGC Well-Known Binary (WKB) vector geometry and a compositing engine
//! that merges an ordered stack of raster or elevation sources into a
//! single sample grid for a requested geographic extent.
//!
//! # High-Level API
//!
//! ```ignore
//! use terralayer::coord::Extents;
//! use terralayer::raster::{RasterGroup, SampleRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let mut group = RasterGroup::new("basemap");
//! group.append(satellite_layer);
//! group.append(street_overlay);
//!
//! let request = SampleRequest::new(Extents::new(-1.0, -1.0, 1.0, 1.0)?, 256, 256, 7);
//! let grid = group.composite(&request, &CancellationToken::new())?;
//! ```
//!
//! Vector geometry arrives as raw WKB bytes and decodes into a tagged
//! [`wkb::Geometry`] value:
//!
//! ```ignore
//! let geometry = terralayer::wkb::decode(&bytes)?;
//! ```

pub mod coord;
pub mod raster;
pub mod wkb;

/// Version of the TerraLayer library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
