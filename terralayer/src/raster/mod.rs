//! Raster sources and compositors
//!
//! The raster layer tree has two node kinds: leaf sources that answer
//! sample requests from their own backing data, and groups that merge an
//! ordered child stack into one answer. Both implement [`RasterSource`],
//! so trees nest to any depth:
//!
//! ```text
//!   RasterGroup "map"
//!   ├── MemorySource "satellite base"
//!   ├── RasterGroup "weather"
//!   │   ├── MemorySource "cloud cover"
//!   │   └── MemorySource "radar"
//!   └── MemorySource "annotations"
//! ```
//!
//! Color stacks composite through [`RasterGroup`] (alpha blending),
//! height stacks through [`ElevationGroup`] (overwrite with no-data
//! fall-through). Both answer in canonical `f32` via [`SampleGrid`].

mod elevation;
mod grid;
mod group;
mod memory;
mod pixel;
mod source;

pub use elevation::ElevationGroup;
pub use grid::{SampleGrid, NO_DATA};
pub use group::RasterGroup;
pub use memory::MemorySource;
pub use pixel::{ChannelLayout, PixelBuffer, PixelData, PixelEncoding};
pub use source::{RasterSource, SampleError, SampleRequest};
