//! Well-Known Binary geometry module
//!
//! Provides a strict decoder for the seven 2D core types of the OGC WKB
//! format. Decoding is a single forward pass over a borrowed buffer:
//!
//! ```text
//!   [flag][type code][payload ...]
//!      1      4       per-type
//! ```
//!
//! Multi-part geometries nest complete child geometries, each with its
//! own byte-order flag, so one buffer may mix endianness. Encoding back
//! to WKB is intentionally not provided; this crate only consumes
//! geometry produced elsewhere.

mod cursor;
mod decoder;
mod error;
mod types;

pub use cursor::{ByteCursor, ByteOrder};
pub use decoder::decode;
pub use error::WkbError;
pub use types::{Geometry, Polygon, Ring, Vertex};
