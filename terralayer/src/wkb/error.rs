//! WKB decode error types

use thiserror::Error;

/// Errors that can occur while decoding WKB geometry.
///
/// Every variant is fatal for the decode in progress: the decoder never
/// returns a partially decoded geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WkbError {
    /// The buffer ended before a read completed
    #[error("Truncated buffer at offset {offset}: needed {needed} bytes, {remaining} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Geometry type code outside the supported range 1-7
    #[error("Unrecognized geometry type code {code}")]
    UnrecognizedType { code: u32 },

    /// Endianness flag byte other than 0 (big-endian) or 1 (little-endian)
    #[error("Invalid byte order flag {flag:#04x}")]
    InvalidByteOrder { flag: u8 },

    /// Polygon declared zero rings
    #[error("Polygon with no rings at offset {offset}")]
    EmptyPolygon { offset: usize },

    /// Typed multi-geometry contained a child of a different kind
    #[error("Expected {expected} child in multi-geometry, found {found}")]
    UnexpectedChild {
        expected: &'static str,
        found: &'static str,
    },
}
