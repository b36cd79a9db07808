//! Bounds-checked binary cursor
//!
//! WKB interleaves byte-order flags with multi-byte integers and doubles,
//! and nested geometries may switch endianness mid-buffer. The cursor owns
//! the single read offset for a decode and takes the byte order as a
//! parameter on every multi-byte read, so no ordering state is carried
//! between reads.

use super::error::WkbError;

/// Byte order of multi-byte values in a WKB stream.
///
/// The wire flag is 0 for big-endian (XDR) and 1 for little-endian (NDR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Resolves the flag byte that leads every geometry.
    pub fn from_flag(flag: u8) -> Result<Self, WkbError> {
        match flag {
            0 => Ok(ByteOrder::Big),
            1 => Ok(ByteOrder::Little),
            other => Err(WkbError::InvalidByteOrder { flag: other }),
        }
    }
}

/// Advancing read position over a borrowed WKB buffer.
///
/// All reads are bounds-checked and fail with [`WkbError::Truncated`]
/// without moving the offset. There is no seek or rewind: decoding is a
/// single forward pass.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        ByteCursor { buffer, offset: 0 }
    }

    /// Current read position in bytes from the start of the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left between the read position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], WkbError> {
        if self.remaining() < needed {
            return Err(WkbError::Truncated {
                offset: self.offset,
                needed,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buffer[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(bytes)
    }

    /// Reads the next single byte.
    pub fn read_u8(&mut self) -> Result<u8, WkbError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a 32-bit unsigned integer in the given byte order.
    pub fn read_u32(&mut self, order: ByteOrder) -> Result<u32, WkbError> {
        let b = self.take(4)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Ok(match order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        })
    }

    /// Reads a 64-bit IEEE 754 double in the given byte order.
    pub fn read_f64(&mut self, order: ByteOrder) -> Result<f64, WkbError> {
        let b = self.take(8)?;
        let bytes = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
        Ok(match order {
            ByteOrder::Big => f64::from_be_bytes(bytes),
            ByteOrder::Little => f64::from_le_bytes(bytes),
        })
    }
}
