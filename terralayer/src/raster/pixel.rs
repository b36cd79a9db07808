//! Native pixel encodings and canonical conversion
//!
//! Sources answer sample requests in whatever cell encoding their backing
//! data uses. Compositors convert every cell to a canonical `f32` at merge
//! time, so mixed stacks (8-bit imagery under 16-bit elevation under float
//! weather data) accumulate into one grid.

/// Relative tolerance when matching a source's declared no-data marker.
///
/// Values that crossed a lossy encoding round-trip still match their
/// sentinel; exact equality would let them slip through as real data.
const NO_DATA_TOLERANCE: f32 = 1e-5;

/// Native cell encoding of a source's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelEncoding {
    U8,
    U16,
    F32,
}

/// Channel layout of a sample buffer.
///
/// Alpha, when present, is the second channel of each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Value,
    ValueAlpha,
}

impl ChannelLayout {
    /// Channels per cell.
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            ChannelLayout::Value => 1,
            ChannelLayout::ValueAlpha => 2,
        }
    }
}

/// Raw sample storage in a source's native encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl PixelData {
    pub fn len(&self) -> usize {
        match self {
            PixelData::U8(v) => v.len(),
            PixelData::U16(v) => v.len(),
            PixelData::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn encoding(&self) -> PixelEncoding {
        match self {
            PixelData::U8(_) => PixelEncoding::U8,
            PixelData::U16(_) => PixelEncoding::U16,
            PixelData::F32(_) => PixelEncoding::F32,
        }
    }

    /// Canonical `f32` value of the sample at `index`.
    ///
    /// Unsigned 16-bit samples are reinterpreted as signed before
    /// widening: upstream WMS elevation servers label signed heights as
    /// unsigned 16-bit, and the reinterpretation keeps negative
    /// elevations intact. This is deliberate, not a decoding bug.
    #[inline]
    pub fn value_at(&self, index: usize) -> f32 {
        match self {
            PixelData::U8(v) => v[index] as f32,
            PixelData::U16(v) => (v[index] as i16) as f32,
            PixelData::F32(v) => v[index],
        }
    }

    /// Alpha of the sample at `index`, normalized to [0, 1].
    #[inline]
    pub fn alpha_at(&self, index: usize) -> f32 {
        match self {
            PixelData::U8(v) => v[index] as f32 / 255.0,
            PixelData::U16(v) => ((v[index] as i16) as f32 / 32767.0).clamp(0.0, 1.0),
            PixelData::F32(v) => v[index].clamp(0.0, 1.0),
        }
    }
}

/// One source's answer to a sample request, in its native encoding.
///
/// Construction does not validate that `data` matches the declared shape;
/// compositors check [`PixelBuffer::is_consistent`] and drop buffers that
/// lie about their dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub data: PixelData,
    /// The producing source's own no-data marker, in canonical units.
    pub no_data: Option<f32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, layout: ChannelLayout, data: PixelData) -> Self {
        PixelBuffer {
            width,
            height,
            layout,
            data,
            no_data: None,
        }
    }

    /// Declares the source's no-data marker for this buffer.
    pub fn with_no_data(mut self, no_data: f32) -> Self {
        self.no_data = Some(no_data);
        self
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.data.encoding()
    }

    /// Samples the buffer must hold for its declared shape.
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.layout.channels()
    }

    /// Whether the raw data length matches the declared shape.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.expected_len()
    }

    /// Canonical value of cell (row, col).
    #[inline]
    pub fn value(&self, row: u32, col: u32) -> f32 {
        self.data.value_at(self.cell_index(row, col))
    }

    /// Normalized alpha of cell (row, col): the second channel when the
    /// layout carries one, otherwise fully opaque.
    #[inline]
    pub fn alpha(&self, row: u32, col: u32) -> f32 {
        match self.layout {
            ChannelLayout::Value => 1.0,
            ChannelLayout::ValueAlpha => self.data.alpha_at(self.cell_index(row, col) + 1),
        }
    }

    /// Whether a converted cell value matches the buffer's declared
    /// no-data marker, within a relative tolerance. Buffers without a
    /// declared marker match nothing.
    #[inline]
    pub fn is_no_data_value(&self, value: f32) -> bool {
        match self.no_data {
            Some(no_data) => (value - no_data).abs() <= no_data.abs().max(1.0) * NO_DATA_TOLERANCE,
            None => false,
        }
    }

    #[inline]
    fn cell_index(&self, row: u32, col: u32) -> usize {
        ((row as usize) * (self.width as usize) + (col as usize)) * self.layout.channels()
    }
}
