//! In-memory raster source
//!
//! A concrete [`RasterSource`] backed by a native-resolution pixel buffer
//! held in memory. It answers any overlapping request by nearest-neighbor
//! resampling its native grid to the requested shape, which makes it both
//! the reference source implementation and the compositor test vehicle.
//! File- and network-backed sources live outside this crate and follow
//! the same contract.

use tokio_util::sync::CancellationToken;

use crate::coord::{Extents, MAX_LEVEL, MIN_LEVEL};

use super::pixel::{ChannelLayout, PixelBuffer, PixelData};
use super::source::{RasterSource, SampleError, SampleRequest};

/// Raster source over an owned native-resolution buffer.
///
/// Row 0 of the native buffer lies along the northern edge of the
/// source's extents.
pub struct MemorySource {
    name: String,
    extents: Extents,
    min_level: u8,
    max_level: u8,
    visible: bool,
    opacity: f32,
    buffer: PixelBuffer,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, extents: Extents, buffer: PixelBuffer) -> Self {
        MemorySource {
            name: name.into(),
            extents,
            min_level: MIN_LEVEL,
            max_level: MAX_LEVEL,
            visible: true,
            opacity: 1.0,
            buffer,
        }
    }

    /// Restricts the detail levels this source answers.
    pub fn with_levels(mut self, min_level: u8, max_level: u8) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Nearest-neighbor resample of one native plane onto the request
    /// grid. Request cells whose center falls outside the source extents
    /// keep `fill`.
    fn resample_plane<T: Copy>(&self, native: &[T], fill: T, request: &SampleRequest) -> Vec<T> {
        let channels = self.buffer.layout.channels();
        let out_width = request.width as usize;
        let out_height = request.height as usize;
        let native_width = self.buffer.width as usize;
        let native_height = self.buffer.height as usize;
        let mut out = vec![fill; out_width * out_height * channels];

        for row in 0..out_height {
            let lat = request.extent.max_lat
                - (row as f64 + 0.5) * request.extent.height() / out_height as f64;
            for col in 0..out_width {
                let lon = request.extent.min_lon
                    + (col as f64 + 0.5) * request.extent.width() / out_width as f64;
                if !self.extents.contains(lon, lat) {
                    continue;
                }

                // Native cell under the request cell's center
                let u = (lon - self.extents.min_lon) / self.extents.width();
                let v = (self.extents.max_lat - lat) / self.extents.height();
                let native_col = ((u * native_width as f64) as usize).min(native_width - 1);
                let native_row = ((v * native_height as f64) as usize).min(native_height - 1);

                let src = (native_row * native_width + native_col) * channels;
                let dst = (row * out_width + col) * channels;
                out[dst..dst + channels].copy_from_slice(&native[src..src + channels]);
            }
        }
        out
    }
}

impl RasterSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn extents(&self) -> Extents {
        self.extents
    }

    fn min_level(&self) -> u8 {
        self.min_level
    }

    fn max_level(&self) -> u8 {
        self.max_level
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Cells outside this source's coverage are transparent when the
    /// layout carries alpha, and the declared no-data value otherwise.
    fn sample(
        &self,
        request: &SampleRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<PixelBuffer>, SampleError> {
        if cancel.is_cancelled() {
            return Err(SampleError::Cancelled);
        }
        if !self.buffer.is_consistent() {
            return Err(SampleError::Source {
                message: format!(
                    "native buffer holds {} samples, shape declares {}",
                    self.buffer.data.len(),
                    self.buffer.expected_len()
                ),
            });
        }
        if self.buffer.width == 0 || self.buffer.height == 0 {
            return Ok(None);
        }
        if !request.extent.intersects(&self.extents) {
            return Ok(None);
        }

        let fill = match self.buffer.layout {
            ChannelLayout::ValueAlpha => 0.0,
            ChannelLayout::Value => self.buffer.no_data.unwrap_or(0.0),
        };

        let data = match &self.buffer.data {
            PixelData::U8(native) => {
                PixelData::U8(self.resample_plane(native, fill.clamp(0.0, 255.0) as u8, request))
            }
            PixelData::U16(native) => PixelData::U16(self.resample_plane(
                native,
                // Inverse of the signed-reinterpretation read path
                fill.clamp(i16::MIN as f32, i16::MAX as f32) as i16 as u16,
                request,
            )),
            PixelData::F32(native) => PixelData::F32(self.resample_plane(native, fill, request)),
        };

        let mut out = PixelBuffer::new(request.width, request.height, self.buffer.layout, data);
        out.no_data = self.buffer.no_data;
        Ok(Some(out))
    }
}
