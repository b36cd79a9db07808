//! Raster source capability trait

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::coord::{Extents, MAX_LEVEL, MIN_LEVEL};

use super::pixel::PixelBuffer;

/// Sampling failure, distinct from "does not cover".
///
/// A source that does not cover a request answers `Ok(None)`; these
/// variants mean a source that should have answered could not, or that
/// the caller asked the pass to stop.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The cancellation token fired; the pass stopped cooperatively
    #[error("Sampling cancelled")]
    Cancelled,

    /// The source failed to produce data it claims to cover
    #[error("Source failure: {message}")]
    Source { message: String },
}

/// One compositing query: footprint, output shape and detail level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRequest {
    /// Geographic footprint of the requested grid
    pub extent: Extents,
    /// Output cells east-west
    pub width: u32,
    /// Output cells north-south
    pub height: u32,
    /// Detail level of the tile tree
    pub level: u8,
}

impl SampleRequest {
    pub fn new(extent: Extents, width: u32, height: u32, level: u8) -> Self {
        SampleRequest {
            extent,
            width,
            height,
            level,
        }
    }
}

/// A raster data layer the compositing engine can query.
///
/// Implementations are handed around as `Arc<dyn RasterSource>` and must
/// be callable from any thread; groups of sources are themselves sources,
/// so layer trees nest.
pub trait RasterSource: Send + Sync {
    /// Human-readable source name, used in logs.
    fn name(&self) -> &str;

    /// Geographic coverage of this source.
    fn extents(&self) -> Extents;

    /// Lowest detail level this source answers.
    fn min_level(&self) -> u8 {
        MIN_LEVEL
    }

    /// Highest detail level this source answers.
    fn max_level(&self) -> u8 {
        MAX_LEVEL
    }

    /// Whether the source answers requests at `level`.
    fn supports_level(&self, level: u8) -> bool {
        level >= self.min_level() && level <= self.max_level()
    }

    /// Whether the source currently participates in compositing.
    fn is_visible(&self) -> bool {
        true
    }

    /// Layer-wide opacity in [0, 1], multiplied into per-cell alpha.
    fn opacity(&self) -> f32 {
        1.0
    }

    /// Produces samples covering the request, resampled by the source to
    /// exactly `request.width` by `request.height` cells.
    ///
    /// Returns `Ok(None)` when the source does not cover the requested
    /// extent; that is a normal outcome, not a failure.
    fn sample(
        &self,
        request: &SampleRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<PixelBuffer>, SampleError>;
}
