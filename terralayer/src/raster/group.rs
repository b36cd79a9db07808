//! Ordered raster compositor
//!
//! Merges an ordered stack of raster sources into one sample grid per
//! request. Children composite bottom-to-top in append order (painter's
//! algorithm):
//!
//! ```text
//!   append order:  [base, weather, annotations]
//!   paint order:    base first ... annotations last (wins overlaps)
//! ```
//!
//! A group is itself a [`RasterSource`], so stacks nest into trees; a
//! composite pass walks the tree depth-first in child order. The child
//! list is only mutable through `&mut self`, which keeps a running pass
//! structurally stable without any locking.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::coord::Extents;

use super::grid::SampleGrid;
use super::pixel::{ChannelLayout, PixelBuffer, PixelData};
use super::source::{RasterSource, SampleError, SampleRequest};

/// Walks `children` in order and hands every valid contribution to
/// `apply`, bottom child first.
///
/// Cancellation is polled before each child and propagates immediately,
/// discarding any partial accumulation. A child that fails to sample or
/// returns a malformed buffer is logged and dropped; the walk continues
/// with the next child.
pub(super) fn each_contribution(
    group_name: &str,
    children: &[Arc<dyn RasterSource>],
    request: &SampleRequest,
    cancel: &CancellationToken,
    mut apply: impl FnMut(&dyn RasterSource, &PixelBuffer),
) -> Result<(), SampleError> {
    for child in children {
        if cancel.is_cancelled() {
            debug!(group = group_name, "Composite pass cancelled");
            return Err(SampleError::Cancelled);
        }

        if !child.is_visible()
            || !child.supports_level(request.level)
            || !request.extent.intersects(&child.extents())
        {
            continue;
        }

        let buffer = match child.sample(request, cancel) {
            Ok(Some(buffer)) => buffer,
            Ok(None) => continue,
            Err(SampleError::Cancelled) => return Err(SampleError::Cancelled),
            Err(err) => {
                warn!(
                    group = group_name,
                    layer = child.name(),
                    error = %err,
                    "Child sample failed, dropping its contribution"
                );
                continue;
            }
        };

        if buffer.width != request.width
            || buffer.height != request.height
            || !buffer.is_consistent()
        {
            error!(
                group = group_name,
                layer = child.name(),
                width = buffer.width,
                height = buffer.height,
                samples = buffer.data.len(),
                expected = buffer.expected_len(),
                "Child returned a malformed buffer, dropping its contribution"
            );
            continue;
        }

        apply(child.as_ref(), &buffer);
    }
    Ok(())
}

/// Union of child coverage, `None` when there are no children.
pub(super) fn union_of(children: &[Arc<dyn RasterSource>]) -> Option<Extents> {
    children.iter().fold(None, |acc, child| {
        Some(match acc {
            Some(extents) => extents.union(&child.extents()),
            None => child.extents(),
        })
    })
}

/// Painter's blend of one contribution over the accumulated canvas:
/// `dst = dst * (1 - a) + src * a`, with per-cell alpha scaled by the
/// contributing layer's opacity. Cells carrying the child's declared
/// no-data marker are transparent regardless of alpha.
fn blend_into(canvas: &mut SampleGrid, buffer: &PixelBuffer, layer_opacity: f32) {
    for row in 0..canvas.height() {
        for col in 0..canvas.width() {
            let alpha = buffer.alpha(row, col) * layer_opacity;
            if alpha <= 0.0 {
                continue;
            }
            let src = buffer.value(row, col);
            if buffer.is_no_data_value(src) {
                continue;
            }
            let dst = canvas.value(row, col);
            canvas.set(row, col, dst * (1.0 - alpha) + src * alpha);
        }
    }
}

/// Ordered stack of color raster sources.
pub struct RasterGroup {
    name: String,
    children: Vec<Arc<dyn RasterSource>>,
    extents: Option<Extents>,
    visible: bool,
    opacity: f32,
}

impl RasterGroup {
    pub fn new(name: impl Into<String>) -> Self {
        RasterGroup {
            name: name.into(),
            children: Vec::new(),
            extents: None,
            visible: true,
            opacity: 1.0,
        }
    }

    /// Opacity applied to the whole group when it nests inside another.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Appends a child at the top of the stack and folds its extents
    /// into the group coverage.
    pub fn append(&mut self, child: Arc<dyn RasterSource>) {
        self.extents = Some(match self.extents {
            Some(extents) => extents.union(&child.extents()),
            None => child.extents(),
        });
        self.children.push(child);
    }

    /// Removes and returns the child at `index`, recomputing coverage.
    pub fn remove(&mut self, index: usize) -> Option<Arc<dyn RasterSource>> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        self.extents = union_of(&self.children);
        Some(child)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&Arc<dyn RasterSource>> {
        self.children.get(index)
    }

    /// Union of child coverage, `None` while the group is empty.
    pub fn coverage(&self) -> Option<Extents> {
        self.extents
    }

    /// Composites every qualifying child over a canvas seeded with 0.0.
    ///
    /// The canvas is allocated on the first contribution; when nothing
    /// contributes the result is `Ok(None)`, never an empty grid. The
    /// pass is synchronous and reentrant: no state outlives the call.
    pub fn composite(
        &self,
        request: &SampleRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<SampleGrid>, SampleError> {
        let mut canvas: Option<SampleGrid> = None;

        each_contribution(&self.name, &self.children, request, cancel, |child, buffer| {
            let grid = canvas
                .get_or_insert_with(|| SampleGrid::filled(request.width, request.height, 0.0));
            blend_into(grid, buffer, child.opacity().clamp(0.0, 1.0));
        })?;

        debug!(
            group = %self.name,
            contributed = canvas.is_some(),
            "Color composite finished"
        );
        Ok(canvas)
    }
}

impl RasterSource for RasterGroup {
    fn name(&self) -> &str {
        &self.name
    }

    /// Union of child coverage. An empty group reports world extents and
    /// samples to nothing.
    fn extents(&self) -> Extents {
        self.extents.unwrap_or(Extents::WORLD)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Composites the subtree into a float buffer of straight values with
    /// the accumulated child coverage as the alpha channel, so a nested
    /// group blends into its parent exactly like a leaf source.
    fn sample(
        &self,
        request: &SampleRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<PixelBuffer>, SampleError> {
        let cells = (request.width as usize) * (request.height as usize);
        let mut canvas: Option<(Vec<f32>, Vec<f32>)> = None;

        each_contribution(&self.name, &self.children, request, cancel, |child, buffer| {
            let (values, coverage) =
                canvas.get_or_insert_with(|| (vec![0.0; cells], vec![0.0; cells]));
            let layer_opacity = child.opacity().clamp(0.0, 1.0);

            for row in 0..request.height {
                for col in 0..request.width {
                    let alpha = buffer.alpha(row, col) * layer_opacity;
                    if alpha <= 0.0 {
                        continue;
                    }
                    let src = buffer.value(row, col);
                    if buffer.is_no_data_value(src) {
                        continue;
                    }
                    let index = (row as usize) * (request.width as usize) + (col as usize);
                    values[index] = values[index] * (1.0 - alpha) + src * alpha;
                    coverage[index] += alpha * (1.0 - coverage[index]);
                }
            }
        })?;

        Ok(canvas.map(|(values, coverage)| {
            let mut data = Vec::with_capacity(cells * 2);
            for (value, alpha) in values.iter().zip(&coverage) {
                // The accumulator holds coverage-weighted values; export
                // them straight so the parent's blend applies the alpha
                // channel exactly once
                data.push(if *alpha > 0.0 { *value / *alpha } else { 0.0 });
                data.push(*alpha);
            }
            PixelBuffer::new(
                request.width,
                request.height,
                ChannelLayout::ValueAlpha,
                PixelData::F32(data),
            )
        }))
    }
}
