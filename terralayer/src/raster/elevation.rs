//! Elevation compositor
//!
//! Merges an ordered stack of elevation sources into a height grid. The
//! traversal matches the color compositor; the merge does not blend.
//! Later children overwrite earlier values cell by cell, except where a
//! child's sample carries its declared no-data marker, which leaves the
//! accumulated value alone. Alpha channels are ignored for heights.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::coord::Extents;

use super::grid::{SampleGrid, NO_DATA};
use super::group::{each_contribution, union_of};
use super::pixel::{ChannelLayout, PixelBuffer, PixelData};
use super::source::{RasterSource, SampleError, SampleRequest};

/// Ordered stack of elevation sources.
pub struct ElevationGroup {
    name: String,
    children: Vec<Arc<dyn RasterSource>>,
    extents: Option<Extents>,
    visible: bool,
}

impl ElevationGroup {
    pub fn new(name: impl Into<String>) -> Self {
        ElevationGroup {
            name: name.into(),
            children: Vec::new(),
            extents: None,
            visible: true,
        }
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

    /// Composites every qualifying child over a grid seeded with
    /// [`NO_DATA`].
    ///
    /// The grid is allocated on the first contribution; zero
    /// contributions yield `Ok(None)`, never an all-sentinel grid.
    pub fn composite(
        &self,
        request: &SampleRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<SampleGrid>, SampleError> {
        let mut canvas: Option<SampleGrid> = None;

        each_contribution(&self.name, &self.children, request, cancel, |_, buffer| {
            let grid = canvas
                .get_or_insert_with(|| SampleGrid::filled(request.width, request.height, NO_DATA));
            merge_into(grid, buffer);
        })?;

        debug!(
            group = %self.name,
            contributed = canvas.is_some(),
            "Elevation composite finished"
        );
        Ok(canvas)
    }

    /// Height at a single point, preferring the topmost source.
    ///
    /// Children are consulted top-down with a one-cell request; the
    /// first valid (non no-data) sample wins. `Ok(None)` when nothing
    /// covers the point.
    pub fn elevation_at(
        &self,
        lon: f64,
        lat: f64,
        level: u8,
        cancel: &CancellationToken,
    ) -> Result<Option<f32>, SampleError> {
        let extent = Extents {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        };
        let request = SampleRequest::new(extent, 1, 1, level);

        for child in self.children.iter().rev() {
            if cancel.is_cancelled() {
                return Err(SampleError::Cancelled);
            }
            if !child.is_visible()
                || !child.supports_level(level)
                || !child.extents().contains(lon, lat)
            {
                continue;
            }

            match child.sample(&request, cancel) {
                Ok(Some(buffer)) => {
                    if buffer.width != 1 || buffer.height != 1 || !buffer.is_consistent() {
                        warn!(
                            group = %self.name,
                            layer = child.name(),
                            "Point sample has the wrong shape, skipping"
                        );
                        continue;
                    }
                    let value = buffer.value(0, 0);
                    if !buffer.is_no_data_value(value) {
                        return Ok(Some(value));
                    }
                }
                Ok(None) => {}
                Err(SampleError::Cancelled) => return Err(SampleError::Cancelled),
                Err(err) => {
                    warn!(
                        group = %self.name,
                        layer = child.name(),
                        error = %err,
                        "Point sample failed, skipping"
                    );
                }
            }
        }
        Ok(None)
    }
}

/// Overwrite merge: every non no-data child cell replaces the canvas
/// cell; sentinel cells keep whatever an earlier child wrote.
fn merge_into(grid: &mut SampleGrid, buffer: &PixelBuffer) {
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let value = buffer.value(row, col);
            if buffer.is_no_data_value(value) {
                continue;
            }
            grid.set(row, col, value);
        }
    }
}

impl RasterSource for ElevationGroup {
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

    /// Composites the subtree to a float buffer declaring [`NO_DATA`] as
    /// its marker, so nested elevation groups merge like leaf sources.
    fn sample(
        &self,
        request: &SampleRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<PixelBuffer>, SampleError> {
        let grid = self.composite(request, cancel)?;
        Ok(grid.map(|grid| {
            PixelBuffer::new(
                request.width,
                request.height,
                ChannelLayout::Value,
                PixelData::F32(grid.into_values()),
            )
            .with_no_data(NO_DATA)
        }))
    }
}
