//! Composited sample grid

/// Marker for grid cells no source has written.
///
/// Elevation composites seed their output with this value; color
/// composites seed with 0.0 and never produce it. Comparison against the
/// marker is exact, [`SampleGrid::is_no_data`].
pub const NO_DATA: f32 = f32::MIN;

/// Row-major grid of canonical `f32` samples.
///
/// The answer type of a composite pass: one value per requested cell,
/// row 0 along the northern edge of the requested extent.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl SampleGrid {
    /// Creates a grid with every cell set to `fill`.
    pub fn filled(width: u32, height: u32, fill: f32) -> Self {
        SampleGrid {
            width,
            height,
            values: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value at (row, col). Panics when the cell is out of range.
    #[inline]
    pub fn value(&self, row: u32, col: u32) -> f32 {
        self.values[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: f32) {
        let index = self.index(row, col);
        self.values[index] = value;
    }

    /// Flat row-major view of all cells.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Consumes the grid, returning its backing storage.
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// Whether `value` is the crate no-data marker.
    #[inline]
    pub fn is_no_data(value: f32) -> bool {
        value == NO_DATA
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width);
        (row as usize) * (self.width as usize) + (col as usize)
    }
}
