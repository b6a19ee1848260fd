//! Grid coordinates and extents.

use std::fmt;

/// A tile position on the device grid.
///
/// `grid_x` grows to the right. `grid_y` is opaque beyond ordinary integer
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridLoc {
    /// Column position.
    pub grid_x: u32,
    /// Row position.
    pub grid_y: u32,
}

impl GridLoc {
    /// Creates a location from a column and a row.
    pub fn new(grid_x: u32, grid_y: u32) -> Self {
        Self { grid_x, grid_y }
    }
}

impl fmt::Display for GridLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.grid_x, self.grid_y)
    }
}

/// Inclusive extent of a grid, as reported by [`GridOracle::dims`](crate::GridOracle::dims).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridDims {
    /// Smallest column holding a tile.
    pub x_min: u32,
    /// Largest column holding a tile.
    pub x_max: u32,
    /// Smallest row holding a tile.
    pub y_min: u32,
    /// Largest row holding a tile.
    pub y_max: u32,
}

impl GridDims {
    /// Computes the extent covering every location in `locs`.
    ///
    /// An empty iterator yields an all-zero extent.
    pub fn covering(locs: impl IntoIterator<Item = GridLoc>) -> Self {
        let mut locs = locs.into_iter();
        let Some(first) = locs.next() else {
            return Self::default();
        };
        let mut dims = Self {
            x_min: first.grid_x,
            x_max: first.grid_x,
            y_min: first.grid_y,
            y_max: first.grid_y,
        };
        for loc in locs {
            dims.x_min = dims.x_min.min(loc.grid_x);
            dims.x_max = dims.x_max.max(loc.grid_x);
            dims.y_min = dims.y_min.min(loc.grid_y);
            dims.y_max = dims.y_max.max(loc.grid_y);
        }
        dims
    }
}
