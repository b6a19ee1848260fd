//! The grid oracle trait and its in-memory implementation.

use crate::error::GridError;
use crate::loc::{GridDims, GridLoc};
use std::collections::{BTreeMap, HashMap};

/// What the grid holds at one location: a tile and its sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInfo {
    /// Where the tile sits.
    pub loc: GridLoc,
    /// The tile type string (e.g., "CLBLL_L", "PCIE_INT_INTERFACE_L").
    pub tile_type: String,
    /// Sites within this tile, mapping site name to site type.
    pub sites: BTreeMap<String, String>,
}

impl GridInfo {
    /// Creates a tile entry with no sites.
    pub fn new(grid_x: u32, grid_y: u32, tile_type: &str) -> Self {
        Self {
            loc: GridLoc::new(grid_x, grid_y),
            tile_type: tile_type.to_string(),
            sites: BTreeMap::new(),
        }
    }

    /// Adds a site to this entry.
    pub fn with_site(mut self, site_name: &str, site_type: &str) -> Self {
        self.sites.insert(site_name.to_string(), site_type.to_string());
        self
    }
}

/// Read-only queries against a device grid.
///
/// Implementations make no ordering promise for [`tiles`](Self::tiles);
/// callers that depend on scan order must sort.
pub trait GridOracle {
    /// Returns the names of all tiles in the grid.
    fn tiles(&self) -> Vec<&str>;

    /// Returns the location of the named tile.
    fn loc_of_tilename(&self, tile_name: &str) -> Result<GridLoc, GridError>;

    /// Returns the tile at `loc`, or `None` for a hole in the grid.
    fn gridinfo_at_loc(&self, loc: GridLoc) -> Option<&GridInfo>;

    /// Returns the inclusive extent of the grid.
    fn dims(&self) -> GridDims;
}

/// A device grid held in memory.
#[derive(Debug, Clone)]
pub struct Grid {
    tiles: BTreeMap<String, GridInfo>,
    by_loc: HashMap<GridLoc, String>,
    dims: GridDims,
}

impl Grid {
    /// Builds a grid from tile entries keyed by tile name.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateLoc`] if two tiles share a location.
    pub fn new(tiles: BTreeMap<String, GridInfo>) -> Result<Self, GridError> {
        let mut by_loc = HashMap::with_capacity(tiles.len());
        for (name, info) in &tiles {
            if let Some(first) = by_loc.insert(info.loc, name.clone()) {
                return Err(GridError::DuplicateLoc {
                    loc: info.loc,
                    first,
                    second: name.clone(),
                });
            }
        }
        let dims = GridDims::covering(tiles.values().map(|info| info.loc));
        Ok(Self {
            tiles,
            by_loc,
            dims,
        })
    }

    /// Returns the number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns whether the grid has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the entry for a tile by name.
    pub fn tile(&self, tile_name: &str) -> Option<&GridInfo> {
        self.tiles.get(tile_name)
    }
}

impl GridOracle for Grid {
    fn tiles(&self) -> Vec<&str> {
        self.tiles.keys().map(String::as_str).collect()
    }

    fn loc_of_tilename(&self, tile_name: &str) -> Result<GridLoc, GridError> {
        self.tile(tile_name)
            .map(|info| info.loc)
            .ok_or_else(|| GridError::UnknownTile(tile_name.to_string()))
    }

    fn gridinfo_at_loc(&self, loc: GridLoc) -> Option<&GridInfo> {
        self.by_loc.get(&loc).and_then(|name| self.tiles.get(name))
    }

    fn dims(&self) -> GridDims {
        self.dims
    }
}
