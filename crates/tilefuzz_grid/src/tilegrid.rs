//! Parser for Project X-Ray `tilegrid.json` files.
//!
//! Only the fields the grid oracle needs are read: each tile's grid position,
//! type, and site assignments. Frame addressing data (`bits`) and any other
//! keys are ignored.

use crate::error::GridError;
use crate::grid::{Grid, GridInfo};
use crate::loc::GridLoc;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Raw JSON structure for a tile entry deserialization.
#[derive(Deserialize)]
struct RawTileEntry {
    grid_x: u32,
    grid_y: u32,
    #[serde(rename = "type")]
    tile_type: String,
    #[serde(default)]
    sites: BTreeMap<String, String>,
}

/// Parses a tilegrid JSON string into a [`Grid`].
///
/// # Errors
///
/// Returns [`GridError::Parse`] if the JSON is malformed and
/// [`GridError::DuplicateLoc`] if two tiles share a position.
pub fn parse_tilegrid(json: &str) -> Result<Grid, GridError> {
    let raw: HashMap<String, RawTileEntry> =
        serde_json::from_str(json).map_err(|e| GridError::Parse(e.to_string()))?;

    let tiles: BTreeMap<String, GridInfo> = raw
        .into_iter()
        .map(|(tile_name, entry)| {
            let info = GridInfo {
                loc: GridLoc::new(entry.grid_x, entry.grid_y),
                tile_type: entry.tile_type,
                sites: entry.sites,
            };
            (tile_name, info)
        })
        .collect();
    Grid::new(tiles)
}
