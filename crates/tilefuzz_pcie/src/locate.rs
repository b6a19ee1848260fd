//! Neighbor search around a target site.
//!
//! The search runs in two stages. First, among the aligned interface tiles at
//! or past the target's row, pick the one with the smallest row on each side
//! of the target column. Interface tiles hold no placeable logic, so the
//! second stage walks outward from each picked tile, one column at a time
//! along its row, until it reaches a tile with a logic site. That site is
//! where the probe LUT for that side gets pinned.

use crate::config::FixtureConfig;
use crate::error::LocateError;
use regex::Regex;
use tilefuzz_grid::{GridDims, GridLoc, GridOracle};

/// Which side of the target column a search runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Columns smaller than the target's.
    Left,
    /// Columns larger than the target's.
    Right,
}

/// An interface tile that passed the name and alignment filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The interface tile name.
    pub tile_name: String,
    /// Where the tile sits.
    pub loc: GridLoc,
}

/// One side of a resolved neighbor pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The interface tile the walk started from.
    pub interface_tile: String,
    /// The logic site the walk found.
    pub site: String,
}

/// The left and right anchors for one target site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborPair {
    /// Anchor found from the left interface tile.
    pub left: Anchor,
    /// Anchor found from the right interface tile.
    pub right: Anchor,
}

/// Resolves [`NeighborPair`]s against one grid.
///
/// The interface candidates do not depend on the target, so they are
/// filtered once at construction and kept in tile-name order.
pub struct NeighborLocator<'g, G: ?Sized> {
    grid: &'g G,
    logic_site_prefix: String,
    candidates: Vec<Candidate>,
}

impl<'g, G: GridOracle + ?Sized> NeighborLocator<'g, G> {
    /// Collects the aligned interface tiles of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::MalformedInterfaceTile`] if a tile carries the
    /// interface prefix but no `X<n>Y<n>` index.
    pub fn new(grid: &'g G, config: &FixtureConfig) -> Result<Self, LocateError> {
        let pattern = interface_pattern(&config.interface_tile_prefix)?;

        let mut names = grid.tiles();
        names.sort_unstable();

        let mut candidates = Vec::new();
        for name in names {
            if !name.starts_with(&config.interface_tile_prefix) {
                continue;
            }
            let row = interface_row_index(&pattern, name)?;
            if row.checked_rem(config.interface_row_modulus) != Some(0) {
                continue;
            }
            candidates.push(Candidate {
                tile_name: name.to_string(),
                loc: grid.loc_of_tilename(name)?,
            });
        }
        log::debug!("{} aligned interface tiles", candidates.len());

        Ok(Self {
            grid,
            logic_site_prefix: config.logic_site_prefix.clone(),
            candidates,
        })
    }

    /// The aligned interface tiles, in name order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Finds the left and right anchors for the site `target_site` at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::MissingLeftAnchor`] or
    /// [`LocateError::MissingRightAnchor`] if either side has no eligible
    /// interface tile or the walk from it finds no logic site.
    pub fn locate(&self, target: GridLoc, target_site: &str) -> Result<NeighborPair, LocateError> {
        let left = self
            .resolve_side(target, Side::Left)
            .ok_or_else(|| LocateError::MissingLeftAnchor {
                site: target_site.to_string(),
            })?;
        let right = self
            .resolve_side(target, Side::Right)
            .ok_or_else(|| LocateError::MissingRightAnchor {
                site: target_site.to_string(),
            })?;
        Ok(NeighborPair { left, right })
    }

    fn resolve_side(&self, target: GridLoc, side: Side) -> Option<Anchor> {
        let group = self.candidates.iter().filter(|c| {
            c.loc.grid_y >= target.grid_y
                && match side {
                    Side::Left => c.loc.grid_x < target.grid_x,
                    Side::Right => c.loc.grid_x > target.grid_x,
                }
        });
        let chosen = best_candidate(group)?;
        let site = nearest_anchor(self.grid, chosen.loc, side, &self.logic_site_prefix);
        if site.is_none() {
            log::debug!(
                "no {} reachable from {} at {}",
                self.logic_site_prefix,
                chosen.tile_name,
                chosen.loc
            );
        }
        Some(Anchor {
            interface_tile: chosen.tile_name.clone(),
            site: site?,
        })
    }
}

/// Picks the candidate with the smallest row.
///
/// Among candidates sharing that row, the first one yielded wins; callers
/// feed candidates in tile-name order.
pub fn best_candidate<'c>(
    candidates: impl IntoIterator<Item = &'c Candidate>,
) -> Option<&'c Candidate> {
    candidates.into_iter().min_by_key(|c| c.loc.grid_y)
}

/// Walks away from `from` along its row and returns the first logic site.
///
/// Left walks visit columns `x-1` down to `x_min+1`; right walks visit `x+1`
/// up to `x_max-1`. The outermost columns are never visited.
pub fn nearest_anchor<G: GridOracle + ?Sized>(
    grid: &G,
    from: GridLoc,
    side: Side,
    logic_site_prefix: &str,
) -> Option<String> {
    walk_columns(grid.dims(), from.grid_x, side)
        .into_iter()
        .find_map(|x| logic_site_at(grid, GridLoc::new(x, from.grid_y), logic_site_prefix))
}

fn walk_columns(dims: GridDims, from_x: u32, side: Side) -> Vec<u32> {
    match side {
        Side::Left => (dims.x_min.saturating_add(1)..from_x).rev().collect(),
        Side::Right => (from_x.saturating_add(1)..dims.x_max).collect(),
    }
}

fn logic_site_at<G: GridOracle + ?Sized>(grid: &G, loc: GridLoc, prefix: &str) -> Option<String> {
    grid.gridinfo_at_loc(loc)?
        .sites
        .keys()
        .find(|name| name.starts_with(prefix))
        .cloned()
}

fn interface_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{}.*X[0-9]+Y([0-9]+)", regex::escape(prefix)))
}

fn interface_row_index(pattern: &Regex, tile_name: &str) -> Result<u32, LocateError> {
    pattern
        .captures(tile_name)
        .and_then(|caps| caps.get(1))
        .and_then(|row| row.as_str().parse().ok())
        .ok_or_else(|| LocateError::MalformedInterfaceTile(tile_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tilefuzz_grid::{Grid, GridInfo};

    /// A 21x41 grid: target PCIE at (10, 20), corner tiles pinning the extent.
    fn base_tiles() -> BTreeMap<String, GridInfo> {
        let mut tiles = BTreeMap::new();
        tiles.insert("NULL_X0Y0".to_string(), GridInfo::new(0, 0, "NULL"));
        tiles.insert("NULL_X20Y40".to_string(), GridInfo::new(20, 40, "NULL"));
        tiles.insert(
            "PCIE_BOT_X10Y20".to_string(),
            GridInfo::new(10, 20, "PCIE_BOT").with_site("PCIE_X0Y0", "PCIE_2_1"),
        );
        tiles
    }

    fn add(tiles: &mut BTreeMap<String, GridInfo>, name: &str, x: u32, y: u32) {
        tiles.insert(name.to_string(), GridInfo::new(x, y, "INTERFACE"));
    }

    fn add_slice(tiles: &mut BTreeMap<String, GridInfo>, site: &str, x: u32, y: u32) {
        tiles.insert(
            format!("CLBLL_X{x}Y{y}"),
            GridInfo::new(x, y, "CLBLL_L").with_site(site, "SLICEL"),
        );
    }

    /// One aligned interface tile per side, each with a slice just outside it.
    fn simple_tiles() -> BTreeMap<String, GridInfo> {
        let mut tiles = base_tiles();
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X5Y50", 6, 20);
        add_slice(&mut tiles, "SLICE_X4Y50", 5, 20);
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        add_slice(&mut tiles, "SLICE_X9Y50", 15, 20);
        tiles
    }

    fn locate(tiles: BTreeMap<String, GridInfo>) -> Result<NeighborPair, LocateError> {
        let grid = Grid::new(tiles).unwrap();
        let config = FixtureConfig::default();
        let locator = NeighborLocator::new(&grid, &config)?;
        locator.locate(GridLoc::new(10, 20), "PCIE_X0Y0")
    }

    fn candidate(name: &str, x: u32, y: u32) -> Candidate {
        Candidate {
            tile_name: name.to_string(),
            loc: GridLoc::new(x, y),
        }
    }

    #[test]
    fn resolves_both_sides() {
        let pair = locate(simple_tiles()).unwrap();
        assert_eq!(
            pair.left,
            Anchor {
                interface_tile: "PCIE_INT_INTERFACE_L_X5Y50".to_string(),
                site: "SLICE_X4Y50".to_string(),
            }
        );
        assert_eq!(
            pair.right,
            Anchor {
                interface_tile: "PCIE_INT_INTERFACE_R_X9Y50".to_string(),
                site: "SLICE_X9Y50".to_string(),
            }
        );
    }

    #[test]
    fn rows_before_target_are_ignored() {
        let mut tiles = simple_tiles();
        // Closer in row terms, but before the target row.
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X0Y0", 3, 19);
        add_slice(&mut tiles, "SLICE_X0Y0", 2, 19);
        let pair = locate(tiles).unwrap();
        assert_eq!(pair.left.interface_tile, "PCIE_INT_INTERFACE_L_X5Y50");
    }

    #[test]
    fn smallest_eligible_row_wins_regardless_of_scan_order() {
        let mut tiles = base_tiles();
        // Scanned first (name order) but further away.
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X1Y100", 6, 30);
        add_slice(&mut tiles, "SLICE_X1Y100", 5, 30);
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X2Y50", 6, 22);
        add_slice(&mut tiles, "SLICE_X2Y50", 5, 22);
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        add_slice(&mut tiles, "SLICE_X9Y50", 15, 20);
        let pair = locate(tiles).unwrap();
        assert_eq!(pair.left.interface_tile, "PCIE_INT_INTERFACE_L_X2Y50");
        assert_eq!(pair.left.site, "SLICE_X2Y50");
    }

    #[test]
    fn row_tie_keeps_first_name() {
        let mut tiles = base_tiles();
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X1Y100", 3, 22);
        add_slice(&mut tiles, "SLICE_X0Y100", 2, 22);
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X3Y100", 7, 22);
        add_slice(&mut tiles, "SLICE_X2Y100", 6, 22);
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        add_slice(&mut tiles, "SLICE_X9Y50", 15, 20);
        let pair = locate(tiles).unwrap();
        assert_eq!(pair.left.interface_tile, "PCIE_INT_INTERFACE_L_X1Y100");
        assert_eq!(pair.left.site, "SLICE_X0Y100");
    }

    #[test]
    fn unaligned_interface_rows_are_skipped() {
        let mut tiles = simple_tiles();
        // Row index 75 is not a multiple of 50.
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y75", 12, 20);
        add_slice(&mut tiles, "SLICE_X8Y75", 13, 20);
        let grid = Grid::new(tiles).unwrap();
        let locator = NeighborLocator::new(&grid, &FixtureConfig::default()).unwrap();
        let names: Vec<&str> = locator
            .candidates()
            .iter()
            .map(|c| c.tile_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["PCIE_INT_INTERFACE_L_X5Y50", "PCIE_INT_INTERFACE_R_X9Y50"]
        );
        let pair = locator.locate(GridLoc::new(10, 20), "PCIE_X0Y0").unwrap();
        assert_eq!(pair.right.site, "SLICE_X9Y50");
    }

    #[test]
    fn same_column_belongs_to_neither_side() {
        let mut tiles = base_tiles();
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X5Y50", 6, 20);
        add_slice(&mut tiles, "SLICE_X4Y50", 5, 20);
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X10Y50", 10, 25);
        add_slice(&mut tiles, "SLICE_X10Y50", 11, 25);
        let err = locate(tiles).unwrap_err();
        assert!(matches!(err, LocateError::MissingRightAnchor { site } if site == "PCIE_X0Y0"));
    }

    #[test]
    fn malformed_interface_name() {
        let mut tiles = simple_tiles();
        add(&mut tiles, "PCIE_INT_INTERFACE_L", 8, 30);
        let err = locate(tiles).unwrap_err();
        assert!(matches!(
            err,
            LocateError::MalformedInterfaceTile(name) if name == "PCIE_INT_INTERFACE_L"
        ));
    }

    #[test]
    fn missing_left_candidate() {
        let mut tiles = base_tiles();
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        add_slice(&mut tiles, "SLICE_X9Y50", 15, 20);
        let err = locate(tiles).unwrap_err();
        assert!(matches!(err, LocateError::MissingLeftAnchor { .. }));
    }

    #[test]
    fn missing_right_logic_site() {
        let mut tiles = base_tiles();
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X5Y50", 6, 20);
        add_slice(&mut tiles, "SLICE_X4Y50", 5, 20);
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        // A slice on a different row does not count.
        add_slice(&mut tiles, "SLICE_X9Y51", 15, 21);
        let err = locate(tiles).unwrap_err();
        assert!(matches!(err, LocateError::MissingRightAnchor { .. }));
    }

    #[test]
    fn chosen_tile_is_not_swapped_when_walk_fails() {
        let mut tiles = base_tiles();
        // Nearest row on the left has nothing to walk to; a farther row would.
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X1Y50", 6, 21);
        add(&mut tiles, "PCIE_INT_INTERFACE_L_X1Y100", 6, 30);
        add_slice(&mut tiles, "SLICE_X1Y100", 5, 30);
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        add_slice(&mut tiles, "SLICE_X9Y50", 15, 20);
        let err = locate(tiles).unwrap_err();
        assert!(matches!(err, LocateError::MissingLeftAnchor { .. }));
    }

    #[test]
    fn best_candidate_empty() {
        let empty: [Candidate; 0] = [];
        assert!(best_candidate(&empty).is_none());
    }

    #[test]
    fn best_candidate_first_of_ties() {
        let group = [
            candidate("B", 1, 9),
            candidate("C", 2, 7),
            candidate("D", 3, 7),
            candidate("E", 4, 8),
        ];
        assert_eq!(best_candidate(&group).unwrap().tile_name, "C");
    }

    #[test]
    fn walk_skips_non_logic_sites() {
        let mut tiles = base_tiles();
        tiles.insert(
            "DSP_L_X3Y20".to_string(),
            GridInfo::new(3, 20, "DSP_L").with_site("DSP48_X0Y8", "DSP48E1"),
        );
        add_slice(&mut tiles, "SLICE_X1Y20", 2, 20);
        let grid = Grid::new(tiles).unwrap();
        let site = nearest_anchor(&grid, GridLoc::new(4, 20), Side::Left, "SLICE");
        assert_eq!(site.as_deref(), Some("SLICE_X1Y20"));
    }

    #[test]
    fn walk_takes_first_logic_site_by_name() {
        let mut tiles = base_tiles();
        tiles.insert(
            "CLBLM_R_X7Y20".to_string(),
            GridInfo::new(13, 20, "CLBLM_R")
                .with_site("SLICE_X11Y20", "SLICEL")
                .with_site("SLICE_X10Y20", "SLICEM"),
        );
        let grid = Grid::new(tiles).unwrap();
        let site = nearest_anchor(&grid, GridLoc::new(12, 20), Side::Right, "SLICE");
        assert_eq!(site.as_deref(), Some("SLICE_X10Y20"));
    }

    #[test]
    fn walk_never_visits_outer_columns() {
        let mut tiles = base_tiles();
        add_slice(&mut tiles, "SLICE_LEFT_EDGE", 0, 30);
        add_slice(&mut tiles, "SLICE_RIGHT_EDGE", 20, 30);
        let grid = Grid::new(tiles).unwrap();
        assert_eq!(nearest_anchor(&grid, GridLoc::new(1, 30), Side::Left, "SLICE"), None);
        assert_eq!(nearest_anchor(&grid, GridLoc::new(5, 30), Side::Left, "SLICE"), None);
        assert_eq!(nearest_anchor(&grid, GridLoc::new(19, 30), Side::Right, "SLICE"), None);
        assert_eq!(nearest_anchor(&grid, GridLoc::new(12, 30), Side::Right, "SLICE"), None);
    }

    #[test]
    fn walk_columns_stay_inside_extent() {
        let dims = GridDims {
            x_min: 0,
            x_max: 6,
            y_min: 0,
            y_max: 6,
        };
        assert_eq!(walk_columns(dims, 4, Side::Left), vec![3, 2, 1]);
        assert_eq!(walk_columns(dims, 2, Side::Right), vec![3, 4, 5]);
        assert!(walk_columns(dims, 0, Side::Left).is_empty());
        assert!(walk_columns(dims, 1, Side::Left).is_empty());
        assert!(walk_columns(dims, 5, Side::Right).is_empty());
        assert!(walk_columns(dims, 6, Side::Right).is_empty());
        assert!(walk_columns(dims, u32::MAX, Side::Right).is_empty());
    }

    #[test]
    fn target_on_min_column_has_no_left() {
        let mut tiles = BTreeMap::new();
        tiles.insert(
            "PCIE_BOT_X0Y20".to_string(),
            GridInfo::new(0, 20, "PCIE_BOT").with_site("PCIE_X0Y0", "PCIE_2_1"),
        );
        tiles.insert("NULL_X20Y40".to_string(), GridInfo::new(20, 40, "NULL"));
        add(&mut tiles, "PCIE_INT_INTERFACE_R_X9Y50", 14, 20);
        add_slice(&mut tiles, "SLICE_X9Y50", 15, 20);
        let grid = Grid::new(tiles).unwrap();
        let locator = NeighborLocator::new(&grid, &FixtureConfig::default()).unwrap();
        let err = locator.locate(GridLoc::new(0, 20), "PCIE_X0Y0").unwrap_err();
        assert!(matches!(err, LocateError::MissingLeftAnchor { .. }));
    }

    #[test]
    fn row_index_comes_from_last_xy_pair() {
        let pattern = interface_pattern("PCIE_INT_INTERFACE").unwrap();
        assert_eq!(
            interface_row_index(&pattern, "PCIE_INT_INTERFACE_L_X10Y150").unwrap(),
            150
        );
        assert_eq!(
            interface_row_index(&pattern, "PCIE_INT_INTERFACE_X1Y2_X3Y100").unwrap(),
            100
        );
        assert!(interface_row_index(&pattern, "PCIE_INT_INTERFACE_L_XY").is_err());
    }
}
