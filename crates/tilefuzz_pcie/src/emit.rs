//! Verilog fixture emission and the full run driver.
//!
//! The module is written incrementally: each target site's fragment goes to
//! the sink as soon as its neighbors resolve. If a later site fails, the text
//! for earlier sites has already been written and the module is left without
//! its `endmodule`.

use crate::config::FixtureConfig;
use crate::error::{FixtureError, LocateError};
use crate::locate::{NeighborLocator, NeighborPair};
use crate::params::{write_params, AssignmentMap};
use rand::Rng;
use std::fmt::Write as _;
use std::io::Write;
use tilefuzz_grid::{GridError, GridLoc, GridOracle};

const MODULE_HEADER: &str = "\nmodule top();\n    \n";
const MODULE_FOOTER: &str = "endmodule\n";

/// A site of the block under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSite {
    /// The tile holding the site.
    pub tile_name: String,
    /// The site name, also used to name its wires.
    pub site_name: String,
    /// Where the tile sits.
    pub loc: GridLoc,
}

/// Emits the fixture module for every target site of a grid.
pub struct FixtureEmitter<'g, G: ?Sized> {
    grid: &'g G,
    config: &'g FixtureConfig,
    locator: NeighborLocator<'g, G>,
}

impl<'g, G: GridOracle + ?Sized> FixtureEmitter<'g, G> {
    /// Prepares an emitter over `grid`.
    pub fn new(grid: &'g G, config: &'g FixtureConfig) -> Result<Self, LocateError> {
        Ok(Self {
            grid,
            config,
            locator: NeighborLocator::new(grid, config)?,
        })
    }

    /// Lists target sites: tiles in name order, then sites in name order.
    pub fn target_sites(&self) -> Result<Vec<TargetSite>, GridError> {
        let mut names = self.grid.tiles();
        names.sort_unstable();

        let mut targets = Vec::new();
        for tile_name in names {
            let loc = self.grid.loc_of_tilename(tile_name)?;
            let Some(info) = self.grid.gridinfo_at_loc(loc) else {
                continue;
            };
            for (site_name, site_type) in &info.sites {
                if *site_type == self.config.target_site_type {
                    targets.push(TargetSite {
                        tile_name: tile_name.to_string(),
                        site_name: site_name.clone(),
                        loc,
                    });
                }
            }
        }
        Ok(targets)
    }

    /// Writes the module to `out` and returns the bit assignments.
    ///
    /// Each target site takes exactly one draw from `rng`, so the output is a
    /// pure function of the grid and the generator state.
    pub fn emit<W, R>(&self, out: &mut W, rng: &mut R) -> Result<AssignmentMap, FixtureError>
    where
        W: Write + ?Sized,
        R: Rng,
    {
        let targets = self.target_sites()?;
        log::info!("{} {} sites found", targets.len(), self.config.target_site_type);

        out.write_all(MODULE_HEADER.as_bytes()).map_err(FixtureError::Emit)?;

        let mut params = AssignmentMap::new();
        for target in &targets {
            let pair = self.locator.locate(target.loc, &target.site_name)?;
            log::debug!(
                "{} in {}: left {} via {}, right {} via {}",
                target.site_name,
                target.tile_name,
                pair.left.site,
                pair.left.interface_tile,
                pair.right.site,
                pair.right.interface_tile
            );

            let bit: u8 = rng.gen_range(0..=1);
            params.assign(&pair.left.interface_tile, &target.site_name, bit);
            params.assign(&pair.right.interface_tile, &target.site_name, bit);

            let fragment =
                render_fragment(&target.site_name, &self.config.target_site_type, &pair);
            out.write_all(fragment.as_bytes()).map_err(FixtureError::Emit)?;
        }

        out.write_all(MODULE_FOOTER.as_bytes()).map_err(FixtureError::Emit)?;
        out.flush().map_err(FixtureError::Emit)?;
        Ok(params)
    }
}

/// Renders the wires, probe LUTs and target instance for one site.
pub fn render_fragment(site: &str, target_type: &str, pair: &NeighborPair) -> String {
    let left = &pair.left.site;
    let right = &pair.right.site;

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "wire [1:0] PLDIRECTEDLINKCHANGE_{site};");
    let _ = writeln!(out, "wire [68:0] MIMTXRDATA_{site};");
    let _ = writeln!(out);
    let _ = writeln!(out, "(* KEEP, DONT_TOUCH, LOC = \"{left}\" *)");
    let _ = writeln!(out, "LUT1 left_lut_{left} (.O(MIMTXRDATA_{site}[0]));");
    let _ = writeln!(out);
    let _ = writeln!(out, "(* KEEP, DONT_TOUCH, LOC = \"{right}\" *)");
    let _ = writeln!(out, "LUT1 right_lut_{right} (.O(PLDIRECTEDLINKCHANGE_{site}[0]));");
    let _ = writeln!(out);
    let _ = writeln!(out, "(* KEEP, DONT_TOUCH, LOC = \"{site}\" *)");
    let _ = writeln!(out, "{target_type} {site} (");
    let _ = writeln!(out, "    .PLDIRECTEDLINKCHANGE(PLDIRECTEDLINKCHANGE_{site}),");
    let _ = writeln!(out, "    .MIMTXRDATA(MIMTXRDATA_{site})");
    let _ = writeln!(out, ");");
    out
}

/// Runs a whole fixture: emits the module to `out`, then writes the
/// parameter table to `config.params_file`.
///
/// The table is only written once the module is complete.
pub fn run_fixture<G, W, R>(
    grid: &G,
    config: &FixtureConfig,
    rng: &mut R,
    out: &mut W,
) -> Result<AssignmentMap, FixtureError>
where
    G: GridOracle + ?Sized,
    W: Write + ?Sized,
    R: Rng,
{
    let emitter = FixtureEmitter::new(grid, config)?;
    let params = emitter.emit(out, rng)?;
    write_params(&config.params_file, &params).map_err(|source| FixtureError::Params {
        path: config.params_file.clone(),
        source,
    })?;
    Ok(params)
}
