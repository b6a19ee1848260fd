//! Fixture generator for the `PCIE_INT_INTERFACE` tilegrid fuzzer.
//!
//! For every PCIE site on the device, the generator finds the nearest aligned
//! interface tile on each side of it, hunts outward from each for a slice to
//! pin a probe LUT on, and emits a Verilog module wiring the two probes to the
//! PCIE block. Each target site gets one random bit, recorded against both of
//! its interface tiles in `params.csv`.
//!
//! The pieces:
//!
//! - [`locate`] — neighbor search over the grid
//! - [`emit`] — module text and the full run driver
//! - [`params`] — the assignment map and its CSV table
//! - [`seed`] — seed parsing and the explicit random source
//! - [`config`] — tunable constants, loadable from TOML

#![warn(missing_docs)]

pub mod config;
pub mod emit;
pub mod error;
pub mod locate;
pub mod params;
pub mod seed;

pub use config::{load_config, load_config_from_str, FixtureConfig};
pub use emit::{run_fixture, FixtureEmitter, TargetSite};
pub use error::{ConfigError, FixtureError, LocateError, SeedError};
pub use locate::{
    best_candidate, nearest_anchor, Anchor, Candidate, NeighborLocator, NeighborPair, Side,
};
pub use params::{render_params, write_params, Assignment, AssignmentMap};
pub use seed::{parse_seed, seeded_rng, Seed};
