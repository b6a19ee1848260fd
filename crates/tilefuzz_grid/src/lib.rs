//! Read-only view of a Project X-Ray device grid.
//!
//! This crate loads the `tilegrid.json` file of a
//! [Project X-Ray](https://github.com/f4pga/prjxray) database and answers the
//! questions a fuzzer fixture generator asks of it: which tiles exist, where a
//! tile sits on the grid, which sites a grid location holds, and how large the
//! grid is.
//!
//! Consumers program against the [`GridOracle`] trait so that tests can build
//! small synthetic grids with [`Grid::new`] instead of loading a real database.
//!
//! # Database layout
//!
//! ```text
//! $XRAY_DATABASE_DIR/
//! └── artix7/                 ($XRAY_DATABASE)
//!     └── xc7a50tfgg484-1/    ($XRAY_PART)
//!         └── tilegrid.json
//! ```

#![warn(missing_docs)]

pub mod db;
pub mod error;
pub mod grid;
pub mod loc;
pub mod tilegrid;

pub use db::{resolve_db_root, XRayDatabase};
pub use error::GridError;
pub use grid::{Grid, GridInfo, GridOracle};
pub use loc::{GridDims, GridLoc};
