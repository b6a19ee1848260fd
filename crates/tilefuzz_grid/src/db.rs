//! Locating and loading a Project X-Ray database on disk.

use crate::error::GridError;
use crate::grid::Grid;
use crate::tilegrid;
use std::path::{Path, PathBuf};

/// The grid portion of a Project X-Ray database for one part.
#[derive(Debug, Clone)]
pub struct XRayDatabase {
    /// The part name (e.g., "xc7a50tfgg484-1").
    pub part: String,
    /// The loaded device grid.
    pub grid: Grid,
}

impl XRayDatabase {
    /// Loads `<db_root>/<part>/tilegrid.json`.
    ///
    /// The `db_root` should point to the family-level directory (e.g.,
    /// `prjxray-db/artix7/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the part directory is missing or the tilegrid
    /// cannot be read or parsed.
    pub fn load(db_root: &Path, part: &str) -> Result<Self, GridError> {
        let part_dir = db_root.join(part);
        if !part_dir.is_dir() {
            return Err(GridError::PartNotFound(part_dir));
        }

        let tilegrid_path = part_dir.join("tilegrid.json");
        let json = std::fs::read_to_string(&tilegrid_path).map_err(|source| GridError::Io {
            path: tilegrid_path.clone(),
            source,
        })?;
        let grid = tilegrid::parse_tilegrid(&json)?;
        log::debug!(
            "loaded {} tiles from {}",
            grid.len(),
            tilegrid_path.display()
        );

        Ok(Self {
            part: part.to_string(),
            grid,
        })
    }
}

/// Joins the database directory with the family directory.
///
/// Mirrors how Project X-Ray tooling combines `XRAY_DATABASE_DIR` and
/// `XRAY_DATABASE`.
pub fn resolve_db_root(db_dir: &Path, family: &str) -> PathBuf {
    db_dir.join(family)
}
