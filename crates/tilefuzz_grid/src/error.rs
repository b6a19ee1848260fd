//! Error types for grid loading and lookup.

use crate::loc::GridLoc;
use std::path::PathBuf;

/// Errors that can occur while loading or querying a device grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// An I/O error occurred while reading a database file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The `tilegrid.json` content could not be parsed.
    #[error("tilegrid JSON parse error: {0}")]
    Parse(String),

    /// The part directory does not exist under the database root.
    #[error("X-Ray database directory not found: {}", .0.display())]
    PartNotFound(PathBuf),

    /// A tile name was looked up that the grid does not contain.
    #[error("unknown tile '{0}'")]
    UnknownTile(String),

    /// Two tiles claim the same grid location.
    #[error("tiles '{first}' and '{second}' both occupy {loc}")]
    DuplicateLoc {
        /// The location claimed twice.
        loc: GridLoc,
        /// The tile that claimed the location first (in name order).
        first: String,
        /// The tile that claimed it again.
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_tile() {
        let err = GridError::UnknownTile("CLBLL_L_X0Y0".to_string());
        assert_eq!(format!("{err}"), "unknown tile 'CLBLL_L_X0Y0'");
    }

    #[test]
    fn display_duplicate_loc() {
        let err = GridError::DuplicateLoc {
            loc: GridLoc::new(3, 4),
            first: "A".to_string(),
            second: "B".to_string(),
        };
        assert_eq!(format!("{err}"), "tiles 'A' and 'B' both occupy (3, 4)");
    }

    #[test]
    fn display_part_not_found() {
        let err = GridError::PartNotFound(PathBuf::from("/db/artix7/xc7a35t"));
        assert!(err.to_string().contains("/db/artix7/xc7a35t"));
    }

    #[test]
    fn display_io_error() {
        let err = GridError::Io {
            path: PathBuf::from("tilegrid.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to read tilegrid.json"));
        assert!(msg.contains("file not found"));
    }
}
