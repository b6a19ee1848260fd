//! The per-tile bit assignments and the `params.csv` table.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// The bit chosen for one interface tile, and the target site it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The target site whose draw produced the bit.
    pub site: String,
    /// `0` or `1`.
    pub bit: u8,
}

/// Interface tile name to [`Assignment`], kept in tile-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    entries: BTreeMap<String, Assignment>,
}

impl AssignmentMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `bit` for `tile`, replacing any earlier entry for that tile.
    pub fn assign(&mut self, tile: &str, site: &str, bit: u8) {
        let previous = self.entries.insert(
            tile.to_string(),
            Assignment {
                site: site.to_string(),
                bit,
            },
        );
        if let Some(previous) = previous {
            log::debug!("{tile} reassigned from {} to {site}", previous.site);
        }
    }

    /// Returns the entry for `tile`.
    pub fn get(&self, tile: &str) -> Option<&Assignment> {
        self.entries.get(tile)
    }

    /// Returns the number of tiles assigned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in tile-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assignment)> {
        self.entries.iter().map(|(tile, a)| (tile.as_str(), a))
    }
}

/// Renders the map as CSV: header `tile,val,site`, one row per tile.
pub fn render_params(params: &AssignmentMap) -> String {
    let mut out = String::from("tile,val,site\n");
    for (tile, a) in params.iter() {
        let _ = writeln!(out, "{tile},{},{}", a.bit, a.site);
    }
    out
}

/// Writes [`render_params`] output to `path`, replacing any existing file.
pub fn write_params(path: &Path, params: &AssignmentMap) -> std::io::Result<()> {
    std::fs::write(path, render_params(params))?;
    log::info!("wrote {} rows to {}", params.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_header_only() {
        assert_eq!(render_params(&AssignmentMap::new()), "tile,val,site\n");
    }

    #[test]
    fn rows_sorted_by_tile() {
        let mut params = AssignmentMap::new();
        params.assign("PCIE_INT_INTERFACE_R_X9Y50", "PCIE_X0Y0", 1);
        params.assign("PCIE_INT_INTERFACE_L_X5Y50", "PCIE_X0Y0", 1);
        params.assign("PCIE_INT_INTERFACE_L_X5Y100", "PCIE_X0Y1", 0);
        assert_eq!(
            render_params(&params),
            "tile,val,site\n\
             PCIE_INT_INTERFACE_L_X5Y100,0,PCIE_X0Y1\n\
             PCIE_INT_INTERFACE_L_X5Y50,1,PCIE_X0Y0\n\
             PCIE_INT_INTERFACE_R_X9Y50,1,PCIE_X0Y0\n"
        );
    }

    #[test]
    fn later_assignment_wins() {
        let mut params = AssignmentMap::new();
        params.assign("T", "PCIE_X0Y0", 0);
        params.assign("T", "PCIE_X0Y1", 1);
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get("T"),
            Some(&Assignment {
                site: "PCIE_X0Y1".to_string(),
                bit: 1,
            })
        );
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.csv");
        std::fs::write(&path, "stale contents that are longer than the table\n").unwrap();

        let mut params = AssignmentMap::new();
        params.assign("T", "S", 1);
        write_params(&path, &params).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "tile,val,site\nT,1,S\n");
    }

    #[test]
    fn write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/params.csv");
        assert!(write_params(&path, &AssignmentMap::new()).is_err());
    }
}
