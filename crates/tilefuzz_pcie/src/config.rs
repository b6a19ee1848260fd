//! Fixture constants, optionally overridden from a TOML file.
//!
//! Every field defaults to the value the `PCIE_INT_INTERFACE` fuzzer uses on
//! 7-series parts, so an empty file (or no file at all) reproduces the stock
//! fixture.
//!
//! ```text
//! target_site_type = "PCIE_2_1"
//! interface_tile_prefix = "PCIE_INT_INTERFACE"
//! interface_row_modulus = 50
//! logic_site_prefix = "SLICE"
//! params_file = "params.csv"
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tunable constants of a fixture run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConfig {
    /// Site type of the block under test.
    pub target_site_type: String,
    /// Name prefix identifying interface tiles.
    pub interface_tile_prefix: String,
    /// Only interface tiles whose name-derived row index is a multiple of this
    /// are candidates.
    pub interface_row_modulus: u32,
    /// Site name prefix of sites that can hold a probe LUT.
    pub logic_site_prefix: String,
    /// Where the parameter table is written.
    pub params_file: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            target_site_type: "PCIE_2_1".to_string(),
            interface_tile_prefix: "PCIE_INT_INTERFACE".to_string(),
            interface_row_modulus: 50,
            logic_site_prefix: "SLICE".to_string(),
            params_file: PathBuf::from("params.csv"),
        }
    }
}

/// Loads and validates a fixture configuration file.
pub fn load_config(path: &Path) -> Result<FixtureConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a fixture configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<FixtureConfig, ConfigError> {
    let config: FixtureConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &FixtureConfig) -> Result<(), ConfigError> {
    if config.target_site_type.is_empty() {
        return Err(ConfigError::ValidationError(
            "target_site_type must not be empty".to_string(),
        ));
    }
    if config.interface_tile_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "interface_tile_prefix must not be empty".to_string(),
        ));
    }
    if config.logic_site_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "logic_site_prefix must not be empty".to_string(),
        ));
    }
    if config.interface_row_modulus == 0 {
        return Err(ConfigError::ValidationError(
            "interface_row_modulus must be non-zero".to_string(),
        ));
    }
    Ok(())
}
