//! Error types for fixture generation.

use std::path::PathBuf;
use tilefuzz_grid::GridError;

/// Errors from loading or validating a [`FixtureConfig`](crate::FixtureConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Errors from reading the `SEED` value.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// No seed was provided.
    #[error("SEED is not set")]
    Missing,

    /// The seed is not a hexadecimal number that fits in 64 bits.
    #[error("invalid SEED '{0}': expected a hexadecimal value")]
    Invalid(String),
}

/// Errors from the neighbor search.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// No anchor site could be found left of the target.
    #[error("no left anchor site found for {site}")]
    MissingLeftAnchor {
        /// The target site being resolved.
        site: String,
    },

    /// No anchor site could be found right of the target.
    #[error("no right anchor site found for {site}")]
    MissingRightAnchor {
        /// The target site being resolved.
        site: String,
    },

    /// A tile has the interface prefix but no `X<n>Y<n>` suffix.
    #[error("interface tile '{0}' does not carry an X/Y index")]
    MalformedInterfaceTile(String),

    /// The interface tile pattern could not be compiled.
    #[error("invalid interface tile pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The grid failed to answer a query.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Any error that aborts a fixture run.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Seed problem.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Neighbor resolution failed.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Grid loading or lookup failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Writing the module text failed.
    #[error("failed to write module text: {0}")]
    Emit(#[source] std::io::Error),

    /// Writing the parameter table failed.
    #[error("failed to write {path}: {source}")]
    Params {
        /// The parameter table path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
