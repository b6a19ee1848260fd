//! Tilefuzz CLI — generates the `PCIE_INT_INTERFACE` tilegrid fuzzer fixture.
//!
//! Prints a Verilog module to stdout and writes `params.csv`. Inputs are read
//! from the same environment variables the Project X-Ray fuzzer harness sets;
//! the matching flags override them.

#![warn(missing_docs)]

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tilefuzz_grid::{resolve_db_root, XRayDatabase};
use tilefuzz_pcie::{
    load_config, parse_seed, run_fixture, seeded_rng, FixtureConfig, FixtureError, SeedError,
};

/// Tilefuzz — fuzzer fixture generator for PCIE interface tiles.
#[derive(Parser, Debug)]
#[command(name = "tilefuzz", version, about = "PCIE_INT_INTERFACE fixture generator")]
pub struct Cli {
    /// Hexadecimal random seed.
    #[arg(long, env = "SEED")]
    pub seed: Option<String>,

    /// Project X-Ray database directory.
    #[arg(long, env = "XRAY_DATABASE_DIR")]
    pub db_dir: PathBuf,

    /// Device family directory within the database (e.g., `artix7`).
    #[arg(long, env = "XRAY_DATABASE")]
    pub family: String,

    /// Part directory within the family (e.g., `xc7a50tfgg484-1`).
    #[arg(long, env = "XRAY_PART")]
    pub part: String,

    /// Path to a TOML file overriding fixture constants.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress all log output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose (debug-level) log output.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn run(cli: &Cli) -> Result<(), FixtureError> {
    // Seed first: a bad seed must fail before any database work.
    let seed = parse_seed(cli.seed.as_deref().ok_or(SeedError::Missing)?)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FixtureConfig::default(),
    };

    let db_root = resolve_db_root(&cli.db_dir, &cli.family);
    let db = XRayDatabase::load(&db_root, &cli.part)?;
    log::info!("seed {seed}, part {} ({} tiles)", db.part, db.grid.len());

    let mut rng = seeded_rng(&seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_fixture(&db.grid, &config, &mut rng, &mut out)?;
    Ok(())
}
