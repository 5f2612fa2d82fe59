//! feature-cache - build the per-cell feature cache for one floorplan.
//!
//! Usage:
//!   feature-cache -d survey.db -f <FLOORPLAN_ID> -o cache.json -i true
//!
//! Reads Kalman-filtered readings and the floorplan layout from the SQLite
//! database, optionally interpolates every walkable cell, and writes the cache
//! as JSON. Nothing is written if any step fails.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use feature_cache::io::SqliteStore;
use feature_cache::{CacheBuilder, CacheConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database with kalman_estimates and layout_images
    #[arg(short, long)]
    database: PathBuf,

    /// Floorplan identifier
    #[arg(short, long)]
    floorplan: String,

    /// Output JSON file
    #[arg(short, long)]
    output: PathBuf,

    /// Interpolate unobserved cells (true/false)
    #[arg(
        short,
        long,
        required = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    interpolate: bool,

    /// Configuration file (default: feature-cache.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn run(args: &Args) -> feature_cache::Result<()> {
    let config = CacheConfig::load_or_default(args.config.as_deref())?;
    let store = SqliteStore::open(&args.database)?;

    let mut builder = CacheBuilder::new(&store, &config);
    if !args.interpolate {
        builder = builder.without_interpolation();
    }
    log::info!("  Interpolation: {}", builder.interpolator().method());

    builder.build_to_file(&args.floorplan, &args.output, config.output.pretty)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    log::info!("feature-cache starting");
    log::info!("  Database: {}", args.database.display());
    log::info!("  Floorplan: {}", args.floorplan);
    log::info!("  Output: {}", args.output.display());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
