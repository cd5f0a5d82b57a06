//! cryptsheet CLI - slice sprite sheets into frame variants and publish them
//!
//! This binary reads an entity catalog from a data directory, cuts every
//! entity's sprite sheet into per-frame images in four sizes, and uploads
//! them to a content store under deterministic names.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cryptsheet_cli::commands;
use cryptsheet_cli::config::{
    RunConfig, DEFAULT_CATALOG_FILE, DEFAULT_CONTAINER, DEFAULT_PUBLISH_CONCURRENCY,
};
use cryptsheet_cli::publish::DEFAULT_CACHE_CONTROL;

/// cryptsheet - Sprite frame variant publisher
#[derive(Parser)]
#[command(name = "cryptsheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice every catalog entity and publish all variants to a store
    Publish {
        /// Data directory holding the catalog and sprite sheets
        #[arg(short, long)]
        data_dir: String,

        /// Store location (directory path, optionally prefixed with file://)
        #[arg(short, long)]
        store: String,

        /// Container within the store
        #[arg(long, default_value = DEFAULT_CONTAINER)]
        container: String,

        /// Catalog file name within the data directory
        #[arg(long, default_value = DEFAULT_CATALOG_FILE)]
        catalog: String,

        /// Maximum concurrent uploads (0 = unbounded)
        #[arg(long, default_value_t = DEFAULT_PUBLISH_CONCURRENCY)]
        concurrency: usize,

        /// Cache-Control value stored with each blob
        #[arg(long, default_value = DEFAULT_CACHE_CONTROL)]
        cache_control: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the variants a publish run would produce, without uploading
    Plan {
        /// Data directory holding the catalog and sprite sheets
        #[arg(short, long)]
        data_dir: String,

        /// Catalog file name within the data directory
        #[arg(long, default_value = DEFAULT_CATALOG_FILE)]
        catalog: String,

        /// Include BLAKE3 digests of each variant
        #[arg(long)]
        hashes: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Environment variable overriding the log filter (e.g. `cryptsheet=trace`).
const LOG_ENV: &str = "CRYPTSHEET_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Publish {
            data_dir,
            store,
            container,
            catalog,
            concurrency,
            cache_control,
            json,
        } => {
            let config = RunConfig::new(data_dir)
                .with_catalog_file(catalog)
                .with_publish_concurrency(concurrency)
                .with_cache_control(cache_control);
            commands::publish::run(
                config,
                commands::publish::PublishOptions {
                    store,
                    container,
                    json,
                },
            )
        }
        Commands::Plan {
            data_dir,
            catalog,
            hashes,
            json,
        } => {
            let config = RunConfig::new(data_dir).with_catalog_file(catalog);
            commands::plan::run(config, hashes, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
