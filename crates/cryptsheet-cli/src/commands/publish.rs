//! Publish command implementation
//!
//! Slices every catalog entity and uploads all variants to the store.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use std::process::ExitCode;
use std::sync::Arc;

use super::reporting::{format_bytes, print_banner};
use crate::config::RunConfig;
use crate::pipeline::{run_pipeline, RunError, RunReport};
use crate::publish::DirectoryStore;

/// Options for the publish command.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Store location (directory path, optionally `file://`-prefixed)
    pub store: String,
    /// Container within the store
    pub container: String,
    /// Output machine-readable JSON instead of colored text
    pub json: bool,
}

/// Run the publish command
///
/// # Returns
/// Exit code: 0 success, 1 if any entity or upload failed
pub fn run(config: RunConfig, options: PublishOptions) -> Result<ExitCode> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    rt.block_on(run_async(config, options))
}

async fn run_async(config: RunConfig, options: PublishOptions) -> Result<ExitCode> {
    let catalog = config
        .load_catalog()
        .with_context(|| format!("Failed to load catalog from {}", config.data_dir().display()))?;
    let store = DirectoryStore::from_location(&options.store, &options.container)
        .context("Failed to open store")?;

    if !options.json {
        print_banner("Publish", config.data_dir(), &config.catalog_path(), catalog.len());
        println!(
            "{} {}",
            "Container:".blue().bold(),
            store.container_dir().display()
        );
        println!();
    }

    let outcome = run_pipeline(catalog.entities(), &config, Arc::new(store)).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&json_summary(&outcome))?);
    } else {
        match &outcome {
            Ok(report) => println!("{}", success_line(report)),
            Err(error) => eprintln!("{} {}", "FAILED".red().bold(), error),
        }
    }

    Ok(exit_code(&outcome))
}

/// Machine-readable run summary printed by `--json`.
fn json_summary(outcome: &Result<RunReport, RunError>) -> Value {
    match outcome {
        Ok(report) => json!({ "success": true, "report": report }),
        Err(error) => json!({ "success": false, "error": error.to_string() }),
    }
}

fn success_line(report: &RunReport) -> String {
    format!(
        "{} Published {} variants for {} entities ({}) in {:.2}s",
        "SUCCESS".green().bold(),
        report.variants,
        report.entities,
        format_bytes(report.bytes),
        report.elapsed_ms as f64 / 1000.0
    )
}

fn exit_code(outcome: &Result<RunReport, RunError>) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(1),
    }
}
