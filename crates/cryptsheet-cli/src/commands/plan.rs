//! Plan command implementation
//!
//! Runs the slicing pipeline without a store and lists what would be
//! published.

use anyhow::{Context, Result};
use colored::Colorize;
use cryptsheet_frames::ImageVariant;
use serde::Serialize;
use serde_json::{json, Value};
use std::process::ExitCode;

use super::reporting::{format_bytes, print_banner};
use crate::config::RunConfig;
use crate::pipeline::{build_variants, RunError};

/// One variant as listed by the plan command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedVariant {
    pub name: String,
    pub content_type: String,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
}

/// Run the plan command
///
/// # Arguments
/// * `config` - Run configuration (data directory, catalog)
/// * `hashes` - Include BLAKE3 digests of each variant
/// * `json` - Output machine-readable JSON instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 if any entity failed
pub fn run(config: RunConfig, hashes: bool, json: bool) -> Result<ExitCode> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    rt.block_on(run_async(config, hashes, json))
}

async fn run_async(config: RunConfig, hashes: bool, json: bool) -> Result<ExitCode> {
    let catalog = config
        .load_catalog()
        .with_context(|| format!("Failed to load catalog from {}", config.data_dir().display()))?;

    if !json {
        print_banner("Plan", config.data_dir(), &config.catalog_path(), catalog.len());
    }

    let variants = match build_variants(catalog.entities(), &config).await {
        Ok(variants) => variants,
        Err(error) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&json_failure(&error))?);
            } else {
                eprintln!("{} {}", "FAILED".red().bold(), error);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let planned = plan_entries(&variants, &config.content_type, hashes);

    if json {
        println!("{}", serde_json::to_string_pretty(&planned)?);
        return Ok(ExitCode::SUCCESS);
    }

    for entry in &planned {
        let size = format_bytes(entry.bytes as u64);
        match &entry.blake3 {
            Some(hash) => println!("  {} {} {}", entry.name, size.dimmed(), hash.dimmed()),
            None => println!("  {} {}", entry.name, size.dimmed()),
        }
    }
    let total: u64 = planned.iter().map(|entry| entry.bytes as u64).sum();
    println!();
    println!(
        "{} {} variants ({})",
        "PLAN".green().bold(),
        planned.len(),
        format_bytes(total)
    );

    Ok(ExitCode::SUCCESS)
}

/// Listing entries for `variants`, labelled with the content type they
/// would be published under.
fn plan_entries(variants: &[ImageVariant], content_type: &str, hashes: bool) -> Vec<PlannedVariant> {
    variants
        .iter()
        .map(|variant| PlannedVariant {
            name: variant.name(),
            content_type: content_type.to_string(),
            bytes: variant.data().len(),
            blake3: hashes.then(|| variant.hash()),
        })
        .collect()
}

fn json_failure(error: &RunError) -> Value {
    json!({ "success": false, "error": error.to_string() })
}
