// src/cli/mod.rs
//! CLI shell around the comparison engine.
//!
//! Owns argument handling, config overrides, progress display, and report
//! selection. The engine itself stays free of any display concern.

pub mod args;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;

use crate::bundle;
use crate::compare::Comparer;
use crate::config::Config;
use crate::detection::{AvgDetection, Detector};
use crate::report;

/// Runs a full comparison from parsed CLI arguments.
///
/// # Errors
/// Returns an error on invalid configuration, unreadable input, or report
/// writing failures.
pub fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load();
    apply_overrides(&mut config, cli);
    config.validate()?;

    let folders = resolve_folders(cli)?;
    if folders.len() < 2 {
        bail!("need at least two submission folders to compare");
    }

    let excluded = config.excluded_set();
    let comparer = Comparer::from_config(&config)?;
    let verbosity = config.verbosity;

    let pair_count = folders.len() * (folders.len() - 1) / 2;
    if verbosity >= 1 {
        eprintln!(
            "{}",
            format!("Comparing {pair_count} folder pairs...").cyan()
        );
    }

    let comparisons = comparer.compare_with_progress(&folders, &excluded, &|done, total| {
        if verbosity >= 1 {
            eprintln!("  [{done}/{total}] pairs compared");
        }
    })?;

    if let Some(csv_path) = &cli.csv_path {
        report::csv::write_csv(&comparisons, csv_path)?;
        if verbosity >= 1 {
            eprintln!("Wrote {}", csv_path.display());
        }
    }

    let detector = Detector::new(Box::new(AvgDetection::new(config.avg_threshold)));
    let detected = detector.detect(&comparisons)?;

    if cli.format == "json" {
        println!("{}", report::json::render(&comparisons, &detected)?);
    } else {
        if verbosity >= 2 && !comparisons.is_empty() {
            println!("{}\n", report::terminal::render_metrics(&comparisons));
        }
        println!("{}", report::terminal::render_detected(&detected));
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(threshold) = cli.avg_threshold {
        config.avg_threshold = threshold;
    }
    if !cli.excluded_type_names.is_empty() {
        config.excluded_type_names = cli.excluded_type_names.clone();
    }
    if cli.serial {
        config.parallel = false;
    }
    if cli.verbosity > 0 {
        config.verbosity = cli.verbosity;
    }
}

fn resolve_folders(cli: &Cli) -> Result<Vec<PathBuf>> {
    if let Some(bundle_path) = &cli.submissions_zip {
        return Ok(bundle::unpack_submissions(bundle_path)?);
    }
    if !cli.folders.is_empty() {
        return Ok(cli.folders.clone());
    }
    bail!("specify --folders or --submissions-zip")
}
