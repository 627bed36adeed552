// src/report/json.rs
//! JSON rendering of comparison and detection results for machine
//! consumption.

use serde::Serialize;

use crate::compare::FolderComparison;
use crate::error::Result;

#[derive(Serialize)]
struct JsonReport<'a> {
    comparisons: &'a [FolderComparison],
    detected: &'a [FolderComparison],
}

/// Renders the full run (all comparisons plus the detected subset) as
/// pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render(comparisons: &[FolderComparison], detected: &[FolderComparison]) -> Result<String> {
    let report = JsonReport {
        comparisons,
        detected,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
