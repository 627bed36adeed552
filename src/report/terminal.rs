// src/report/terminal.rs
//! Terminal rendering of detection results.

use std::fmt::Write;

use colored::Colorize;

use crate::compare::FolderComparison;

/// Renders the detected folder pairs as a tree.
#[must_use]
pub fn render_detected(detected: &[FolderComparison]) -> String {
    if detected.is_empty() {
        return format!("{}", "No suspicious folder pairs found.".green().bold());
    }

    let mut out = String::new();
    for fc in detected {
        let _ = writeln!(out, "{}", "DETECTED FOLDERS:".red().bold());
        let _ = writeln!(out, "|--- {}", fc.folder1);
        let _ = writeln!(out, "|--- {}", fc.folder2);
        for tc in &fc.type_comparisons {
            let _ = writeln!(out, "|--- {}", "DETECTED TYPES".red());
            let _ = writeln!(out, "|------- {}", tc.type1);
            let _ = writeln!(out, "|------- {}", tc.type2);
        }
    }

    out.trim_end().to_string()
}

/// Renders every comparison's metric vector, for high verbosity runs.
#[must_use]
pub fn render_metrics(comparisons: &[FolderComparison]) -> String {
    let mut out = String::new();
    for fc in comparisons {
        let _ = writeln!(
            out,
            "{}",
            format!("{} <-> {}", fc.folder1, fc.folder2).cyan()
        );
        for tc in &fc.type_comparisons {
            let values: Vec<String> = tc
                .metrics
                .iter()
                .map(|m| format!("{}={:.4}", m.name, m.value))
                .collect();
            let _ = writeln!(
                out,
                "  {} -> {}: {}",
                tc.type1,
                tc.type2,
                values.join(", ")
            );
        }
    }
    out.trim_end().to_string()
}
