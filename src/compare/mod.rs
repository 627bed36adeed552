// src/compare/mod.rs
//! Folder-pair orchestration.
//!
//! Builds all unordered folder pairs, parses each side through the front-end,
//! matches every unit of the first folder against the second folder's
//! candidates, and assembles the result entities. Pairs are independent, so
//! they run under rayon by default; completion order is unspecified and the
//! output is re-sorted by folder identifiers before returning.

pub mod types;

pub use types::{FolderComparison, TypeComparison};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::config::Config;
use crate::error::Result;
use crate::frontend;
use crate::matching::{MetricSet, UnitMatcher};

/// The comparison engine: matcher plus metric pipeline, applied to every
/// folder pair.
pub struct Comparer {
    matcher: UnitMatcher,
    metrics: MetricSet,
    parallel: bool,
}

impl Comparer {
    #[must_use]
    pub fn new(matcher: UnitMatcher, metrics: MetricSet, parallel: bool) -> Self {
        Self {
            matcher,
            metrics,
            parallel,
        }
    }

    /// Engine with the default matching and metric scorer lists.
    #[must_use]
    pub fn with_defaults(parallel: bool) -> Self {
        Self::new(UnitMatcher::with_defaults(), MetricSet::with_defaults(), parallel)
    }

    /// Engine built from a validated configuration.
    ///
    /// # Errors
    /// Rejects duplicate or unknown scorer names.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            UnitMatcher::from_names(&config.match_scorers)?,
            MetricSet::from_names(&config.metric_scorers)?,
            config.parallel,
        ))
    }

    /// Compares all unordered folder pairs.
    ///
    /// # Errors
    /// Propagates front-end failures; a folder pair where either side yields
    /// zero units is skipped silently.
    pub fn compare(
        &self,
        folders: &[PathBuf],
        excluded: &HashSet<String>,
    ) -> Result<Vec<FolderComparison>> {
        self.compare_with_progress(folders, excluded, &|_, _| {})
    }

    /// Same as [`compare`](Self::compare), invoking `progress(done, total)`
    /// once per completed pair. The callback is a side channel and never
    /// affects results.
    pub fn compare_with_progress(
        &self,
        folders: &[PathBuf],
        excluded: &HashSet<String>,
        progress: &(dyn Fn(usize, usize) + Sync),
    ) -> Result<Vec<FolderComparison>> {
        let mut pairs = Vec::new();
        for i in 0..folders.len() {
            for j in (i + 1)..folders.len() {
                pairs.push((&folders[i], &folders[j]));
            }
        }

        let total = pairs.len();
        let done = AtomicUsize::new(0);

        let run = |pair: &(&PathBuf, &PathBuf)| -> Result<Option<FolderComparison>> {
            let comparison = self.compare_folders(pair.0, pair.1, excluded)?;
            progress(done.fetch_add(1, Ordering::SeqCst) + 1, total);
            Ok(comparison)
        };

        let results: Vec<Result<Option<FolderComparison>>> = if self.parallel {
            pairs.par_iter().map(run).collect()
        } else {
            pairs.iter().map(run).collect()
        };

        let mut comparisons = Vec::new();
        for result in results {
            if let Some(comparison) = result? {
                comparisons.push(comparison);
            }
        }

        // Completion order is unspecified under parallel execution; restore a
        // deterministic order by folder identifiers.
        comparisons.sort_by(|a, b| (&a.folder1, &a.folder2).cmp(&(&b.folder1, &b.folder2)));

        Ok(comparisons)
    }

    fn compare_folders(
        &self,
        folder1: &Path,
        folder2: &Path,
        excluded: &HashSet<String>,
    ) -> Result<Option<FolderComparison>> {
        let units1 = frontend::parse_folder(folder1, excluded)?;
        let units2 = frontend::parse_folder(folder2, excluded)?;

        // Cannot compare without at least one type on each side.
        if units1.is_empty() || units2.is_empty() {
            return Ok(None);
        }

        let mut comparison = FolderComparison::new(
            folder1.display().to_string(),
            folder2.display().to_string(),
        );
        for unit in &units1 {
            let matched = self.matcher.find_match(unit, &units2)?;
            comparison.add(TypeComparison {
                file1: unit.file().to_path_buf(),
                file2: matched.file().to_path_buf(),
                type1: unit.name().to_string(),
                type2: matched.name().to_string(),
                metrics: self.metrics.compute(unit, matched),
            });
        }

        Ok(Some(comparison))
    }
}
