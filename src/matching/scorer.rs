// src/matching/scorer.rs
//! Distance scorers used to rank match candidates.
//!
//! A scorer is a pure, named distance function over two program units; lower
//! means more similar. Each scorer reads exactly one rendering of its inputs,
//! selected by a fixed original/normalized flag. Scorers live in an ordered
//! list and are looked up by name; duplicate or unknown names are rejected
//! before any comparison runs.

use std::collections::HashSet;

use crate::diff::structural_diff_size;
use crate::error::{Result, SiftError};
use crate::frontend::{ProgramUnit, UnitVariant};
use crate::similarity::levenshtein;

/// A named distance function between two program units. Lower = more similar.
pub trait Scorer: Send + Sync + std::fmt::Debug {
    /// Name unique within the active configuration.
    fn name(&self) -> &'static str;

    /// Which rendering of the inputs this scorer reads.
    fn variant(&self) -> UnitVariant;

    /// Nonnegative distance between the two units.
    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64;
}

/// Size of the structural edit script between the two units.
#[derive(Debug)]
pub struct TreeDiffScorer {
    variant: UnitVariant,
}

impl TreeDiffScorer {
    #[must_use]
    pub fn new(variant: UnitVariant) -> Self {
        Self { variant }
    }
}

impl Scorer for TreeDiffScorer {
    fn name(&self) -> &'static str {
        match self.variant {
            UnitVariant::Original => "tree_diff",
            UnitVariant::Normalized => "tree_diff_renamed",
        }
    }

    fn variant(&self) -> UnitVariant {
        self.variant
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        structural_diff_size(a.form(self.variant), b.form(self.variant)) as f64
    }
}

/// Absolute difference in syntax-subtree element counts.
#[derive(Debug)]
pub struct CountDiffScorer;

impl Scorer for CountDiffScorer {
    fn name(&self) -> &'static str {
        "count_diff"
    }

    fn variant(&self) -> UnitVariant {
        UnitVariant::Original
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        a.element_count().abs_diff(b.element_count()) as f64
    }
}

/// Character-level edit distance between the declared names.
#[derive(Debug)]
pub struct NameDistanceScorer;

impl Scorer for NameDistanceScorer {
    fn name(&self) -> &'static str {
        "name_distance"
    }

    fn variant(&self) -> UnitVariant {
        UnitVariant::Original
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        levenshtein(a.simple_name(), b.simple_name()) as f64
    }
}

/// Default matching list: both tree diffs, the count delta, and the name
/// distance.
#[must_use]
pub fn default_matching_names() -> Vec<String> {
    ["tree_diff", "tree_diff_renamed", "count_diff", "name_distance"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Builds the matching scorer list from configured names.
///
/// # Errors
/// Rejects duplicate and unknown names as configuration errors.
pub fn matching_scorers(names: &[String]) -> Result<Vec<Box<dyn Scorer>>> {
    build_set(names, matching_scorer_by_name)
}

fn matching_scorer_by_name(name: &str) -> Option<Box<dyn Scorer>> {
    match name {
        "tree_diff" => Some(Box::new(TreeDiffScorer::new(UnitVariant::Original))),
        "tree_diff_renamed" => Some(Box::new(TreeDiffScorer::new(UnitVariant::Normalized))),
        "count_diff" => Some(Box::new(CountDiffScorer)),
        "name_distance" => Some(Box::new(NameDistanceScorer)),
        _ => None,
    }
}

/// Shared name-list validation for both scorer registries.
pub(crate) fn build_set(
    names: &[String],
    lookup: impl Fn(&str) -> Option<Box<dyn Scorer>>,
) -> Result<Vec<Box<dyn Scorer>>> {
    let mut seen = HashSet::new();
    let mut scorers = Vec::with_capacity(names.len());

    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(SiftError::Config(format!("duplicate scorer name: {name}")));
        }
        let scorer = lookup(name)
            .ok_or_else(|| SiftError::Config(format!("unknown scorer name: {name}")))?;
        scorers.push(scorer);
    }

    Ok(scorers)
}
