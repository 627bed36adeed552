// src/matching/metrics.rs
//! The reported metric pipeline for a confirmed matched pair.
//!
//! Metric scorers reuse the raw distance signals but report comparable,
//! size-normalized values: size-sensitive distances (tree diff, count delta)
//! are divided by the larger unit's element count, giving a scale-invariant
//! value in roughly [0, 1]; string-similarity measures are reported as
//! `1 - similarity` so that 0 uniformly means identical. The metric list is
//! fixed per run, so every comparison's vector shares one header.

use serde::Serialize;

use crate::error::Result;
use crate::frontend::{ProgramUnit, UnitVariant};
use crate::similarity::{jaro_winkler, token_jaccard};

use super::scorer::{build_set, CountDiffScorer, Scorer, TreeDiffScorer};

/// One reported name/value entry of a metric vector.
#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

/// Ordered metric vector of one matched pair.
pub type MetricVector = Vec<Metric>;

fn max_element_count(a: &ProgramUnit, b: &ProgramUnit) -> f64 {
    a.element_count().max(b.element_count()).max(1) as f64
}

/// Tree diff size normalized by the larger unit's element count.
#[derive(Debug)]
pub struct TreeDiffMetric {
    inner: TreeDiffScorer,
}

impl TreeDiffMetric {
    #[must_use]
    pub fn new(variant: UnitVariant) -> Self {
        Self {
            inner: TreeDiffScorer::new(variant),
        }
    }
}

impl Scorer for TreeDiffMetric {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn variant(&self) -> UnitVariant {
        self.inner.variant()
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        self.inner.compute(a, b) / max_element_count(a, b)
    }
}

/// Element-count delta normalized by the larger unit's element count.
#[derive(Debug)]
pub struct CountDiffMetric;

impl Scorer for CountDiffMetric {
    fn name(&self) -> &'static str {
        "count_diff"
    }

    fn variant(&self) -> UnitVariant {
        UnitVariant::Original
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        CountDiffScorer.compute(a, b) / max_element_count(a, b)
    }
}

/// `1 - token-overlap similarity` over the full rendering.
#[derive(Debug)]
pub struct JaccardMetric {
    variant: UnitVariant,
}

impl JaccardMetric {
    #[must_use]
    pub fn new(variant: UnitVariant) -> Self {
        Self { variant }
    }
}

impl Scorer for JaccardMetric {
    fn name(&self) -> &'static str {
        match self.variant {
            UnitVariant::Original => "jaccard",
            UnitVariant::Normalized => "jaccard_renamed",
        }
    }

    fn variant(&self) -> UnitVariant {
        self.variant
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        1.0 - token_jaccard(&a.form(self.variant).text, &b.form(self.variant).text)
    }
}

/// `1 - affix-weighted (Jaro-Winkler) similarity` over the full rendering.
#[derive(Debug)]
pub struct JaroWinklerMetric {
    variant: UnitVariant,
}

impl JaroWinklerMetric {
    #[must_use]
    pub fn new(variant: UnitVariant) -> Self {
        Self { variant }
    }
}

impl Scorer for JaroWinklerMetric {
    fn name(&self) -> &'static str {
        match self.variant {
            UnitVariant::Original => "jaro_winkler",
            UnitVariant::Normalized => "jaro_winkler_renamed",
        }
    }

    fn variant(&self) -> UnitVariant {
        self.variant
    }

    fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> f64 {
        1.0 - jaro_winkler(&a.form(self.variant).text, &b.form(self.variant).text)
    }
}

/// Default metric list (mirrors the matching signals plus the string
/// similarity measures, each on both renderings).
#[must_use]
pub fn default_metric_names() -> Vec<String> {
    [
        "tree_diff",
        "tree_diff_renamed",
        "count_diff",
        "jaccard",
        "jaccard_renamed",
        "jaro_winkler",
        "jaro_winkler_renamed",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn metric_scorer_by_name(name: &str) -> Option<Box<dyn Scorer>> {
    match name {
        "tree_diff" => Some(Box::new(TreeDiffMetric::new(UnitVariant::Original))),
        "tree_diff_renamed" => Some(Box::new(TreeDiffMetric::new(UnitVariant::Normalized))),
        "count_diff" => Some(Box::new(CountDiffMetric)),
        "jaccard" => Some(Box::new(JaccardMetric::new(UnitVariant::Original))),
        "jaccard_renamed" => Some(Box::new(JaccardMetric::new(UnitVariant::Normalized))),
        "jaro_winkler" => Some(Box::new(JaroWinklerMetric::new(UnitVariant::Original))),
        "jaro_winkler_renamed" => Some(Box::new(JaroWinklerMetric::new(UnitVariant::Normalized))),
        _ => None,
    }
}

/// Builds the metric scorer list from configured names.
///
/// # Errors
/// Rejects duplicate and unknown names as configuration errors.
pub fn metric_scorers(names: &[String]) -> Result<Vec<Box<dyn Scorer>>> {
    build_set(names, metric_scorer_by_name)
}

/// The fixed, ordered metric scorer list of one run.
pub struct MetricSet {
    scorers: Vec<Box<dyn Scorer>>,
}

impl MetricSet {
    #[must_use]
    pub fn new(scorers: Vec<Box<dyn Scorer>>) -> Self {
        Self { scorers }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        // Default names always resolve.
        Self::new(metric_scorers(&default_metric_names()).unwrap_or_default())
    }

    /// Builds a metric set from configured names.
    ///
    /// # Errors
    /// Rejects duplicate and unknown names.
    pub fn from_names(names: &[String]) -> Result<Self> {
        Ok(Self::new(metric_scorers(names)?))
    }

    /// The metric names in report order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.scorers.iter().map(|s| s.name()).collect()
    }

    /// Computes the metric vector for one matched pair, in configured order.
    #[must_use]
    pub fn compute(&self, a: &ProgramUnit, b: &ProgramUnit) -> MetricVector {
        self.scorers
            .iter()
            .map(|scorer| Metric {
                name: scorer.name().to_string(),
                value: scorer.compute(a, b),
            })
            .collect()
    }
}
