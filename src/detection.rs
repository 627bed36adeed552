// src/detection.rs
//! Plagiarism decision: reduces one metric vector to a boolean verdict.

use crate::compare::{FolderComparison, TypeComparison};
use crate::error::{Result, SiftError};
use crate::matching::Metric;

/// A pluggable decision strategy over one metric vector.
pub trait Detection: Send + Sync {
    /// Whether the metric vector indicates plagiarism.
    ///
    /// # Errors
    /// An empty metric vector is a configuration error, never "not
    /// plagiarism".
    fn is_plagiarism(&self, metrics: &[Metric]) -> Result<bool>;
}

/// Default strategy: arithmetic mean of all metric values against a fixed
/// threshold. Metrics are distance-like (0 = identical), so a *low* mean is
/// suspicious.
pub struct AvgDetection {
    threshold: f64,
}

impl AvgDetection {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Detection for AvgDetection {
    fn is_plagiarism(&self, metrics: &[Metric]) -> Result<bool> {
        if metrics.is_empty() {
            return Err(SiftError::EmptyMetrics);
        }
        let mean = metrics.iter().map(|m| m.value).sum::<f64>() / metrics.len() as f64;
        Ok(mean < self.threshold)
    }
}

/// Applies a decision strategy across a comparison list.
pub struct Detector {
    detection: Box<dyn Detection>,
}

impl Detector {
    #[must_use]
    pub fn new(detection: Box<dyn Detection>) -> Self {
        Self { detection }
    }

    /// Returns the folder comparisons where plagiarism was detected.
    ///
    /// The input is never modified: each returned `FolderComparison` is a
    /// fresh copy holding only the flagged `TypeComparison`s, and a folder
    /// pair appears only if at least one of its pairs was flagged.
    ///
    /// # Errors
    /// Propagates decision errors (e.g. an empty metric vector).
    pub fn detect(&self, comparisons: &[FolderComparison]) -> Result<Vec<FolderComparison>> {
        let mut detected = Vec::new();

        for comparison in comparisons {
            let mut flagged: Vec<TypeComparison> = Vec::new();
            for tc in &comparison.type_comparisons {
                if self.detection.is_plagiarism(&tc.metrics)? {
                    flagged.push(tc.clone());
                }
            }
            if !flagged.is_empty() {
                detected.push(FolderComparison {
                    folder1: comparison.folder1.clone(),
                    folder2: comparison.folder2.clone(),
                    type_comparisons: flagged,
                });
            }
        }

        Ok(detected)
    }
}
