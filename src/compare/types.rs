// src/compare/types.rs
//! Result entities produced by a comparison run.

use std::path::PathBuf;

use serde::Serialize;

use crate::matching::MetricVector;

/// One matched pair of types plus its metric vector.
///
/// Every `TypeComparison` in a run carries the same metric names in the same
/// order, so a result list is tabulable under one shared header.
#[derive(Debug, Clone, Serialize)]
pub struct TypeComparison {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub type1: String,
    pub type2: String,
    pub metrics: MetricVector,
}

/// All matched pairs of one folder pair.
///
/// Only constructed when both folders produced at least one program unit.
#[derive(Debug, Clone, Serialize)]
pub struct FolderComparison {
    pub folder1: String,
    pub folder2: String,
    pub type_comparisons: Vec<TypeComparison>,
}

impl FolderComparison {
    #[must_use]
    pub fn new(folder1: impl Into<String>, folder2: impl Into<String>) -> Self {
        Self {
            folder1: folder1.into(),
            folder2: folder2.into(),
            type_comparisons: Vec::new(),
        }
    }

    pub fn add(&mut self, comparison: TypeComparison) {
        self.type_comparisons.push(comparison);
    }
}
