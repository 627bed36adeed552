// src/frontend/unit.rs
//! The program unit produced by folder parsing.

use std::path::{Path, PathBuf};

/// Selects which rendering of a unit a scorer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitVariant {
    /// The source text as written by the student.
    Original,
    /// The identifier-normalized copy, resilient to renaming.
    Normalized,
}

/// One concrete rendering of a unit: its text plus the preorder structural
/// token sequence ("outline") the tree-diff operates on.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitForm {
    pub text: String,
    pub outline: Vec<String>,
}

/// One declared type found while parsing a submission folder.
///
/// Immutable once built. The normalized form is an independent value computed
/// at parse time; nothing here can mutate the original to obtain it.
#[derive(Debug, Clone)]
pub struct ProgramUnit {
    /// Qualified name within its folder, `Outer.Inner` for nested types.
    name: String,
    /// Source file the declaration was found in.
    file: PathBuf,
    /// Number of nodes in the unit's syntax subtree.
    element_count: usize,
    original: UnitForm,
    normalized: UnitForm,
}

impl ProgramUnit {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        file: impl Into<PathBuf>,
        element_count: usize,
        original: UnitForm,
        normalized: UnitForm,
    ) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            element_count,
            original,
            normalized,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    #[must_use]
    pub fn form(&self, variant: UnitVariant) -> &UnitForm {
        match variant {
            UnitVariant::Original => &self.original,
            UnitVariant::Normalized => &self.normalized,
        }
    }

    #[must_use]
    pub fn original(&self) -> &UnitForm {
        &self.original
    }

    #[must_use]
    pub fn normalized(&self) -> &UnitForm {
        &self.normalized
    }
}
