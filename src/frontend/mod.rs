// src/frontend/mod.rs
//! AST front-end: turns a submission folder into a list of program units.
//!
//! Each unit carries an original and an identifier-normalized rendering,
//! computed once at parse time as independent values. The rest of the engine
//! never parses source itself; it only consumes `ProgramUnit`s.

mod extract;
mod normalize;
pub mod unit;

pub use unit::{ProgramUnit, UnitForm, UnitVariant};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::Parser;
use walkdir::WalkDir;

use crate::error::{Result, SiftError};
use crate::lang::Lang;

/// Parses every recognized source file below `folder` and returns the
/// declared types, minus those whose simple or qualified name appears in
/// `excluded`.
///
/// File order is deterministic (sorted walk), so unit enumeration order is
/// stable across runs.
///
/// # Errors
/// Returns an error when the walk, a file read, or parsing fails; a folder
/// without any source files is not an error and yields an empty list.
pub fn parse_folder(folder: &Path, excluded: &HashSet<String>) -> Result<Vec<ProgramUnit>> {
    let mut units = Vec::new();

    for entry in WalkDir::new(folder).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| folder.to_path_buf(), Path::to_path_buf);
            SiftError::Io {
                source: e.into(),
                path,
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(lang) = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Lang::from_ext)
        else {
            continue;
        };

        let path = entry.path().to_path_buf();
        let file_units = parse_file(lang, &path)?;
        units.extend(
            file_units
                .into_iter()
                .filter(|u| !is_excluded(u, excluded)),
        );
    }

    Ok(units)
}

fn parse_file(lang: Lang, path: &Path) -> Result<Vec<ProgramUnit>> {
    let source = fs::read_to_string(path).map_err(|e| SiftError::io(e, path))?;

    let mut parser = Parser::new();
    parser.set_language(lang.grammar()).map_err(|_| SiftError::Parse {
        path: path.to_path_buf(),
    })?;
    let tree = parser.parse(&source, None).ok_or_else(|| SiftError::Parse {
        path: path.to_path_buf(),
    })?;

    Ok(extract::extract_units(lang, path, &source, &tree))
}

fn is_excluded(unit: &ProgramUnit, excluded: &HashSet<String>) -> bool {
    excluded.contains(unit.name()) || excluded.contains(unit.simple_name())
}
