// src/bundle.rs
//! Submission bundle unpacking.
//!
//! A bundle is a zip of per-student directories whose contents are, again,
//! zip archives (the shape course platforms export). Unpacking extracts the
//! outer bundle, transparently unpacks each nested student archive in place,
//! deletes the consumed inner archives, and returns the per-student folders
//! ready to feed into the comparison engine.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{Result, SiftError};

/// Unpacks `bundle` next to itself into `<bundle>_unpacked`.
///
/// # Errors
/// See [`unpack_submissions_to`].
pub fn unpack_submissions(bundle: &Path) -> Result<Vec<PathBuf>> {
    let unpack_dir = PathBuf::from(format!("{}_unpacked", bundle.display()));
    unpack_submissions_to(bundle, &unpack_dir)
}

/// Unpacks `bundle` into `unpack_dir` and returns the student folders,
/// sorted by name.
///
/// Any stale `unpack_dir` from a previous run is deleted first; the
/// directory is entirely owned by this function.
///
/// # Errors
/// Returns an error on unreadable or malformed archives and on filesystem
/// failures.
pub fn unpack_submissions_to(bundle: &Path, unpack_dir: &Path) -> Result<Vec<PathBuf>> {
    if unpack_dir.exists() {
        fs::remove_dir_all(unpack_dir).map_err(|e| SiftError::io(e, unpack_dir))?;
    }

    extract_archive(bundle, unpack_dir)?;

    // Student submissions are archives themselves; unpack each one where it
    // sits and drop the consumed archive.
    let nested: Vec<PathBuf> = WalkDir::new(unpack_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    for archive in nested {
        let target = archive
            .parent()
            .map_or_else(|| unpack_dir.to_path_buf(), Path::to_path_buf);
        extract_archive(&archive, &target)?;
        fs::remove_file(&archive).map_err(|e| SiftError::io(e, &archive))?;
    }

    let mut folders = Vec::new();
    let entries = fs::read_dir(unpack_dir).map_err(|e| SiftError::io(e, unpack_dir))?;
    for entry in entries {
        let entry = entry.map_err(|e| SiftError::io(e, unpack_dir))?;
        if entry.path().is_dir() {
            folders.push(entry.path());
        }
    }
    folders.sort();

    Ok(folders)
}

fn extract_archive(archive: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| SiftError::io(e, archive))?;
    let mut zip = ZipArchive::new(file)?;
    zip.extract(target)?;
    Ok(())
}
