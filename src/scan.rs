//! Input file discovery.
//!
//! Lists the `.dss` files inside an input directory, matching the extension
//! case-insensitively (dictation devices commonly write `.DSS`).
//!
//! Recursion is an explicit choice, not a hidden behavior difference between
//! call sites: `recurse = false` walks only the directory itself, while
//! `recurse = true` descends into subdirectories. Either way the returned
//! order is directory iteration order, which is not guaranteed sorted.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// The input extension we look for, compared case-insensitively.
pub const DSS_EXTENSION: &str = "dss";

/// List the `.dss` files in `dir`.
///
/// Fails with [`Error::NotADirectory`] when `dir` is not a directory, and with
/// [`Error::Scan`] when enumeration itself fails partway through.
pub fn list_dss_files(dir: &Path, recurse: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    if recurse {
        list_recursive(dir)
    } else {
        list_flat(dir)
    }
}

fn list_flat(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Scan {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Scan {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.is_file() && has_dss_extension(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

fn list_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| Error::Scan {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;

        if entry.file_type().is_file() && has_dss_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn has_dss_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DSS_EXTENSION))
}
