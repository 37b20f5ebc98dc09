//! DUC evaluation data
//!
//! Builds the DUC task-1 test set (lead sentences plus reference summaries) and arranges
//! reference and system outputs into the directory layout ROUGE scores.

pub mod rouge;
pub mod testset;
pub mod treebank;

pub use rouge::{layout as rouge_layout, restore_numbers, RougePaths, RougeStats};
pub use testset::{build_test_set, DucOptions, DucPaths, DucStats};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Entries of `dir`, sorted by path, hidden names skipped.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io_at(dir, e))? {
        let entry = entry.map_err(|e| Error::io_at(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// DUC files are mostly ASCII with stray Latin-1 bytes.
pub(crate) fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io_at(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
