//! ROUGE directory layout
//!
//! Rearranges line-aligned reference and system files into the one-file-per-summary layout
//! the ROUGE scorer expects:
//!
//!     <base>/references/task1_ref0.txt   ->  <gold>/task10000/task10000.0000.gold
//!     <base>/system/task1_prefix.txt     ->  <system>/prefix/task10000.prefix.system
//!
//! System output has its digits masked as `#` (the extractor does this to every training
//! parse). Each masked token is restored from the input sentence when the input has a
//! number of the same length.

use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::duc::{list_files, read_lossy};
use crate::error::{Error, Result};

/// Sentence-start token some decoders emit.
const START_TOKEN: &str = "<s>";

/// Written in place of an empty system summary.
pub const EMPTY_SUMMARY: &str = "fail";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RougePaths {
    /// Holds `references/` and `system/`
    pub base: PathBuf,
    pub gold: PathBuf,
    pub system: PathBuf,
    /// Input sentences, line-aligned with the system files
    pub input: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RougeStats {
    pub gold_files: usize,
    pub system_files: usize,
}

/// Restore masked numbers in one system line from its input line.
///
/// Numbers are input words starting with a digit, keyed by length; when two share a length
/// the later one wins. `<s>` tokens are dropped.
pub fn restore_numbers(system_line: &str, input_line: &str) -> Vec<String> {
    let numbers: HashMap<usize, &str> = input_line
        .split_whitespace()
        .filter(|w| w.starts_with(|c: char| c.is_ascii_digit()))
        .map(|w| (w.chars().count(), w))
        .collect();

    system_line
        .split_whitespace()
        .filter(|w| *w != START_TOKEN)
        .map(|w| {
            let restored = if w.starts_with('#') {
                numbers.get(&w.chars().count()).copied()
            } else {
                None
            };
            restored.unwrap_or(w).to_string()
        })
        .collect()
}

/// `task1_ref0.txt` -> (`task1`, 0). The reference number is the last character of the
/// part after `_`, extension removed.
fn reference_name(path: &Path) -> Option<(String, u32)> {
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    let mut parts = file_name.split('_');
    let (task, reference) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let stem = reference.split('.').next()?;
    let number = stem.chars().last()?.to_digit(10)?;
    Some((task.to_string(), number))
}

/// `task1_prefix.txt` -> (`task1`, `prefix`).
fn system_name(path: &Path) -> Option<(String, String)> {
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    let (task, rest) = file_name.split_once('_')?;
    let system = rest.split('.').next()?;
    Some((task.to_string(), system.to_string()))
}

fn write_line(path: &Path, line: &str) -> Result<()> {
    fs::write(path, format!("{}\n", line)).map_err(|e| Error::io_at(path, e))
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io_at(path, e))
}

/// Write the gold and system trees.
pub fn layout(paths: &RougePaths) -> Result<RougeStats> {
    let mut stats = RougeStats::default();

    for file in list_files(&paths.base.join("references"))? {
        let (task, reference) = reference_name(&file).ok_or_else(|| {
            Error::Duc(format!("unexpected reference file name {}", file.display()))
        })?;
        for (i, line) in read_lossy(&file)?.lines().enumerate() {
            let id = format!("{}{:04}", task, i);
            let dir = paths.gold.join(&id);
            create_dir(&dir)?;
            write_line(&dir.join(format!("{}.{:04}.gold", id, reference)), line.trim())?;
            stats.gold_files += 1;
        }
    }

    let input = read_lossy(&paths.input)?;
    for file in list_files(&paths.base.join("system"))? {
        let (task, system) = system_name(&file).ok_or_else(|| {
            Error::Duc(format!("unexpected system file name {}", file.display()))
        })?;
        let dir = paths.system.join(&system);
        create_dir(&dir)?;
        let output = read_lossy(&file)?;
        for (i, (line, input_line)) in output.lines().zip(input.lines()).enumerate() {
            let words = restore_numbers(line, input_line);
            let summary = if words.is_empty() {
                debug!("{} line {} is empty", file.display(), i);
                EMPTY_SUMMARY.to_string()
            } else {
                words.join(" ")
            };
            write_line(
                &dir.join(format!("{}{:04}.{}.system", task, i, system)),
                &summary,
            )?;
            stats.system_files += 1;
        }
    }

    info!(
        "Wrote {} gold and {} system summaries",
        stats.gold_files, stats.system_files
    );
    Ok(stats)
}
