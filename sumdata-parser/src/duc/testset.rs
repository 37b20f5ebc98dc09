//! DUC task-1 test set
//!
//! Each DUC document becomes one input line: its lead sentence, lower-cased and
//! Treebank-tokenized. The four human reference summaries of the document go, one per
//! file, to `task1_ref0.txt` .. `task1_ref3.txt`, line-aligned with the inputs. The first
//! 75 characters of each input are also written as the `prefix` baseline system.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

use crate::duc::{list_files, read_lossy, treebank};
use crate::error::{Error, Result};

/// Dateline separators; the lead sentence starts after the first one.
static DATELINE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r" ((--)|-|_) ").unwrap());

/// Abbreviations that end in a period without ending the sentence. Compared lower-cased.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "rev.", "st.", "jr.", "sr.", "sen.", "rep.", "gov.",
    "pres.", "gen.", "lt.", "col.", "maj.", "capt.", "sgt.", "cpl.", "adm.", "corp.", "inc.",
    "co.", "ltd.", "no.", "ft.", "mt.", "vs.", "jan.", "feb.", "aug.", "sept.", "oct.", "nov.",
    "dec.", "u.s.", "u.n.", "calif.", "fla.", "mass.", "wash.",
];

fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(last) = segment.split_whitespace().next_back() else {
        return false;
    };
    let last = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    let lower = last.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    // a lone initial such as the `F.` of `John F. Kennedy`
    let mut chars = last.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_uppercase()
    )
}

/// Sentences of a text. UAX #29 boundaries, except that a boundary right after a known
/// abbreviation or a single initial is not a sentence end.
pub fn sentences(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut pending: Option<String> = None;
    for segment in text.unicode_sentences().map(str::trim).filter(|s| !s.is_empty()) {
        let sentence = match pending.take() {
            Some(mut head) => {
                head.push(' ');
                head.push_str(segment);
                head
            }
            None => segment.to_string(),
        };
        if ends_with_abbreviation(&sentence) {
            pending = Some(sentence);
        } else {
            out.push(sentence);
        }
    }
    out.extend(pending);
    out
}

/// Where the DUC inputs live and where outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DucPaths {
    /// `<sum_docs>/<docset>/<document>`
    pub sum_docs: PathBuf,
    /// Flat directory of reference summaries
    pub result_docs: PathBuf,
    pub ref_dir: PathBuf,
    pub sys_dir: PathBuf,
    pub article_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DucOptions {
    /// `2003` uses the `.10.` reference naming and treats `_` as a dateline separator
    pub year: String,
    /// A lead sentence shorter than this gets the second sentence appended
    pub short_sentence_chars: usize,
    pub prefix_chars: usize,
    pub reference_count: usize,
}

impl Default for DucOptions {
    fn default() -> Self {
        Self {
            year: "2004".to_string(),
            short_sentence_chars: 130,
            prefix_chars: 75,
            reference_count: 4,
        }
    }
}

impl DucOptions {
    fn is_2003(&self) -> bool {
        self.year == "2003"
    }
}

/// Text of a DUC document: the trimmed lines after `<TEXT>`, paragraph markers removed,
/// joined by spaces, with `&`-entities dropped. Stops at `</TEXT>`.
pub fn article_text(document: &str) -> String {
    let mut in_text = false;
    let mut words: Vec<&str> = Vec::new();
    for line in document.lines() {
        let line = line.trim();
        if line == "<P>" || line == "</P>" {
            continue;
        }
        if line == "</TEXT>" {
            break;
        }
        if in_text {
            words.extend(line.split_whitespace().filter(|w| !w.starts_with('&')));
        }
        if line == "<TEXT>" {
            in_text = true;
        }
    }
    words.join(" ")
}

/// The tokenized lead of an article, or `None` when the article has no sentences.
pub fn lead_sentence(text: &str, options: &DucOptions) -> Option<String> {
    let sentences = sentences(text);
    let first = sentences.first()?;

    let lead = match sentences.get(1) {
        Some(second) if first.chars().count() < options.short_sentence_chars => {
            let mut chars = first.chars();
            chars.next_back();
            format!("{} , {}", chars.as_str(), second)
        }
        _ => first.clone(),
    };

    let mut lead = treebank::tokenize(&lead.to_lowercase()).join(" ");
    if lead.contains(')') || (options.is_2003() && lead.contains('_')) {
        if let Some(sep) = DATELINE_SEPARATOR.find(&lead) {
            lead = lead[sep.end()..].to_string();
        }
    }
    Some(
        lead.replace('(', "-lrb-")
            .replace(')', "-rrb-")
            .replace('_', ","),
    )
}

/// Reference summaries for one document, sorted by name.
pub fn find_references(
    result_docs: &[PathBuf],
    docset: &str,
    name: &str,
    options: &DucOptions,
) -> Vec<PathBuf> {
    let mut matches: Vec<PathBuf> = result_docs
        .iter()
        .filter(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            let Some(rest) = file_name.strip_prefix(docset) else {
                return false;
            };
            if options.is_2003() {
                rest.find(".10.")
                    .is_some_and(|i| rest[i + ".10.".len()..].contains(name))
            } else {
                rest.contains(name)
            }
        })
        .cloned()
        .collect();
    matches.sort();
    matches
}

/// Docset id and document name for a DUC article path: the parent directory name minus
/// its last character, and the file name, both upper-cased.
pub fn document_ids(path: &Path) -> Option<(String, String)> {
    let name = path.file_name()?.to_string_lossy().to_uppercase();
    let dir = path.parent()?.file_name()?.to_string_lossy().into_owned();
    let mut chars = dir.chars();
    chars.next_back();
    Some((chars.as_str().to_uppercase(), name))
}

/// Counts from one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DucStats {
    pub documents: usize,
    pub empty: usize,
}

/// Build the article, prefix and reference files.
pub fn build_test_set(paths: &DucPaths, options: &DucOptions) -> Result<DucStats> {
    let mut refs = (0..options.reference_count)
        .map(|i| create(&paths.ref_dir.join(format!("task1_ref{}.txt", i))))
        .collect::<Result<Vec<_>>>()?;
    let mut article = create(&paths.article_file)?;
    let mut prefix = create(&paths.sys_dir.join("task1_prefix.txt"))?;

    let mut documents = Vec::new();
    for docset_dir in list_files(&paths.sum_docs)? {
        if docset_dir.is_dir() {
            documents.extend(list_files(&docset_dir)?.into_iter().filter(|p| p.is_file()));
        }
    }
    documents.sort();
    let result_docs: Vec<PathBuf> = list_files(&paths.result_docs)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();

    let mut stats = DucStats::default();
    for doc in &documents {
        let (docset, name) = document_ids(doc)
            .ok_or_else(|| Error::Duc(format!("cannot name document {}", doc.display())))?;
        let matches = find_references(&result_docs, &docset, &name, options);
        if matches.len() != options.reference_count {
            return Err(Error::Duc(format!(
                "expected {} references for {} {}, found {}",
                options.reference_count,
                docset,
                name,
                matches.len()
            )));
        }
        for (out, reference) in refs.iter_mut().zip(&matches) {
            writeln!(out, "{}", read_lossy(reference)?.trim())?;
        }

        stats.documents += 1;
        match lead_sentence(&article_text(&read_lossy(doc)?), options) {
            Some(lead) => {
                writeln!(article, "{}", lead)?;
                let head: String = lead.chars().take(options.prefix_chars).collect();
                writeln!(prefix, "{}", head)?;
            }
            None => {
                debug!("{} has no sentences", doc.display());
                stats.empty += 1;
                writeln!(article)?;
                writeln!(prefix)?;
            }
        }
    }

    for out in refs.iter_mut().chain([&mut article, &mut prefix]) {
        out.flush()?;
    }
    info!(
        "Built DUC {} test set: {} documents ({} without text)",
        options.year, stats.documents, stats.empty
    );
    Ok(stats)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| Error::io_at(path, e))?;
    Ok(BufWriter::new(file))
}
