//! Vocabulary building
//!
//! Counts lower-cased title and article words over a record file and writes two
//! frequency-ordered dictionaries, `<prefix>.article.dict` and `<prefix>.title.dict`. Each
//! starts with the decoder's pseudo-tokens, then lists `word count` lines in descending
//! count order until the first word below the minimum count.

use log::{info, trace};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::agiga::source::LossyLines;
use crate::error::{Error, Result};
use crate::record::RecordLine;

/// Dictionary settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictOptions {
    /// Words seen fewer times than this end the dictionary
    pub min_count: u64,
    /// Written first, in this order, with `pseudo_count`
    pub pseudo_tokens: Vec<String>,
    /// Count printed for pseudo-tokens. Kept as text: existing dictionaries carry `100000.0`.
    pub pseudo_count: String,
}

impl Default for DictOptions {
    fn default() -> Self {
        Self {
            min_count: 1,
            pseudo_tokens: vec!["<unk>".to_string(), "<s>".to_string(), "</s>".to_string()],
            pseudo_count: "100000.0".to_string(),
        }
    }
}

/// Word counts that remember first-seen order, so equal counts list deterministically.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    pub fn count(&self, word: &str) -> u64 {
        self.index.get(word).map_or(0, |&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words by descending count; ties keep first-seen order.
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Counts title and article words across record lines.
#[derive(Debug, Clone, Default)]
pub struct DictionaryBuilder {
    pub title: WordCounter,
    pub article: WordCounter,
    /// Lines skipped for not having four fields
    pub skipped: usize,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, line: &str) {
        let Some(fields) = RecordLine::parse(line) else {
            trace!("Skipping malformed record line");
            self.skipped += 1;
            return;
        };
        for word in fields.title.to_lowercase().split_whitespace() {
            self.title.add(word);
        }
        for word in fields.article.to_lowercase().split_whitespace() {
            self.article.add(word);
        }
    }

    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in LossyLines::new(reader) {
            self.add_line(&line?);
        }
        Ok(())
    }

    /// Write both dictionaries next to `prefix`. Returns the article and title paths.
    pub fn write_files(&self, prefix: &Path, options: &DictOptions) -> Result<(PathBuf, PathBuf)> {
        let article_path = suffixed(prefix, ".article.dict");
        let title_path = suffixed(prefix, ".title.dict");
        write_dict_file(&article_path, &self.article, options)?;
        write_dict_file(&title_path, &self.title, options)?;
        info!(
            "Wrote {} article and {} title words ({} lines skipped)",
            self.article.len(),
            self.title.len(),
            self.skipped
        );
        Ok((article_path, title_path))
    }
}

/// Write one dictionary: pseudo-tokens, then words down to the minimum count.
pub fn write_dict<W: Write>(mut writer: W, counter: &WordCounter, options: &DictOptions) -> Result<()> {
    for token in &options.pseudo_tokens {
        writeln!(writer, "{} {}", token, options.pseudo_count)?;
    }
    for (word, count) in counter.most_common() {
        if count < options.min_count {
            break;
        }
        writeln!(writer, "{} {}", word, count)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_dict_file(path: &Path, counter: &WordCounter, options: &DictOptions) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io_at(path, e))?;
    write_dict(BufWriter::new(file), counter, options)
}

fn suffixed(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
