//! Field projection
//!
//! Pulls one view out of each record line for model training: raw text, vocabulary-mapped
//! lower-cased text, or parse trees.

use log::trace;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::agiga::source::LossyLines;
use crate::error::{Error, Result};
use crate::record::RecordLine;

/// Token substituted for out-of-vocabulary words.
pub const UNKNOWN_WORD: &str = "<unk>";

/// Title tokens dropped by `trg_lc`.
pub const DEFAULT_TITLE_PUNCTUATION: &[&str] = &[
    "\"", "'", "''", "!", "=", "-", "--", ",", "?", ".", "``", "`", "-rrb-", "-llb-", "\\/",
];

/// Which view to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Article words as stored
    Src,
    /// Title words as stored
    Trg,
    /// Lower-cased article words, unknown words replaced
    SrcLc,
    /// Lower-cased title words without punctuation, unknown words replaced
    TrgLc,
    /// Article parse
    SrcTree,
    /// Article parse line, then title parse line
    Interleave,
}

impl ProjectionMode {
    pub const NAMES: &'static [&'static str] =
        &["src", "trg", "src_lc", "trg_lc", "srctree", "interleave"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "src" => Ok(ProjectionMode::Src),
            "trg" => Ok(ProjectionMode::Trg),
            "src_lc" => Ok(ProjectionMode::SrcLc),
            "trg_lc" => Ok(ProjectionMode::TrgLc),
            "srctree" => Ok(ProjectionMode::SrcTree),
            "interleave" => Ok(ProjectionMode::Interleave),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Set of known words, read from a dictionary file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    /// The first whitespace-separated token of every non-blank line is a word.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = HashSet::new();
        for line in LossyLines::new(reader) {
            let line = line?;
            if let Some(word) = line.split_whitespace().next() {
                words.insert(word.to_string());
            }
        }
        Ok(Self { words })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn map_word<'a>(&self, word: &'a str) -> &'a str {
        if self.contains(word) {
            word
        } else {
            UNKNOWN_WORD
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

pub struct Projector {
    mode: ProjectionMode,
    vocab: Vocabulary,
    punctuation: HashSet<String>,
}

impl Projector {
    pub fn new(mode: ProjectionMode, vocab: Vocabulary) -> Self {
        Self::with_punctuation(
            mode,
            vocab,
            DEFAULT_TITLE_PUNCTUATION.iter().map(|p| p.to_string()),
        )
    }

    pub fn with_punctuation(
        mode: ProjectionMode,
        vocab: Vocabulary,
        punctuation: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            mode,
            vocab,
            punctuation: punctuation.into_iter().collect(),
        }
    }

    /// Output lines for one record line; empty when the line is malformed.
    pub fn project_line(&self, line: &str) -> Vec<String> {
        let Some(fields) = RecordLine::parse(line) else {
            trace!("Skipping malformed record line");
            return Vec::new();
        };
        match self.mode {
            ProjectionMode::Src => vec![fields.article.to_string()],
            ProjectionMode::Trg => vec![fields.title.to_string()],
            ProjectionMode::SrcLc => {
                let lower = fields.article.to_lowercase();
                let words: Vec<&str> = lower
                    .split_whitespace()
                    .map(|w| self.vocab.map_word(w))
                    .collect();
                vec![words.join(" ")]
            }
            ProjectionMode::TrgLc => {
                let lower = fields.title.to_lowercase();
                let words: Vec<&str> = lower
                    .split_whitespace()
                    .filter(|w| !self.punctuation.contains(*w))
                    .map(|w| self.vocab.map_word(w))
                    .collect();
                vec![words.join(" ")]
            }
            ProjectionMode::SrcTree => vec![fields.article_parse.to_string()],
            ProjectionMode::Interleave => vec![
                fields.article_parse.to_string(),
                fields.title_parse.to_string(),
            ],
        }
    }

    /// Project every line of `reader` into `writer`. Returns the number of records used.
    pub fn project_lines<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<usize> {
        let mut used = 0;
        for line in LossyLines::new(reader) {
            let output = self.project_line(&line?);
            if !output.is_empty() {
                used += 1;
            }
            for out in output {
                writeln!(writer, "{}", out)?;
            }
        }
        writer.flush()?;
        Ok(used)
    }
}
