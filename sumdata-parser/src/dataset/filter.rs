//! Quality filter
//!
//! Keeps records that look like a real headline for a real first sentence. A record is
//! dropped when:
//!
//! - the article has no `.` word
//! - the lower-cased title contains a denylisted string (wire-service boilerplate such as
//!   `update`, `writethru` or `-lrb-`, and punctuation that never appears in headlines)
//! - the article or title word count is outside its open interval
//! - title and article share no lower-cased word of at least four characters
//!
//! Passing lines are echoed back trimmed but otherwise unchanged.

use log::{debug, info, trace};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::{BufRead, Write};

use crate::agiga::source::LossyLines;
use crate::error::Result;
use crate::record::RecordLine;

/// Default denylist, matched as substrings of the lower-cased title.
pub const DEFAULT_BAD_WORDS: &[&str] = &[
    "update#",
    "update",
    "recasts",
    "undated",
    "grafs",
    "corrects",
    "retransmitting",
    "updates",
    "dateline",
    "writethru",
    "recaps",
    "inserts",
    "incorporates",
    "adv##",
    "ld-writethru",
    "djlfx",
    "edits",
    "byline",
    "repetition",
    "background",
    "thruout",
    "quotes",
    "attention",
    "ny###",
    "overline",
    "embargoed",
    "ap",
    "gmt",
    "adds",
    "embargo",
    "urgent",
    "?",
    " i ",
    " : ",
    " - ",
    " by ",
    "-lrb-",
    "-rrb-",
];

/// Filter thresholds. Word-count bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub bad_words: Vec<String>,
    pub article_min: usize,
    pub article_max: usize,
    pub title_min: usize,
    pub title_max: usize,
    pub min_shared_words: usize,
    /// Only words at least this many characters long count as shared
    pub shared_word_min_len: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            bad_words: DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect(),
            article_min: 10,
            article_max: 100,
            title_min: 3,
            title_max: 50,
            min_shared_words: 1,
            shared_word_min_len: 4,
        }
    }
}

/// Why a line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    FieldCount,
    EmptyWord,
    NoPeriod,
    BadWord(String),
    ArticleLength(usize),
    TitleLength(usize),
    NoSharedWords,
}

impl Rejection {
    /// Short stable name, used as a summary key
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::FieldCount => "field-count",
            Rejection::EmptyWord => "empty-word",
            Rejection::NoPeriod => "no-period",
            Rejection::BadWord(_) => "bad-word",
            Rejection::ArticleLength(_) => "article-length",
            Rejection::TitleLength(_) => "title-length",
            Rejection::NoSharedWords => "no-shared-words",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::FieldCount => write!(f, "record does not have four fields"),
            Rejection::EmptyWord => write!(f, "empty word"),
            Rejection::NoPeriod => write!(f, "article has no period"),
            Rejection::BadWord(word) => write!(f, "title contains {:?}", word),
            Rejection::ArticleLength(n) => write!(f, "article has {} words", n),
            Rejection::TitleLength(n) => write!(f, "title has {} words", n),
            Rejection::NoSharedWords => write!(f, "title and article share no words"),
        }
    }
}

/// Counts from one filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub rejected: BTreeMap<&'static str, usize>,
}

impl FilterStats {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QualityFilter {
    options: FilterOptions,
}

impl QualityFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    /// Check one record line, returning its parsed view when it passes.
    pub fn check<'a>(&self, line: &'a str) -> std::result::Result<RecordLine<'a>, Rejection> {
        let fields = RecordLine::parse(line).ok_or(Rejection::FieldCount)?;
        let title_words: Vec<&str> = fields.title_words().collect();
        let article_words: Vec<&str> = fields.article_words().collect();

        if title_words.iter().chain(&article_words).any(|w| w.is_empty()) {
            return Err(Rejection::EmptyWord);
        }
        if !article_words.iter().any(|w| *w == ".") {
            return Err(Rejection::NoPeriod);
        }

        let title_lower = fields.title.to_lowercase();
        if let Some(bad) = self
            .options
            .bad_words
            .iter()
            .find(|bad| title_lower.contains(bad.as_str()))
        {
            return Err(Rejection::BadWord(bad.clone()));
        }

        let opts = &self.options;
        if !(opts.article_min < article_words.len() && article_words.len() < opts.article_max) {
            return Err(Rejection::ArticleLength(article_words.len()));
        }
        if !(opts.title_min < title_words.len() && title_words.len() < opts.title_max) {
            return Err(Rejection::TitleLength(title_words.len()));
        }

        let title_set = self.content_words(&title_words);
        let article_set = self.content_words(&article_words);
        if title_set.intersection(&article_set).count() < opts.min_shared_words {
            return Err(Rejection::NoSharedWords);
        }

        Ok(fields)
    }

    fn content_words(&self, words: &[&str]) -> HashSet<String> {
        words
            .iter()
            .filter(|w| w.chars().count() >= self.options.shared_word_min_len)
            .map(|w| w.to_lowercase())
            .collect()
    }

    /// Echo passing lines from `reader` to `writer`.
    pub fn filter_lines<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<FilterStats> {
        let mut stats = FilterStats::default();
        for line in LossyLines::new(reader) {
            let line = line?;
            match self.check(&line) {
                Ok(fields) => {
                    writeln!(writer, "{}", fields.line)?;
                    stats.kept += 1;
                }
                Err(Rejection::FieldCount) => {
                    trace!("Skipping malformed record line");
                    *stats.rejected.entry(Rejection::FieldCount.kind()).or_default() += 1;
                }
                Err(reason) => {
                    debug!("Rejected: {}", reason);
                    *stats.rejected.entry(reason.kind()).or_default() += 1;
                }
            }
        }
        writer.flush()?;
        info!("Kept {} records, rejected {}", stats.kept, stats.rejected_total());
        Ok(stats)
    }
}
