//! The four-field summarization record
//!
//!     Every tool in the pipeline speaks the same flat format, one record per line:
//!
//!         title_parse \t article_parse \t title_words \t article_words
//!
//!     The extractor produces owned [SummaryRecord]s. The downstream tools only need to look
//!     at a line and sometimes echo it back unchanged, so they work on the borrowed
//!     [RecordLine] view instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

use crate::error::{Error, Result};

/// One extracted title/article pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Normalized bracketed parse of the headline
    pub title_parse: String,
    /// Body parse lines joined under the synthetic root node
    pub article_parse: String,
    /// Leaf words of the headline parse
    pub title_words: Vec<String>,
    /// Leaf words of the article parse, up to and including the first period
    pub article_words: Vec<String>,
}

impl SummaryRecord {
    /// Parse a record line. Returns `None` unless the trimmed line has exactly four fields.
    pub fn from_tsv_line(line: &str) -> Option<Self> {
        let fields = RecordLine::parse(line)?;
        Some(SummaryRecord {
            title_parse: fields.title_parse.to_string(),
            article_parse: fields.article_parse.to_string(),
            title_words: fields.title_words().map(str::to_string).collect(),
            article_words: fields.article_words().map(str::to_string).collect(),
        })
    }

    /// Headline words joined by single spaces
    pub fn title(&self) -> String {
        self.title_words.join(" ")
    }

    /// Article words joined by single spaces
    pub fn article(&self) -> String {
        self.article_words.join(" ")
    }

    /// Serialize as one JSON object (no trailing newline)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for SummaryRecord {
    /// The tab-separated line, without the trailing newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.title_parse,
            self.article_parse,
            self.title(),
            self.article()
        )
    }
}

/// How extracted records are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// The four-field tab-separated line every downstream tool reads
    #[default]
    Tsv,
    /// One JSON object per line
    Json,
}

impl RecordFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "tsv" => Ok(RecordFormat::Tsv),
            "json" => Ok(RecordFormat::Json),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }

    /// Write one record followed by a newline.
    pub fn write_record<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        record: &SummaryRecord,
    ) -> io::Result<()> {
        match self {
            RecordFormat::Tsv => writeln!(writer, "{}", record),
            RecordFormat::Json => {
                serde_json::to_writer(&mut *writer, record)?;
                writeln!(writer)
            }
        }
    }
}

/// Borrowed view over a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLine<'a> {
    /// The whole line, trimmed
    pub line: &'a str,
    pub title_parse: &'a str,
    pub article_parse: &'a str,
    pub title: &'a str,
    pub article: &'a str,
}

impl<'a> RecordLine<'a> {
    /// Split a trimmed line on tabs. Surrounding whitespace, tabs included, is removed
    /// first, so a record whose last field is empty does not parse.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        let mut fields = line.split('\t');
        let title_parse = fields.next()?;
        let article_parse = fields.next()?;
        let title = fields.next()?;
        let article = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        Some(RecordLine {
            line,
            title_parse,
            article_parse,
            title,
            article,
        })
    }

    pub fn title_words(&self) -> impl Iterator<Item = &'a str> {
        self.title.split_whitespace()
    }

    pub fn article_words(&self) -> impl Iterator<Item = &'a str> {
        self.article.split_whitespace()
    }
}
