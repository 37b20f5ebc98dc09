//! Parse-line transforms
//!
//! The corpus stores one bracketed constituency parse per line. Before a line is used, two
//! repairs are applied in order: [fix_paren] unwraps the doubled outer bracket some parses
//! carry, then [remove_digits] replaces every digit with a placeholder. Word extraction
//! ([get_words]) and sentence truncation ([truncate_at_period]) work on the repaired text.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

use crate::record::SummaryRecord;

/// The bracketed sentence-final period, as the corpus parser writes it.
pub const PERIOD_NODE: &str = "(. .)";

/// The period leaf.
pub const PERIOD_LEAF: &str = ".";

/// Any Unicode decimal digit, so digits from other scripts are masked too.
static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Unwrap a doubled parse.
///
/// A line that starts with `(` followed by a space has a redundant outer node; the first two
/// and the final character are dropped. Everything else, including lines shorter than two
/// characters, is returned unchanged.
pub fn fix_paren(parse: &str) -> &str {
    match parse.strip_prefix("( ") {
        Some(inner) => {
            let mut chars = inner.chars();
            chars.next_back();
            chars.as_str()
        }
        None => parse,
    }
}

/// Replace every digit with `placeholder`.
pub fn remove_digits<'a>(parse: &'a str, placeholder: &str) -> Cow<'a, str> {
    DIGIT_REGEX.replace_all(parse, NoExpand(placeholder))
}

/// Every leaf word of a parse, in order.
///
/// A leaf is a whitespace-separated chunk ending in `)`; its surrounding `)` characters are
/// stripped. A bare `)` chunk yields an empty word, which the quality filter later rejects.
pub fn leaves(parse: &str) -> impl Iterator<Item = &str> {
    parse
        .split_whitespace()
        .filter(|chunk| chunk.ends_with(')'))
        .map(|chunk| chunk.trim_matches(')'))
}

/// Leaf words of an article parse, up to and including the first `.` leaf.
pub fn get_words(parse: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for word in leaves(parse) {
        words.push(word);
        if word == PERIOD_LEAF {
            break;
        }
    }
    words
}

/// Keep body lines up to and including the first one holding a period node.
///
/// The Gigaword sentence splitter is unreliable, so this is what guarantees the article
/// ends at a sentence boundary. Without any period node all lines are kept.
pub fn truncate_at_period(mut lines: Vec<String>) -> Vec<String> {
    if let Some(pos) = lines.iter().position(|line| line.contains(PERIOD_NODE)) {
        lines.truncate(pos + 1);
    }
    lines
}

/// Applies the line repairs and builds finished records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    placeholder: String,
    root_label: String,
}

impl Normalizer {
    pub fn new(placeholder: impl Into<String>, root_label: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            root_label: root_label.into(),
        }
    }

    /// Repair one raw corpus line.
    pub fn normalize_line(&self, raw: &str) -> String {
        remove_digits(fix_paren(raw), &self.placeholder).into_owned()
    }

    /// Join body lines under the synthetic root node.
    pub fn wrap_root(&self, lines: &[String]) -> String {
        format!("({} {})", self.root_label, lines.join(" "))
    }

    /// Build the record for a completed article.
    pub fn complete(&self, title_parse: String, lines: Vec<String>) -> SummaryRecord {
        let article_parse = self.wrap_root(&truncate_at_period(lines));
        let title_words = leaves(&title_parse).map(str::to_string).collect();
        let article_words = get_words(&article_parse)
            .into_iter()
            .map(str::to_string)
            .collect();
        SummaryRecord {
            title_parse,
            article_parse,
            title_words,
            article_words,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new("#", "TOP")
    }
}
