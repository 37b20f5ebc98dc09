//! Annotated Gigaword extraction
//!
//!     Turns parsed Gigaword files into title/article records. The pipeline per line is:
//!
//!         1. Trim and classify the line (marker or content). See [state](state).
//!         2. Content lines are repaired: [fix_paren](normalize::fix_paren) then
//!            [remove_digits](normalize::remove_digits).
//!         3. On `</P>` the body is cut at the first period node, wrapped under a `TOP`
//!            node, and every leaf of the title and the article leaves up to the
//!            first `.` are collected.
//!
//!     Only the first paragraph of each document is used: the record is emitted as soon as
//!     the first `</P>` is seen, and the machine goes back to looking for a headline.
//!
//!     File handling (gzip input, output naming) lives in [source](source).

pub mod extractor;
pub mod normalize;
pub mod source;
pub mod state;

pub use extractor::{ExtractStats, Extractor};
pub use normalize::{fix_paren, get_words, leaves, remove_digits, truncate_at_period, Normalizer};
pub use source::{extract_file, extract_to_writer, open_corpus, output_path};
pub use state::{ExtractState, Marker};

use crate::error::{Error, Result};

/// What to do with a document still open when the stream ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncompletePolicy {
    /// Discard it silently. This is what the dataset has always been built with.
    #[default]
    Drop,
    /// Emit it as if its paragraph had been closed. Only a document with an open body is
    /// flushed; one still waiting for `<P>` is dropped either way.
    Flush,
}

impl IncompletePolicy {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "drop" => Ok(IncompletePolicy::Drop),
            "flush" => Ok(IncompletePolicy::Flush),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Replacement for every digit
    pub digit_placeholder: String,
    /// Label of the synthetic node wrapping the article lines
    pub root_label: String,
    pub incomplete: IncompletePolicy,
}

impl ExtractOptions {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.digit_placeholder.clone(), self.root_label.clone())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            digit_placeholder: "#".to_string(),
            root_label: "TOP".to_string(),
            incomplete: IncompletePolicy::Drop,
        }
    }
}
