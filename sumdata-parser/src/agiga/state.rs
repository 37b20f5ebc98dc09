//! Extraction state machine
//!
//!     An Annotated Gigaword file is a long run of documents. The only structure the extractor
//!     cares about is three marker lines; everything else is content:
//!
//!         <HEADLINE>
//!         ( (NP (NNP Storm) (VBZ hits)) )       <- headline parse, one line
//!         </HEADLINE>
//!         <P>
//!         (S (NP ...) ...)                      <- body parse lines
//!         (. .)
//!         </P>
//!
//!     States:
//!
//!         - Seek: looking for the next `<HEADLINE>`
//!         - Head: the next content line is the headline parse
//!         - Next: headline captured, waiting for the first `<P>`
//!         - Text: accumulating body lines until `</P>`
//!
//!     The whole machine is [ExtractState::transition]. Any (state, line) pair it does not
//!     name leaves the state as it is; that is how stray markers (a second `<HEADLINE>` before
//!     `</P>`, a `</P>` before any `<P>`) get absorbed. A record only leaves the machine on
//!     `</P>` in `Text`, so a document that never closes its first paragraph is lost.

use crate::agiga::normalize::Normalizer;
use crate::agiga::IncompletePolicy;
use crate::record::SummaryRecord;

/// A structural marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Headline,
    ParagraphOpen,
    ParagraphClose,
}

impl Marker {
    /// Classify a trimmed line. Content lines return `None`.
    pub fn classify(line: &str) -> Option<Marker> {
        match line {
            "<HEADLINE>" => Some(Marker::Headline),
            "<P>" => Some(Marker::ParagraphOpen),
            "</P>" => Some(Marker::ParagraphClose),
            _ => None,
        }
    }
}

/// Where the extractor is within the current document. The open record lives inside the
/// state, so a fresh state never sees leftovers from an earlier stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractState {
    #[default]
    Seek,
    Head,
    Next {
        title_parse: String,
    },
    Text {
        title_parse: String,
        lines: Vec<String>,
    },
}

impl ExtractState {
    /// Feed one raw line. Returns the next state and, on `</P>` in `Text`, the finished
    /// record.
    pub fn transition(
        self,
        line: &str,
        normalizer: &Normalizer,
    ) -> (ExtractState, Option<SummaryRecord>) {
        let line = line.trim();
        match (self, Marker::classify(line)) {
            (ExtractState::Seek, Some(Marker::Headline)) => (ExtractState::Head, None),
            (ExtractState::Head, None) => (
                ExtractState::Next {
                    title_parse: normalizer.normalize_line(line),
                },
                None,
            ),
            (ExtractState::Next { title_parse }, Some(Marker::ParagraphOpen)) => (
                ExtractState::Text {
                    title_parse,
                    lines: Vec::new(),
                },
                None,
            ),
            (ExtractState::Text { title_parse, mut lines }, None) => {
                lines.push(normalizer.normalize_line(line));
                (ExtractState::Text { title_parse, lines }, None)
            }
            (ExtractState::Text { title_parse, lines }, Some(Marker::ParagraphClose)) => (
                ExtractState::Seek,
                Some(normalizer.complete(title_parse, lines)),
            ),
            (state, _) => (state, None),
        }
    }

    /// End of stream. Only an open `Text` record can be flushed, and only when asked to.
    pub fn finish(self, policy: IncompletePolicy, normalizer: &Normalizer) -> Option<SummaryRecord> {
        match (self, policy) {
            (ExtractState::Text { title_parse, lines }, IncompletePolicy::Flush) => {
                Some(normalizer.complete(title_parse, lines))
            }
            _ => None,
        }
    }

    /// True when a document has been started but not emitted.
    pub fn is_open(&self) -> bool {
        !matches!(self, ExtractState::Seek)
    }
}
