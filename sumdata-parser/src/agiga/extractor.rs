//! Streaming extractor
//!
//! [Extractor] drives [ExtractState] over a line source and yields records as they
//! complete. It holds at most one open document; one extractor is meant to consume one
//! stream.

use log::{debug, trace};
use std::io;

use crate::agiga::normalize::Normalizer;
use crate::agiga::source::LossyLines;
use crate::agiga::state::ExtractState;
use crate::agiga::{ExtractOptions, IncompletePolicy};
use crate::error::Result;
use crate::record::SummaryRecord;

/// Counters collected while extracting one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines_read: usize,
    pub records_emitted: usize,
    /// A document was still open when the stream ended and was not emitted
    pub dropped_incomplete: bool,
    /// A document was still open when the stream ended and was flushed
    pub flushed_incomplete: bool,
}

/// Iterator adapter from raw corpus lines to records.
pub struct Extractor<I> {
    lines: I,
    state: ExtractState,
    normalizer: Normalizer,
    policy: IncompletePolicy,
    stats: ExtractStats,
    done: bool,
}

impl<I> Extractor<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, options: &ExtractOptions) -> Self {
        Self {
            lines,
            state: ExtractState::default(),
            normalizer: options.normalizer(),
            policy: options.incomplete,
            stats: ExtractStats::default(),
            done: false,
        }
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    fn finish(&mut self) -> Option<SummaryRecord> {
        let state = std::mem::take(&mut self.state);
        if !state.is_open() {
            return None;
        }
        let record = state.finish(self.policy, &self.normalizer);
        match record {
            Some(_) => {
                debug!("Flushing unterminated document at end of stream");
                self.stats.flushed_incomplete = true;
                self.stats.records_emitted += 1;
            }
            None => {
                debug!("Dropping unterminated document at end of stream");
                self.stats.dropped_incomplete = true;
            }
        }
        record
    }
}

impl<R: io::BufRead> Extractor<LossyLines<R>> {
    /// Extract from a buffered reader, decoding invalid UTF-8 lossily.
    pub fn from_reader(reader: R, options: &ExtractOptions) -> Self {
        Self::new(LossyLines::new(reader), options)
    }
}

impl<I> Iterator for Extractor<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<SummaryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            };
            self.stats.lines_read += 1;
            let state = std::mem::take(&mut self.state);
            let (state, record) = state.transition(&line, &self.normalizer);
            self.state = state;
            if let Some(record) = record {
                self.stats.records_emitted += 1;
                trace!("Record {}: {}", self.stats.records_emitted, record.title());
                return Some(Ok(record));
            }
        }
        self.done = true;
        self.finish().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_DOCS: &str = "\
<DOC id=\"A\">
<HEADLINE>
(NP (NN one))
</HEADLINE>
<TEXT>
<P>
(S (NP (DT a)) (. .))
</P>
</TEXT>
</DOC>
<DOC id=\"B\">
<HEADLINE>
(NP (NN two))
</HEADLINE>
<TEXT>
<P>
(S (NP (DT b)) (. .))
</P>
</TEXT>
</DOC>
";

    fn extract(source: &str, options: &ExtractOptions) -> Vec<SummaryRecord> {
        Extractor::from_reader(Cursor::new(source), options)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_records_in_input_order() {
        let records = extract(TWO_DOCS, &ExtractOptions::default());
        let titles: Vec<_> = records.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[test]
    fn test_stats() {
        let mut extractor = Extractor::from_reader(Cursor::new(TWO_DOCS), &ExtractOptions::default());
        while extractor.next().is_some() {}
        assert_eq!(extractor.stats().records_emitted, 2);
        assert_eq!(extractor.stats().lines_read, 20);
        assert!(!extractor.stats().dropped_incomplete);
    }

    #[test]
    fn test_unterminated_document_is_dropped() {
        let source = format!("{}<HEADLINE>\n(NP (NN three))\n<P>\n(S (NP (DT c)))\n", TWO_DOCS);
        let mut extractor = Extractor::from_reader(Cursor::new(source), &ExtractOptions::default());
        let count = extractor.by_ref().count();
        assert_eq!(count, 2);
        assert!(extractor.stats().dropped_incomplete);
    }

    #[test]
    fn test_unterminated_document_is_flushed_on_request() {
        let source = format!("{}<HEADLINE>\n(NP (NN three))\n<P>\n(S (NP (DT c)))\n", TWO_DOCS);
        let options = ExtractOptions {
            incomplete: IncompletePolicy::Flush,
            ..ExtractOptions::default()
        };
        let records = extract(&source, &options);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].article_parse, "(TOP (S (NP (DT c))))");
    }

    #[test]
    fn test_io_error_ends_stream() {
        let lines = vec![
            Ok("<HEADLINE>".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad block")),
            Ok("(NP (NN a))".to_string()),
        ];
        let mut extractor = Extractor::new(lines.into_iter(), &ExtractOptions::default());
        assert!(matches!(extractor.next(), Some(Err(_))));
        assert!(extractor.next().is_none());
    }
}
