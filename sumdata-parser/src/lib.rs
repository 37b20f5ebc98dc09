//! # sumdata
//!
//! Dataset preparation for headline summarization.
//!
//! File Layout
//!
//! The Gigaword extractor is the only piece with real structure: a line-driven state
//! machine that turns parsed corpus files into four-field records. Everything else reads
//! those records back and filters, counts or projects them.
//!
//! src/
//!   ├── agiga      Annotated Gigaword extraction (state machine, parse-line transforms, file IO)
//!   ├── record     The four-field record shared by every tool
//!   ├── dataset    Dictionary builder, quality filter, field projection
//!   ├── duc        DUC test-set construction and ROUGE directory layout
//!   └── sweep      Decoder invocation for parameter sweeps
//!
//! Malformed input is skipped, not reported: a record without a complete
//! headline/paragraph cycle never reaches the output, and a record line without exactly
//! four fields is ignored by every downstream tool.

pub mod agiga;
pub mod dataset;
pub mod duc;
pub mod error;
pub mod record;
pub mod sweep;

pub use error::{Error, Result};
pub use record::SummaryRecord;
