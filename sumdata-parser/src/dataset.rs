//! Tools over extracted record files
//!
//! All of them read the four-field format line by line and silently skip lines that do not
//! have exactly four fields.

pub mod dict;
pub mod filter;
pub mod project;

pub use dict::{DictOptions, DictionaryBuilder, WordCounter};
pub use filter::{FilterOptions, FilterStats, QualityFilter, Rejection};
pub use project::{ProjectionMode, Projector, Vocabulary};
