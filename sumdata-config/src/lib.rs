//! Configuration for the sumdata tools
//!
//! The documented defaults in `defaults/sumdata.default.toml` are compiled in, so a bare
//! `sumdata` run behaves exactly as that file says. Sources stack in this order, later
//! ones winning key by key:
//!
//! 1. the embedded defaults
//! 2. `./sumdata.toml`, when present ([Loader::with_optional_file])
//! 3. the file named by `--config` ([Loader::with_file])
//! 4. single keys set from command-line flags ([Loader::set_override])
//!
//! Mode names (`extract.incomplete`, `extract.format`) stay plain strings here. The parser
//! crate owns their meaning and rejects unknown names when the options are built.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/sumdata.default.toml");

/// Top-level configuration, one section per tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SumdataConfig {
    pub extract: ExtractConfig,
    pub dict: DictConfig,
    pub filter: FilterConfig,
    pub project: ProjectConfig,
    pub duc: DucConfig,
    pub sweep: SweepConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub digit_placeholder: String,
    pub root_label: String,
    /// `drop` or `flush`
    pub incomplete: String,
    /// `tsv` or `json`
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictConfig {
    pub pseudo_tokens: Vec<String>,
    pub pseudo_count: String,
}

/// Quality filter thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub bad_words: Vec<String>,
    pub article_min: usize,
    pub article_max: usize,
    pub title_min: usize,
    pub title_max: usize,
    pub min_shared_words: usize,
    pub shared_word_min_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub title_punctuation: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DucConfig {
    pub short_sentence_chars: usize,
    pub prefix_chars: usize,
    pub reference_count: usize,
}

/// Decoder invocation for parameter sweeps.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    pub title_len: usize,
    pub params_file: PathBuf,
    pub command: String,
}

/// Name of the per-directory file the CLI picks up when it exists.
pub const LOCAL_CONFIG: &str = "sumdata.toml";

/// Stacks configuration sources on top of the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when missing.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key, such as `extract.incomplete`, above every file.
    pub fn set_override<V>(mut self, key: &str, value: V) -> Result<Self, ConfigError>
    where
        V: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SumdataConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<SumdataConfig, ConfigError> {
    Loader::new().build()
}
