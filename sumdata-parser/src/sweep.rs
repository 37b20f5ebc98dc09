//! Decoder invocation for parameter sweeps
//!
//! A sweep runs the summarization decoder once per parameter file. The command is a
//! template with `{name}` placeholders; `src`, `model` and `title_len` come from the
//! caller and the rest from a params file of `name value` lines:
//!
//!     LM 1.0
//!     uni 0.0
//!     ...
//!
//! `$ABS` and `$CUTH` in the default template are left for the shell to expand.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

pub const DEFAULT_COMMAND: &str = "cd $ABS; $CUTH $ABS/summary/run.lua -modelFilename {model} -inputf {src} -recombine -length {title_len} -blockRepeatWords -lmWeight {LM} -unigramBonus {uni} -bigramBonus {bi} -trigramBonus {tri} -lengthBonus {length} -unorderBonus {ooo}";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    pub title_len: usize,
    pub command: String,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            title_len: 14,
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}

/// Parse `name value` lines. Blank lines are skipped; a later name overrides an earlier one.
pub fn parse_params(text: &str) -> Result<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    for (i, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            continue;
        };
        let value = parts.next().ok_or_else(|| {
            Error::Sweep(format!("line {}: parameter {} has no value", i + 1, name))
        })?;
        params.insert(name.to_string(), value.to_string());
    }
    Ok(params)
}

pub fn read_params(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
    parse_params(&text)
}

/// Fill every placeholder in the template. Unknown placeholders are an error.
pub fn build_command(
    src: &str,
    model: &str,
    params: &BTreeMap<String, String>,
    options: &SweepOptions,
) -> Result<String> {
    let mut values = params.clone();
    values.insert("src".to_string(), src.to_string());
    values.insert("model".to_string(), model.to_string());
    values.insert("title_len".to_string(), options.title_len.to_string());

    let mut missing = Vec::new();
    let command = PLACEHOLDER.replace_all(&options.command, |caps: &Captures| {
        match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                missing.push(caps[1].to_string());
                String::new()
            }
        }
    });
    if !missing.is_empty() {
        return Err(Error::Sweep(format!(
            "no value for {}",
            missing.join(", ")
        )));
    }
    Ok(command.into_owned())
}

/// Run a built command through `sh -c`, inheriting stdio.
pub fn run(command: &str) -> Result<()> {
    info!("Running decoder");
    debug!("{}", command);
    let status = Command::new("sh").arg("-c").arg(command).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Sweep(format!("decoder exited with {}", status)))
    }
}
