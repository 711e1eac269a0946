// File: src/core/normalizer.rs
use crate::config::GeneratorConfig;
use crate::error::{GsgError, Result};
use regex::Regex;

/// Cleans raw labels and splits them into tokens.
///
/// Rejected characters are swapped for a space rather than deleted, so
/// `"Washington, D.C."` tokenizes as `washington`, `d`, `c`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rejected: Regex,
    delimiter: Regex,
    min_token_length: Option<usize>,
    case_fold: bool,
}

impl Normalizer {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let rejected = compile("accepted_character_class", &config.accepted_character_class)?;
        let delimiter = compile("token_delimiter_pattern", &config.token_delimiter_pattern)?;
        Ok(Self {
            rejected,
            delimiter,
            min_token_length: config.min_token_length,
            case_fold: config.case_fold,
        })
    }

    /// Replaces each rejected character with one space, optionally lowercasing.
    pub fn cleanup(&self, value: &str, case_fold: bool) -> String {
        let swapped = self.rejected.replace_all(value, " ");
        if case_fold {
            swapped.to_lowercase()
        } else {
            swapped.into_owned()
        }
    }

    /// Tokenizes with the configured case folding.
    pub fn tokenize(&self, value: &str) -> Vec<String> {
        self.tokenize_with(value, self.case_fold)
    }

    /// Cleanup, split on the delimiter pattern, trim, then drop empty and
    /// too-short fields. Input order is kept and duplicates are not removed.
    pub fn tokenize_with(&self, value: &str, case_fold: bool) -> Vec<String> {
        let cleaned = self.cleanup(value, case_fold);
        self.delimiter
            .split(&cleaned)
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .filter(|field| match self.min_token_length {
                Some(min) => field.chars().count() >= min,
                None => true,
            })
            .map(str::to_string)
            .collect()
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| GsgError::Config(format!("invalid {name} `{pattern}`: {e}")))
}
