//! Run configuration: hashing salt, normalization patterns and file locations.

use crate::error::{GsgError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Widest salt BLAKE2s accepts.
pub const MAX_SALT_LEN: usize = blake2s_simd::SALTBYTES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Mixed into every hash. Changing it orphans every uid in an existing store.
    pub salt: Vec<u8>,
    /// Characters matching this class are replaced by a space during cleanup.
    pub accepted_character_class: String,
    pub token_delimiter_pattern: String,
    /// Splits terms into vocabulary words.
    pub term_delimiter: String,
    /// Joins node type and value into the hashed composite key.
    pub node_value_separator: String,
    pub min_token_length: Option<usize>,
    pub case_fold: bool,
    pub abbreviation_path: PathBuf,
    pub graph_source_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            salt: b"5963".to_vec(),
            accepted_character_class: "[^a-zA-Z _]".to_string(),
            token_delimiter_pattern: "_| ".to_string(),
            term_delimiter: " ".to_string(),
            node_value_separator: "__".to_string(),
            min_token_length: None,
            case_fold: true,
            abbreviation_path: PathBuf::from("./data/abbreviations.bin"),
            graph_source_path: PathBuf::from("./data/graph_source.json"),
        }
    }
}

impl GeneratorConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let reader = BufReader::new(File::open(path)?);
        let config: GeneratorConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the parts of the config that the pipeline cannot recover from.
    /// Regex syntax is checked when the normalizer compiles the patterns.
    pub fn validate(&self) -> Result<()> {
        if self.salt.len() > MAX_SALT_LEN {
            return Err(GsgError::Config(format!(
                "salt is {} bytes, at most {} allowed",
                self.salt.len(),
                MAX_SALT_LEN
            )));
        }
        if self.node_value_separator.is_empty() {
            return Err(GsgError::Config("node value separator must not be empty".to_string()));
        }
        if self.term_delimiter.is_empty() {
            return Err(GsgError::Config("term delimiter must not be empty".to_string()));
        }
        Ok(())
    }
}
