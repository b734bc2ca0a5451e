use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::normalize::COMMENT;

/// Knobs that distinguish one assembler flavour from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Width of every emitted word, in bits.
    pub word_size: usize,
    /// Pad the output with zero words up to this many lines; 0 disables padding.
    pub min_lines: usize,
    /// Include 1-based source line numbers in diagnostics.
    pub line_numbers: bool,
    pub comment_marker: char,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self::extended()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("word size must be at least one bit")]
    ZeroWordSize,
    #[error("{0:?} cannot be used as a comment marker")]
    BadCommentMarker(char),
    #[error("instruction table has {table}-bit opcodes but the word size is {config}")]
    WidthMismatch { table: usize, config: usize },
    #[error("mnemonic `{mnemonic}` contains the comment marker {marker:?}")]
    MarkerInMnemonic { mnemonic: String, marker: char },
}

impl AssemblerConfig {
    pub fn basic() -> Self {
        Self { word_size: 8, min_lines: 0, line_numbers: false, comment_marker: COMMENT }
    }

    pub fn extended() -> Self {
        Self { word_size: 8, min_lines: 128, line_numbers: true, comment_marker: COMMENT }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let txt = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.word_size == 0 {
            return Err(ConfigError::ZeroWordSize);
        }
        // a marker that can appear inside a token would eat it
        if matches!(self.comment_marker, ' ' | '0' | '1') {
            return Err(ConfigError::BadCommentMarker(self.comment_marker));
        }
        Ok(())
    }
}
