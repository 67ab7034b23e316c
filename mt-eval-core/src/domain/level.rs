use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MetricsError;

/// Segmentation level of the hypotheses and references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Word,
    Bpe,
    Char,
}

impl Level {
    /// Delimiter between tokens, `None` when every character is a token.
    pub fn delimiter(self) -> Option<char> {
        match self {
            Level::Word | Level::Bpe => Some(' '),
            Level::Char => None,
        }
    }

    /// Splits `text` into tokens for this level.
    ///
    /// Word and BPE levels split on the single space character, so doubled
    /// spaces and empty strings produce empty tokens.
    pub fn split(self, text: &str) -> Vec<&str> {
        match self.delimiter() {
            Some(delimiter) => text.split(delimiter).collect(),
            None => text
                .char_indices()
                .map(|(start, ch)| &text[start..start + ch.len_utf8()])
                .collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Word => "word",
            Level::Bpe => "bpe",
            Level::Char => "char",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(Level::Word),
            "bpe" => Ok(Level::Bpe),
            "char" => Ok(Level::Char),
            other => Err(MetricsError::UnknownLevel(other.to_string())),
        }
    }
}
