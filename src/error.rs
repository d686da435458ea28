//! Error type for the converter.
//!
//! Extraction misses, orphan subentries and unbalanced brackets are normal
//! input and never surface here; only I/O, configuration and record-level
//! failures do.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid paragraph record on line {line}: {source}")]
    ParagraphRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid part-of-speech vocabulary: {0}")]
    Vocabulary(#[from] regex::Error),

    #[error("part-of-speech vocabulary is empty")]
    EmptyVocabulary,
}

pub type Result<T> = std::result::Result<T, Error>;
