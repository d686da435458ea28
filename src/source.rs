//! Paragraph sources.
//!
//! The assembler only needs an ordered sequence of paragraphs, each with
//! its text and a list-item flag. Two line-oriented containers are read
//! here; either may be bzip2-compressed.

use crate::error::{Error, Result};
use bzip2::read::BzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One paragraph as delivered by a document source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub text: String,
    #[serde(default)]
    pub is_list_item: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, is_list_item: bool) -> Self {
        Self {
            text: text.into(),
            is_list_item,
        }
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// One paragraph per line; bullet-prefixed lines are list items.
    Text,
    /// One `{"text": …, "isListItem": …}` record per line.
    JsonLines,
}

/// File name and base name of the input, used for ids and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    pub file_name: String,
    pub base: String,
}

impl SourceName {
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = strip_container_extension(&file_name).to_string();
        Self { file_name, base }
    }
}

fn is_compressed(name: &str) -> bool {
    name.to_lowercase().ends_with(".bz2")
}

/// Drop a trailing `.bz2`, then the container extension.
fn strip_container_extension(name: &str) -> &str {
    let name = if is_compressed(name) { &name[..name.len() - 4] } else { name };
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// Default output path: the input with its container extension replaced.
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let name = SourceName::from_path(input);
    input.with_file_name(format!("{}.{}", name.base, extension))
}

/// Pick a format from the extension, warning when it is not one we know.
pub fn detect_format(path: &Path) -> SourceFormat {
    let name = path.to_string_lossy().to_lowercase();
    let name = name.strip_suffix(".bz2").unwrap_or(&name);
    if name.ends_with(".jsonl") || name.ends_with(".ndjson") {
        SourceFormat::JsonLines
    } else if name.ends_with(".txt") {
        SourceFormat::Text
    } else {
        warn!(
            path = %path.display(),
            "input extension is not .txt/.jsonl; attempting to parse as plain text"
        );
        SourceFormat::Text
    }
}

/// Open `path` for buffered reading, decompressing `.bz2` transparently.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if !path.is_file() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn BufRead + Send> = if is_compressed(&path.to_string_lossy()) {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    };
    Ok(reader)
}

/// Read every paragraph from `reader`, in order.
pub fn read_paragraphs(
    reader: impl BufRead,
    format: SourceFormat,
    bullets: &[String],
    origin: &Path,
) -> Result<Vec<Paragraph>> {
    let mut paragraphs = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        match format {
            SourceFormat::Text => paragraphs.push(text_paragraph(&line, bullets)),
            SourceFormat::JsonLines => {
                if line.trim().is_empty() {
                    continue;
                }
                let paragraph = serde_json::from_str(&line)
                    .map_err(|source| Error::ParagraphRecord { line: i + 1, source })?;
                paragraphs.push(paragraph);
            }
        }
    }

    Ok(paragraphs)
}

fn text_paragraph(line: &str, bullets: &[String]) -> Paragraph {
    let trimmed = line.trim_start();
    bullets
        .iter()
        .filter(|b| !b.is_empty())
        .find_map(|b| trimmed.strip_prefix(b.as_str()))
        .map(|rest| Paragraph::list_item(rest.trim()))
        .unwrap_or_else(|| Paragraph::plain(line))
}
