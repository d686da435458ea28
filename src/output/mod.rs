//! Serialization sinks for assembled entries.

pub mod json;
pub mod xml;

use crate::entry::LexicalEntry;
use crate::error::Result;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Structured data, one array of entries
    Json,
    /// Nested element tree
    Xml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    pub fn render(&self, entries: &[LexicalEntry]) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json(entries),
            OutputFormat::Xml => Ok(xml::to_xml(entries)),
        }
    }
}
