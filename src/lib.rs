//! Converts bilingual Syriac–Arabic dictionary paragraphs into structured
//! lexical entries.
//!
//! The pipeline, leaf first: [`script`] and [`normalize`] utilities, the
//! ordered [`extract`] chain, [`senses`] segmentation and the
//! [`attributes`] marker vocabulary, the [`entry`] builder, and finally the
//! [`document`] assembler that groups subentries, resolves `(مثله)`
//! inheritance and numbers everything.

pub mod attributes;
pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod output;
pub mod parallel;
pub mod script;
pub mod senses;
pub mod source;

pub use attributes::{Attributes, Domain, Gender, Marker, Tradition};
pub use config::Config;
pub use document::{parse_document, Assembly, AssemblyStats};
pub use entry::{EntryParser, EntryType, LexicalEntry, Metadata};
pub use error::{Error, Result};
pub use output::OutputFormat;
pub use senses::Sense;
pub use source::{Paragraph, SourceName};
