//! The lexical entry data model and the single-line entry builder.

use crate::attributes::{map_notes, Attributes};
use crate::config::Config;
use crate::error::Result;
use crate::extract::{Extractors, PartOfSpeechTable};
use crate::normalize::normalize_text;
use crate::senses::{segment_senses, Sense};
use serde::{Deserialize, Serialize};

const FOREIGN_MARKER: char = '*';

/// Inferred entry type, recorded in metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryType {
    /// No standalone lemma, only gloss text.
    Phrase,
}

/// Provenance, stamped by the document assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subindex: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }

    /// Present keys and their display values, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(source) = &self.source {
            out.push(("source", source.clone()));
        }
        if let Some(index) = self.index {
            out.push(("index", index.to_string()));
        }
        if let Some(parent) = &self.parent {
            out.push(("parent", parent.clone()));
        }
        if let Some(subindex) = self.subindex {
            out.push(("subindex", subindex.to_string()));
        }
        if let Some(from) = &self.inherited_from {
            out.push(("inheritedFrom", from.clone()));
        }
        if let Some(EntryType::Phrase) = self.entry_type {
            out.push(("type", "phrase".to_string()));
        }
        out
    }
}

/// One dictionary entry. Subentries nest one level deep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub lemma: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub plural_forms: Vec<String>,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub flat_glosses: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub subentries: Vec<LexicalEntry>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl LexicalEntry {
    /// Flagged `(مثله)` and still without senses of its own.
    pub fn wants_inheritance(&self) -> bool {
        self.attributes.same_meaning_as_previous && self.senses.is_empty()
    }

    /// Copy senses and flat glosses from `source`, recording where they came from.
    /// No-op when `source` has no senses.
    pub fn inherit_senses(&mut self, source: &LexicalEntry, source_id: Option<&str>) -> bool {
        if source.senses.is_empty() {
            return false;
        }
        self.senses = source.senses.clone();
        self.flat_glosses = source.flat_glosses.clone();
        self.metadata.inherited_from = source_id.map(str::to_string);
        true
    }
}

/// Builds a [`LexicalEntry`] from one line of entry text.
#[derive(Debug, Clone)]
pub struct EntryParser {
    extractors: Extractors,
    infer_phrase_type: bool,
}

impl Default for EntryParser {
    fn default() -> Self {
        Self {
            extractors: Extractors::default(),
            infer_phrase_type: true,
        }
    }
}

impl EntryParser {
    pub fn from_config(config: &Config) -> Result<Self> {
        let parts_of_speech = PartOfSpeechTable::new(config.part_of_speech.as_slice())?;
        Ok(Self {
            extractors: Extractors::new(parts_of_speech),
            infer_phrase_type: config.infer_phrase_type,
        })
    }

    /// Parse one top-level or subentry line (dash marker already removed).
    pub fn parse(&self, raw_text: &str) -> LexicalEntry {
        let text = normalize_text(raw_text);

        let foreign = text.starts_with(FOREIGN_MARKER);
        let text = text.trim_start_matches(FOREIGN_MARKER).trim_start();

        let extracted = self.extractors.run(text);
        let (senses, flat_glosses) = segment_senses(extracted.residual.trim());
        let (mut attributes, notes) = map_notes(extracted.notes);
        if foreign {
            attributes.foreign = true;
        }

        let mut entry = LexicalEntry {
            lemma: extracted.lemma,
            pronunciation: extracted.pronunciation,
            part_of_speech: extracted.part_of_speech,
            plural_forms: extracted.plural_forms,
            senses,
            flat_glosses,
            notes,
            attributes,
            ..LexicalEntry::default()
        };

        self.infer_entry_type(&mut entry);
        entry
    }

    /// Mark lemma-less entries with glosses as phrases. Runs again after
    /// inheritance, since inherited senses can supply the glosses.
    pub fn infer_entry_type(&self, entry: &mut LexicalEntry) {
        if self.infer_phrase_type && entry.lemma.is_none() && !entry.flat_glosses.is_empty() {
            entry.metadata.entry_type = Some(EntryType::Phrase);
        }
    }
}
