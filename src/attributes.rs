//! Parenthetical marker vocabulary and the typed attribute record.
//!
//! Editors tag entries with short bracketed tokens such as `(ث)` or `(نب)`.
//! The vocabulary is closed: a note either matches one of the markers below
//! exactly (after trimming) or it stays a free-text note. Matching is
//! exact, so `(أ.م)` or `(أ.  م)` are notes, not the cuneiform marker.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Feminine,
    Masculine,
    Common,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    Linguistic,
    Animal,
    Plant,
    Bird,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tradition {
    AncientSong,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Feminine => "feminine",
            Gender::Masculine => "masculine",
            Gender::Common => "common",
        }
    }
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Linguistic => "linguistic",
            Domain::Animal => "animal",
            Domain::Plant => "plant",
            Domain::Bird => "bird",
        }
    }
}

impl Tradition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tradition::AncientSong => "ancientSong",
        }
    }
}

/// One recognized parenthetical marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Gender(Gender),
    Agent,
    Domain(Domain),
    Tradition(Tradition),
    Cuneiform,
    PhoneticChange,
    SameMeaningAsPrevious,
    /// Parenthetical `(ج)`; unrelated to the standalone `ج <forms>` construct.
    PluralIndicator,
}

/// A note after classification against the marker vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteToken {
    Marker(Marker),
    Unrecognized(String),
}

static MARKERS: Lazy<HashMap<&'static str, Marker>> = Lazy::new(|| {
    HashMap::from([
        ("ث", Marker::Gender(Gender::Feminine)),
        ("ذ", Marker::Gender(Gender::Masculine)),
        ("ذ.ث", Marker::Gender(Gender::Common)),
        ("فا", Marker::Agent),
        ("نحو", Marker::Domain(Domain::Linguistic)),
        ("ܪܘ", Marker::Tradition(Tradition::AncientSong)),
        ("ح", Marker::Domain(Domain::Animal)),
        ("نب", Marker::Domain(Domain::Plant)),
        ("ط", Marker::Domain(Domain::Bird)),
        ("أ. م", Marker::Cuneiform),
        ("ص", Marker::PhoneticChange),
        ("مثله", Marker::SameMeaningAsPrevious),
        ("ج", Marker::PluralIndicator),
    ])
});

pub fn classify_note(note: &str) -> NoteToken {
    match MARKERS.get(note.trim()) {
        Some(&marker) => NoteToken::Marker(marker),
        None => NoteToken::Unrecognized(note.to_string()),
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Typed attributes of an entry. Absent / false values are omitted on output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub foreign: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<Domain>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub agent: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub phonetic_change: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cuneiform: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub same_meaning_as_previous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradition: Option<Tradition>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub plural_indicator: bool,
}

impl Attributes {
    pub fn apply(&mut self, marker: Marker) {
        match marker {
            Marker::Gender(g) => self.gender = Some(g),
            Marker::Agent => self.agent = true,
            Marker::Domain(d) => {
                if !self.domain.contains(&d) {
                    self.domain.push(d);
                }
            }
            Marker::Tradition(t) => self.tradition = Some(t),
            Marker::Cuneiform => self.cuneiform = true,
            Marker::PhoneticChange => self.phonetic_change = true,
            Marker::SameMeaningAsPrevious => self.same_meaning_as_previous = true,
            Marker::PluralIndicator => self.plural_indicator = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Attributes::default()
    }

    /// Present attributes as `(key, values)` pairs in canonical key order.
    /// Only `domain` ever has more than one value.
    pub fn entries(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        let flag = |on: bool| if on { Some(vec!["true"]) } else { None };
        [
            ("gender", self.gender.map(|g| vec![g.as_str()])),
            ("foreign", flag(self.foreign)),
            (
                "domain",
                (!self.domain.is_empty()).then(|| self.domain.iter().map(Domain::as_str).collect()),
            ),
            ("agent", flag(self.agent)),
            ("phoneticChange", flag(self.phonetic_change)),
            ("cuneiform", flag(self.cuneiform)),
            ("sameMeaningAsPrevious", flag(self.same_meaning_as_previous)),
            ("tradition", self.tradition.map(|t| vec![t.as_str()])),
            ("pluralIndicator", flag(self.plural_indicator)),
        ]
        .into_iter()
        .filter_map(|(key, values)| values.map(|v| (key, v)))
        .collect()
    }
}

/// Split notes into typed attributes and the notes that stay free text.
pub fn map_notes(notes: Vec<String>) -> (Attributes, Vec<String>) {
    let mut attributes = Attributes::default();
    let mut remaining = Vec::new();

    for note in notes {
        match classify_note(&note) {
            NoteToken::Marker(marker) => attributes.apply(marker),
            NoteToken::Unrecognized(text) => remaining.push(text),
        }
    }

    (attributes, remaining)
}
