//! Field extractors for a single entry line.
//!
//! Every extractor has the same shape: it takes the residual text and
//! returns the extracted field plus the text with the matched span removed.
//! The extractors run in the fixed order of [`PIPELINE`]; later stages only
//! ever see what earlier stages left behind, which is how overlapping
//! patterns are disambiguated (plural forms are Syriac too, so they must be
//! claimed before the lemma extractor looks for the first Syriac run).

use crate::error::{Error, Result};
use crate::normalize::{collapse_whitespace, splice_out};
use crate::script::{
    contains_latin_ipa, regex_class, COMBINING_MARK_RANGES, LATIN_IPA_RANGES, SYRIAC_BLOCK_RANGES,
    SYRIAC_LETTER_RANGES,
};
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref SYRIAC_LETTERS: String = regex_class(SYRIAC_LETTER_RANGES);
    static ref SYRIAC_BLOCK: String = regex_class(SYRIAC_BLOCK_RANGES);
    static ref COMBINING_MARKS: String = regex_class(COMBINING_MARK_RANGES);
    static ref LATIN_IPA: String = regex_class(LATIN_IPA_RANGES);

    // ج <form>[، <form>]... ; the introducer must follow start, space, ؛ or ،
    static ref PLURAL_FORMS: Regex = Regex::new(&format!(
        r"(?:^|[\s؛،])ج\s*({word}(?:\s*[،,;/؛]\s*{word})*)",
        word = format!(
            "[{letters}][{block}{marks}]*",
            letters = SYRIAC_LETTERS.as_str(),
            block = SYRIAC_BLOCK.as_str(),
            marks = COMBINING_MARKS.as_str(),
        ),
    )).unwrap();
    static ref PLURAL_SEPARATOR: Regex = Regex::new(r"[،,;/؛]").unwrap();

    // Slashes also separate senses, so `/…/` only counts as IPA with Latin content
    static ref SLASH_SPAN: Regex = Regex::new(r"/\s*([^/]+?)\s*/").unwrap();
    static ref BRACKET_SPAN: Regex = Regex::new(r"\[\s*([^\]]+?)\s*\]").unwrap();
    static ref LATIN_RUN: Regex = Regex::new(&format!(
        r"[{latin}][{latin}{marks} .'ːˈˌ\-]+",
        latin = LATIN_IPA.as_str(),
        marks = COMBINING_MARKS.as_str(),
    )).unwrap();

    // Greedy over any Syriac text, including the inside of a leading `(ܪܘ)`
    // when no headword precedes it
    static ref SYRIAC_RUN: Regex = Regex::new(&format!(
        r"[{letters}][{block}{marks} .\-·ᵒʾʿ]*",
        letters = SYRIAC_LETTERS.as_str(),
        block = SYRIAC_BLOCK.as_str(),
        marks = COMBINING_MARKS.as_str(),
    )).unwrap();

    // (..), [..] or «..»; inner text may not contain a closer
    static ref NOTE_SPAN: Regex = Regex::new(r"[(\[«]\s*([^)\]»]+?)\s*[)\]»]").unwrap();
}

pub const DEFAULT_PARTS_OF_SPEECH: &[&str] =
    &["اسم", "فعل", "صفة", "حال", "حرف", "ضمير", "عدد", "ظرف", "مصدر"];

/// One step of the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PluralForms,
    Pronunciation,
    PartOfSpeech,
    Lemma,
    Notes,
}

/// Extraction precedence. Reordering this changes what the parser returns.
pub const PIPELINE: [Stage; 5] = [
    Stage::PluralForms,
    Stage::Pronunciation,
    Stage::PartOfSpeech,
    Stage::Lemma,
    Stage::Notes,
];

/// Fields pulled out of one line, plus the gloss text left over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub plural_forms: Vec<String>,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub lemma: Option<String>,
    pub notes: Vec<String>,
    pub residual: String,
}

/// Closed set of part-of-speech markers, matched as whole tokens.
#[derive(Debug, Clone)]
pub struct PartOfSpeechTable {
    pattern: Regex,
}

impl PartOfSpeechTable {
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = tags
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Err(Error::EmptyVocabulary);
        }
        let pattern = Regex::new(&format!(r"(?:^|\s)({})(?:\s|$)", alternatives.join("|")))?;
        Ok(Self { pattern })
    }

    pub fn extract(&self, text: &str) -> (Option<String>, String) {
        match self.pattern.captures(text).and_then(|cap| cap.get(1)) {
            Some(m) => (Some(m.as_str().to_string()), splice_out(text, m.range())),
            None => (None, text.to_string()),
        }
    }
}

impl Default for PartOfSpeechTable {
    fn default() -> Self {
        // Built-in vocabulary is non-empty and escaped
        Self::new(DEFAULT_PARTS_OF_SPEECH).unwrap()
    }
}

/// The ordered extractor chain.
#[derive(Debug, Clone, Default)]
pub struct Extractors {
    parts_of_speech: PartOfSpeechTable,
}

impl Extractors {
    pub fn new(parts_of_speech: PartOfSpeechTable) -> Self {
        Self { parts_of_speech }
    }

    /// Run every stage of [`PIPELINE`] over `text`.
    pub fn run(&self, text: &str) -> Extracted {
        let start = Extracted {
            residual: text.to_string(),
            ..Extracted::default()
        };
        PIPELINE.iter().fold(start, |acc, &stage| self.apply(stage, acc))
    }

    fn apply(&self, stage: Stage, mut acc: Extracted) -> Extracted {
        let text = std::mem::take(&mut acc.residual);
        acc.residual = match stage {
            Stage::PluralForms => {
                let (forms, rest) = extract_plural_forms(&text);
                acc.plural_forms = forms;
                rest
            }
            Stage::Pronunciation => {
                let (ipa, rest) = extract_pronunciation(&text);
                acc.pronunciation = ipa;
                rest
            }
            Stage::PartOfSpeech => {
                let (pos, rest) = self.parts_of_speech.extract(&text);
                acc.part_of_speech = pos;
                rest
            }
            Stage::Lemma => {
                let (lemma, rest) = extract_lemma(&text);
                acc.lemma = lemma;
                rest
            }
            Stage::Notes => {
                let (notes, rest) = extract_notes(&text);
                acc.notes = notes;
                rest
            }
        };
        acc
    }
}

/// Standalone `ج` followed by Syriac plural forms.
pub fn extract_plural_forms(text: &str) -> (Vec<String>, String) {
    let Some(cap) = PLURAL_FORMS.captures(text) else {
        return (Vec::new(), text.to_string());
    };
    let (Some(whole), Some(list)) = (cap.get(0), cap.get(1)) else {
        return (Vec::new(), text.to_string());
    };

    let forms = PLURAL_SEPARATOR
        .split(list.as_str())
        .map(collapse_whitespace)
        .filter(|f| !f.is_empty())
        .collect();

    (forms, splice_out(text, whole.range()))
}

/// Transliteration, in order of preference: a `/…/` then a `[…]` holding
/// Latin or IPA characters, or the longest bare Latin/IPA run.
pub fn extract_pronunciation(text: &str) -> (Option<String>, String) {
    for delimited in [&*SLASH_SPAN, &*BRACKET_SPAN] {
        let span = delimited
            .captures_iter(text)
            .filter_map(|cap| Some((cap.get(0)?, cap.get(1)?)))
            .find(|(_, inner)| contains_latin_ipa(inner.as_str()));
        if let Some((whole, inner)) = span {
            return (Some(compose(inner.as_str())), splice_out(text, whole.range()));
        }
    }

    let longest = LATIN_RUN.find_iter(text).reduce(|best, m| {
        if m.as_str().trim_end().chars().count() > best.as_str().trim_end().chars().count() {
            m
        } else {
            best
        }
    });
    match longest {
        Some(m) => (Some(compose(m.as_str().trim())), splice_out(text, m.range())),
        None => (None, text.to_string()),
    }
}

fn compose(ipa: &str) -> String {
    ipa.trim().nfc().collect()
}

/// First Syriac run; multi-word phrases are kept together.
pub fn extract_lemma(text: &str) -> (Option<String>, String) {
    let Some(m) = SYRIAC_RUN.find(text) else {
        return (None, text.to_string());
    };
    let lemma = collapse_whitespace(m.as_str().trim_end_matches(|c: char| {
        c.is_whitespace() || c == '.' || c == '-'
    }));
    (Some(lemma), splice_out(text, m.range()))
}

/// Pull out every bracketed span, first to last, rescanning after each cut.
/// Unterminated brackets never match and stay in the residual text.
pub fn extract_notes(text: &str) -> (Vec<String>, String) {
    let mut notes = Vec::new();
    let mut rest = text.to_string();

    while let Some((range, note)) = next_note(&rest) {
        if !note.is_empty() {
            notes.push(note);
        }
        rest = splice_out(&rest, range);
    }

    (notes, rest)
}

fn next_note(text: &str) -> Option<(std::ops::Range<usize>, String)> {
    let cap = NOTE_SPAN.captures(text)?;
    Some((cap.get(0)?.range(), cap.get(1)?.as_str().trim().to_string()))
}
