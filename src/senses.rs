//! Sense segmentation of the Arabic gloss text.
//!
//! Primary senses are separated by `/`, `؛` or `;`. Inside a sense, a
//! period separates the main gloss from its synonyms.

use crate::script::contains_arabic_letter;
use serde::{Deserialize, Serialize};

const PRIMARY_DELIMITERS: &[char] = &['/', '؛', ';'];
const SYNONYM_DELIMITER: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    pub main_gloss: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl Sense {
    /// Main gloss followed by its synonyms.
    pub fn glosses(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_gloss.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }
}

fn trim_segment(segment: &str) -> &str {
    segment.trim_matches(|c: char| c.is_whitespace() || c == '،' || c == ',')
}

/// Split on the primary delimiters, keeping segments that hold an Arabic letter.
pub fn split_primary_senses(text: &str) -> Vec<&str> {
    text.split(PRIMARY_DELIMITERS)
        .map(trim_segment)
        .filter(|s| !s.is_empty() && contains_arabic_letter(s))
        .collect()
}

/// First period-separated part is the main gloss, the rest are synonyms.
pub fn split_synonyms(sense: &str) -> Sense {
    let mut parts = sense
        .split(SYNONYM_DELIMITER)
        .map(trim_segment)
        .filter(|s| !s.is_empty());

    match parts.next() {
        Some(main) => Sense {
            main_gloss: main.to_string(),
            synonyms: parts.map(str::to_string).collect(),
        },
        None => Sense {
            main_gloss: sense.trim().to_string(),
            synonyms: Vec::new(),
        },
    }
}

/// Senses in order of appearance, plus their flattened gloss list.
pub fn segment_senses(gloss_text: &str) -> (Vec<Sense>, Vec<String>) {
    let senses: Vec<Sense> = split_primary_senses(gloss_text)
        .into_iter()
        .map(split_synonyms)
        .collect();
    let flat = flatten_glosses(&senses);
    (senses, flat)
}

pub fn flatten_glosses(senses: &[Sense]) -> Vec<String> {
    senses
        .iter()
        .flat_map(Sense::glosses)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod sense_tests {
    use super::*;
    use proptest::prelude::*;

    fn sense(main: &str, synonyms: &[&str]) -> Sense {
        Sense {
            main_gloss: main.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn primary_then_synonym_split() {
        let (senses, flat) = segment_senses("كبير/عظيم. جليل؛ ضخم");
        assert_eq!(
            senses,
            vec![sense("كبير", &[]), sense("عظيم", &["جليل"]), sense("ضخم", &[])]
        );
        assert_eq!(flat, vec!["كبير", "عظيم", "جليل", "ضخم"]);
    }

    #[test]
    fn ascii_semicolon_is_a_primary_delimiter() {
        let (senses, _) = segment_senses("بيت; منزل");
        assert_eq!(senses, vec![sense("بيت", &[]), sense("منزل", &[])]);
    }

    #[test]
    fn punctuation_only_fragments_are_dropped() {
        let (senses, _) = segment_senses("/ ، / كلمة ;");
        assert_eq!(senses, vec![sense("كلمة", &[])]);
    }

    #[test]
    fn trailing_period_adds_no_synonym() {
        let (senses, _) = segment_senses("كلمة.");
        assert_eq!(senses, vec![sense("كلمة", &[])]);
    }

    #[test]
    fn stray_leading_comma_is_trimmed() {
        let (senses, _) = segment_senses("، بيت");
        assert_eq!(senses, vec![sense("بيت", &[])]);
    }

    #[test]
    fn empty_gloss_has_no_senses() {
        let (senses, flat) = segment_senses("");
        assert!(senses.is_empty());
        assert!(flat.is_empty());
    }

    proptest! {
        #[test]
        fn flat_length_matches_senses(s in "[ابتث ./؛;،]{0,30}") {
            let (senses, flat) = segment_senses(&s);
            let expected: usize = senses.iter().map(|s| 1 + s.synonyms.len()).sum();
            prop_assert_eq!(flat.len(), expected);
        }
    }
}
