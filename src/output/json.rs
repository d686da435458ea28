//! Structured-data sink. Lossless for the entry model.

use crate::entry::LexicalEntry;
use crate::error::Result;

pub fn to_json(entries: &[LexicalEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

pub fn from_json(json: &str) -> Result<Vec<LexicalEntry>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::document::parse_document;
    use crate::entry::EntryParser;
    use crate::source::{Paragraph, SourceName};

    fn sample() -> Vec<LexicalEntry> {
        let source = SourceName {
            file_name: "باب.txt".to_string(),
            base: "باب".to_string(),
        };
        parse_document(
            vec![
                Paragraph::list_item("*ܟܵܬ݂ܵܒ݂ܵܐ /kθɑːβɑː/ اسم (ذ) (نب) (ح) (تعليق) ج ܟܬ݂ܵܒ݂ܹ̇ܐ، ܟܬ݂ܵܒ݂ܘܵܬ݂ܵܐ كتاب/سفر. مصحف"),
                Paragraph::plain("- ܟܬ݂ܵܒ݂ܘܿܢܵܐ (مثله)"),
                Paragraph::list_item("على كل حال"),
                Paragraph::list_item("ܐܵܦ (مثله)"),
            ],
            &EntryParser::default(),
            &source,
        )
        .entries
    }

    #[test]
    fn round_trip_is_lossless() {
        let entries = sample();
        let json = to_json(&entries).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn keys_are_camel_case_and_text_is_not_escaped() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains("\"partOfSpeech\": \"اسم\""));
        assert!(json.contains("\"pluralForms\""));
        assert!(json.contains("\"flatGlosses\""));
        assert!(json.contains("\"mainGloss\": \"كتاب\""));
        assert!(json.contains("\"inheritedFrom\": \"باب:0001\""));
        assert!(json.contains("\"type\": \"phrase\""));
        assert!(json.contains("\"domain\": [\n"));
    }

    #[test]
    fn absent_lemma_is_null() {
        let value: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert!(value[1]["lemma"].is_null());
        assert_eq!(value[0]["attributes"]["foreign"], serde_json::json!(true));
    }
}
