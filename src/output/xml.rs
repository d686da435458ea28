//! Markup sink.
//!
//! One element per field, empty or absent fields omitted. Child order is
//! fixed: lemma, pronunciation, partOfSpeech, attributes, pluralForms,
//! senses, flatGlosses, notes, subentries, metadata.
//!
//! ```text
//! <entries>
//!   <entry id="باب:0001">
//!     <lemma lang="syc">ܟܵܬ݂ܵܒ݂ܵܐ</lemma>
//!     <senses>
//!       <sense>
//!         <mainGloss lang="ar">كتاب</mainGloss>
//!       </sense>
//!     </senses>
//!   </entry>
//! </entries>
//! ```

use crate::entry::LexicalEntry;

struct XmlSerializer {
    output: String,
    indent_level: usize,
}

impl XmlSerializer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.output.push_str(&self.indent());
        self.output.push_str(&start_tag(tag, attrs));
        self.output.push('\n');
        self.indent_level += 1;
    }

    fn close(&mut self, tag: &str) {
        self.indent_level -= 1;
        self.output.push_str(&self.indent());
        self.output.push_str(&format!("</{}>\n", tag));
    }

    fn text_element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str(&self.indent());
        self.output.push_str(&start_tag(tag, attrs));
        self.output.push_str(&escape_xml(text));
        self.output.push_str(&format!("</{}>\n", tag));
    }

    fn list<S: AsRef<str>>(&mut self, tag: &str, item_tag: &str, attrs: &[(&str, &str)], items: &[S]) {
        if items.is_empty() {
            return;
        }
        self.open(tag, &[]);
        for item in items {
            self.text_element(item_tag, attrs, item.as_ref());
        }
        self.close(tag);
    }

    fn serialize_entry(&mut self, entry: &LexicalEntry) {
        self.open("entry", &[("id", entry.id.as_deref().unwrap_or(""))]);

        if let Some(lemma) = &entry.lemma {
            self.text_element("lemma", &[("lang", "syc")], lemma);
        }
        if let Some(ipa) = &entry.pronunciation {
            self.text_element("pronunciation", &[], ipa);
        }
        if let Some(pos) = &entry.part_of_speech {
            self.text_element("partOfSpeech", &[("lang", "ar")], pos);
        }

        if !entry.attributes.is_empty() {
            self.open("attributes", &[]);
            for (key, values) in entry.attributes.entries() {
                if key == "domain" {
                    self.list(key, "item", &[], values.as_slice());
                } else {
                    for value in values {
                        self.text_element(key, &[], value);
                    }
                }
            }
            self.close("attributes");
        }

        self.list("pluralForms", "form", &[("lang", "syc")], entry.plural_forms.as_slice());

        if !entry.senses.is_empty() {
            self.open("senses", &[]);
            for sense in &entry.senses {
                self.open("sense", &[]);
                self.text_element("mainGloss", &[("lang", "ar")], &sense.main_gloss);
                self.list("synonyms", "synonym", &[("lang", "ar")], sense.synonyms.as_slice());
                self.close("sense");
            }
            self.close("senses");
        }

        self.list("flatGlosses", "gloss", &[("lang", "ar")], entry.flat_glosses.as_slice());
        self.list("notes", "note", &[], entry.notes.as_slice());

        if !entry.subentries.is_empty() {
            self.open("subentries", &[]);
            for sub in &entry.subentries {
                self.serialize_entry(sub);
            }
            self.close("subentries");
        }

        if !entry.metadata.is_empty() {
            self.open("metadata", &[]);
            for (key, value) in entry.metadata.entries() {
                self.text_element(key, &[], &value);
            }
            self.close("metadata");
        }

        self.close("entry");
    }
}

fn start_tag(tag: &str, attrs: &[(&str, &str)]) -> String {
    let mut out = format!("<{}", tag);
    for (name, value) in attrs {
        out.push_str(&format!(" {}=\"{}\"", name, escape_xml(value)));
    }
    out.push('>');
    out
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serialize entries to an XML document
pub fn to_xml(entries: &[LexicalEntry]) -> String {
    let mut serializer = XmlSerializer::new();
    serializer.output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    serializer.open("entries", &[]);
    for entry in entries {
        serializer.serialize_entry(entry);
    }
    serializer.close("entries");
    serializer.output
}

#[cfg(test)]
mod xml_tests {
    use super::*;
    use crate::attributes::{Domain, Gender};
    use crate::senses::Sense;

    fn entry() -> LexicalEntry {
        let mut entry = LexicalEntry {
            id: Some("باب:0001".to_string()),
            lemma: Some("ܟܬܒܐ".to_string()),
            pronunciation: Some("kθɑːβɑː".to_string()),
            part_of_speech: Some("اسم".to_string()),
            plural_forms: vec!["ܟܬܒܐ̈".to_string()],
            senses: vec![Sense {
                main_gloss: "كتاب".to_string(),
                synonyms: vec!["سفر".to_string()],
            }],
            flat_glosses: vec!["كتاب".to_string(), "سفر".to_string()],
            notes: vec!["a < b & c".to_string()],
            ..LexicalEntry::default()
        };
        entry.attributes.gender = Some(Gender::Masculine);
        entry.attributes.domain = vec![Domain::Plant, Domain::Bird];
        entry.metadata.source = Some("باب.txt".to_string());
        entry.metadata.index = Some(1);
        entry
    }

    fn position(xml: &str, needle: &str) -> usize {
        xml.find(needle).unwrap_or_else(|| panic!("missing {}", needle))
    }

    #[test]
    fn children_appear_in_fixed_order() {
        let mut parent = entry();
        parent.subentries.push(LexicalEntry {
            id: Some("باب:0001-1".to_string()),
            lemma: Some("ܟܬܘܒܐ".to_string()),
            ..LexicalEntry::default()
        });
        let xml = to_xml(&[parent]);
        let order = [
            "<lemma", "<pronunciation>", "<partOfSpeech", "<attributes>", "<pluralForms>",
            "<senses>", "<flatGlosses>", "<notes>", "<subentries>", "<metadata>",
        ];
        let positions: Vec<usize> = order.iter().map(|n| position(&xml, n)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", xml);
    }

    #[test]
    fn text_is_escaped() {
        let xml = to_xml(&[entry()]);
        assert!(xml.contains("<note>a &lt; b &amp; c</note>"));
    }

    #[test]
    fn empty_fields_are_omitted() {
        let xml = to_xml(&[LexicalEntry {
            id: Some("x:0001".to_string()),
            ..LexicalEntry::default()
        }]);
        assert!(xml.contains("<entry id=\"x:0001\">"));
        for tag in ["<lemma", "<attributes>", "<senses>", "<notes>", "<metadata>", "<subentries>"] {
            assert!(!xml.contains(tag), "unexpected {}", tag);
        }
    }

    #[test]
    fn attributes_render_domain_as_items() {
        let xml = to_xml(&[entry()]);
        assert!(xml.contains("<gender>masculine</gender>"));
        assert!(xml.contains("<domain>\n"));
        assert!(xml.contains("<item>plant</item>"));
        assert!(xml.contains("<item>bird</item>"));
    }

    #[test]
    fn document_is_well_framed() {
        let xml = to_xml(&[entry()]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<entries>\n"));
        assert!(xml.ends_with("</entries>\n"));
        assert!(xml.contains("<lemma lang=\"syc\">ܟܬܒܐ</lemma>"));
        assert!(xml.contains("<synonym lang=\"ar\">سفر</synonym>"));
    }
}
