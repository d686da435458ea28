//! Document assembly: paragraphs in, numbered entries out.
//!
//! Assembly runs in three steps so that the per-line work stays pure:
//!
//! 1. [`classify_paragraphs`] walks the paragraphs once, in order, deciding
//!    which lines start entries, which continue the current one as
//!    subentries, and which are dropped.
//! 2. Each kept line is turned into an entry by [`EntryParser::parse`].
//!    Lines are independent here, so this step may run in parallel.
//! 3. [`assemble`] attaches subentries to their parents, resolves `(مثله)`
//!    inheritance and stamps ids. Back-references are plain indices into
//!    the top-level list; ids only exist once every entry does.

use crate::entry::{EntryParser, LexicalEntry};
use crate::normalize::{normalize_text, strip_subentry_marker};
use crate::source::{Paragraph, SourceName};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Entry,
    Subentry,
}

/// A paragraph that survived classification, with its marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub role: LineRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NoCurrentEntry,
    HaveCurrentEntry,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssemblyStats {
    pub paragraphs: usize,
    pub entries: usize,
    pub subentries: usize,
    pub orphans: usize,
    pub ignored: usize,
    pub inherited: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub struct ClassifiedLines {
    pub lines: Vec<Line>,
    pub stats: AssemblyStats,
}

#[derive(Debug, Default)]
pub struct Assembly {
    pub entries: Vec<LexicalEntry>,
    pub stats: AssemblyStats,
}

pub fn entry_id(base: &str, index: usize) -> String {
    format!("{}:{:04}", base, index)
}

pub fn subentry_id(parent_id: &str, subindex: usize) -> String {
    format!("{}-{}", parent_id, subindex)
}

/// Decide the role of every paragraph.
///
/// The subentry test runs first: a dash-prefixed line never starts an
/// entry even when the source marks it as a list item. A subentry line
/// before any entry has nowhere to go and is dropped.
pub fn classify_paragraphs<I>(paragraphs: I) -> ClassifiedLines
where
    I: IntoIterator<Item = Paragraph>,
{
    let mut out = ClassifiedLines::default();
    let mut state = State::NoCurrentEntry;

    for paragraph in paragraphs {
        let text = normalize_text(&paragraph.text);
        if text.is_empty() {
            continue;
        }
        out.stats.paragraphs += 1;

        if let Some(body) = strip_subentry_marker(&text) {
            match state {
                State::NoCurrentEntry => {
                    debug!(line = %text, "dropping subentry with no parent entry");
                    out.stats.orphans += 1;
                }
                State::HaveCurrentEntry => {
                    out.lines.push(Line {
                        role: LineRole::Subentry,
                        text: body.to_string(),
                    });
                    out.stats.subentries += 1;
                }
            }
        } else if paragraph.is_list_item {
            out.lines.push(Line {
                role: LineRole::Entry,
                text,
            });
            out.stats.entries += 1;
            state = State::HaveCurrentEntry;
        } else {
            debug!(line = %text, "ignoring non-list paragraph");
            out.stats.ignored += 1;
        }
    }

    out
}

/// Build one entry per line, in order.
pub fn build_entries(lines: &[Line], parser: &EntryParser) -> Vec<LexicalEntry> {
    lines.iter().map(|line| parser.parse(&line.text)).collect()
}

/// Group, inherit and number. `parsed[i]` must be the entry built from `classified.lines[i]`.
pub fn assemble(
    classified: ClassifiedLines,
    parsed: Vec<LexicalEntry>,
    parser: &EntryParser,
    source: &SourceName,
) -> Assembly {
    let ClassifiedLines { lines, mut stats } = classified;
    let mut entries: Vec<LexicalEntry> = Vec::new();

    for (line, entry) in lines.into_iter().zip(parsed) {
        match line.role {
            LineRole::Entry => entries.push(entry),
            LineRole::Subentry => match entries.last_mut() {
                Some(parent) => parent.subentries.push(entry),
                None => debug!(line = %line.text, "subentry without parent reached assembly"),
            },
        }
    }

    let ids: Vec<String> = (1..=entries.len())
        .map(|i| entry_id(&source.base, i))
        .collect();

    for i in 0..entries.len() {
        if i > 0 && entries[i].wants_inheritance() {
            let (before, rest) = entries.split_at_mut(i);
            if rest[0].inherit_senses(&before[i - 1], Some(&ids[i - 1])) {
                debug!(id = %ids[i], from = %ids[i - 1], "inherited senses from previous entry");
                parser.infer_entry_type(&mut rest[0]);
                stats.inherited += 1;
            }
        }

        let entry = &mut entries[i];
        entry.id = Some(ids[i].clone());
        entry.metadata.source = Some(source.file_name.clone());
        entry.metadata.index = Some(i + 1);

        let mut subentries = std::mem::take(&mut entry.subentries);
        for (j, sub) in subentries.iter_mut().enumerate() {
            let sub_id = subentry_id(&ids[i], j + 1);
            sub.metadata.source = Some(source.file_name.clone());
            sub.metadata.parent = Some(ids[i].clone());
            sub.metadata.subindex = Some(j + 1);
            if sub.wants_inheritance() && sub.inherit_senses(entry, Some(&ids[i])) {
                debug!(id = %sub_id, from = %ids[i], "subentry inherited senses from parent");
                parser.infer_entry_type(sub);
                stats.inherited += 1;
            }
            sub.id = Some(sub_id);
        }
        entry.subentries = subentries;
    }

    info!(
        entries = entries.len(),
        subentries = stats.subentries,
        inherited = stats.inherited,
        "document assembled"
    );

    Assembly { entries, stats }
}

/// Sequential end-to-end run over a paragraph sequence.
pub fn parse_document<I>(paragraphs: I, parser: &EntryParser, source: &SourceName) -> Assembly
where
    I: IntoIterator<Item = Paragraph>,
{
    let classified = classify_paragraphs(paragraphs);
    let parsed = build_entries(&classified.lines, parser);
    assemble(classified, parsed, parser, source)
}
