//! Script classification for the three scripts that meet in an entry line:
//! Syriac headwords, Arabic glosses and Latin/IPA transliteration.
//!
//! Each script is a table of code-point ranges. The `char` predicates and
//! the regex character-class bodies used by the extractor patterns are both
//! derived from those tables.

/// Syriac block (letters, vowel points, punctuation).
pub const SYRIAC_BLOCK_RANGES: &[(u32, u32)] = &[(0x0700, 0x074F)];

/// Syriac consonants, the only characters a Syriac word may start with.
pub const SYRIAC_LETTER_RANGES: &[(u32, u32)] = &[(0x0710, 0x072F), (0x074D, 0x074F)];

/// Combining Diacritical Marks, used by Syriac sources for dots over/under.
pub const COMBINING_MARK_RANGES: &[(u32, u32)] = &[(0x0300, 0x036F)];

const ARABIC_LETTER_RANGES: &[(u32, u32)] = &[
    (0x0620, 0x064A),
    (0x066E, 0x066F),
    (0x0671, 0x06D3),
    (0x06D5, 0x06D5),
    (0x06EE, 0x06EF),
    (0x06FA, 0x06FC),
    (0x06FF, 0x06FF),
];

/// Latin letters and IPA symbols that may start a transliteration.
/// Latin-1 `×` and `÷` are excluded; the Greek letters are the ones IPA borrows.
pub const LATIN_IPA_RANGES: &[(u32, u32)] = &[
    (0x0041, 0x005A),
    (0x0061, 0x007A),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x024F),
    (0x03B2, 0x03B2),
    (0x03B8, 0x03B8),
    (0x03C7, 0x03C7),
    (0x0250, 0x02AF),
    (0x02B0, 0x02FF),
    (0x1D00, 0x1DFF),
];

fn in_ranges(ch: char, ranges: &[(u32, u32)]) -> bool {
    let cp = ch as u32;
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Body of a regex character class (no brackets) covering `ranges`.
pub fn regex_class(ranges: &[(u32, u32)]) -> String {
    ranges
        .iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                format!(r"\x{{{:04X}}}", lo)
            } else {
                format!(r"\x{{{:04X}}}-\x{{{:04X}}}", lo, hi)
            }
        })
        .collect()
}

/// Arabic letters only; `،` `؛` and the harakat do not count.
pub fn is_arabic_letter(ch: char) -> bool {
    in_ranges(ch, ARABIC_LETTER_RANGES)
}

pub fn is_latin_ipa(ch: char) -> bool {
    in_ranges(ch, LATIN_IPA_RANGES)
}

pub fn contains_arabic_letter(text: &str) -> bool {
    text.chars().any(is_arabic_letter)
}

pub fn contains_latin_ipa(text: &str) -> bool {
    text.chars().any(is_latin_ipa)
}
