use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::Result;
use log::debug;
use regex::{Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

/// The term this bot moderates. Kept in one place so policy and tests agree.
pub const DISALLOWED_TERM: &str = "job";

/// Characters that may be inserted between letters of the term to dodge a
/// literal match (spacing and light punctuation).
const SEPARATOR_RUN: &str = r"[\s\-._]*";

static LOOKALIKE_TABLE: OnceLock<HashMap<char, char>> = OnceLock::new();

/// Fixed lookalike table: confusable digits and homoglyph letters folded to
/// their canonical ASCII equivalents. Built once per process.
///
/// Fullwidth and mathematical variants are absent on purpose: NFKD already
/// decomposes those before the table is consulted. Characters outside this
/// table pass through unchanged.
fn lookalike_table() -> &'static HashMap<char, char> {
    LOOKALIKE_TABLE.get_or_init(|| {
        [
            // Digit stand-ins
            ('0', 'o'), ('1', 'i'), ('3', 'e'), ('4', 'a'), ('5', 's'),
            ('6', 'g'), ('7', 't'), ('8', 'b'), ('9', 'g'),

            // Cyrillic lookalikes
            ('а', 'a'), ('е', 'e'), ('і', 'i'), ('ј', 'j'), ('о', 'o'),
            ('р', 'p'), ('с', 'c'), ('х', 'x'), ('у', 'y'),
            ('А', 'A'), ('В', 'B'), ('Е', 'E'), ('І', 'I'), ('Ј', 'J'),
            ('К', 'K'), ('М', 'M'), ('Н', 'H'), ('О', 'O'), ('Р', 'P'),
            ('С', 'C'), ('Т', 'T'), ('У', 'Y'), ('Х', 'X'),

            // Greek lookalikes
            ('α', 'a'), ('ι', 'i'), ('ν', 'v'), ('ο', 'o'), ('ρ', 'p'),
            ('υ', 'u'),
            ('Α', 'A'), ('Β', 'B'), ('Ε', 'E'), ('Ζ', 'Z'), ('Η', 'H'),
            ('Ι', 'I'), ('Κ', 'K'), ('Μ', 'M'), ('Ν', 'N'), ('Ο', 'O'),
            ('Ρ', 'P'), ('Τ', 'T'), ('Υ', 'Y'), ('Χ', 'X'),
        ]
        .iter()
        .cloned()
        .collect()
    })
}

/// Check if character is a combining mark (diacritic)
fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F)
}

/// Canonicalize raw message text for comparison.
///
/// Compatibility-decomposes each character and drops combining marks so
/// accented letters fold to their base form, folds lookalike characters to
/// ASCII, then lowercases. Total over any string (the empty string
/// normalizes to itself) and idempotent.
pub fn normalize(text: &str) -> String {
    let table = lookalike_table();
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Compiled matcher for one disallowed term over normalized text.
///
/// Tolerates separator runs between letters and a plural `s` immediately
/// after the term. The term must start at a word boundary; the term (or its
/// plural) must be followed by a word boundary or a single non-word
/// character, so "jobs!" matches while "jobless" and "jobsite" do not.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    pattern: Regex,
}

impl TermMatcher {
    pub fn new(term: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(&Self::build_pattern(term))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    /// Assemble the evasion-tolerant pattern for a term.
    fn build_pattern(term: &str) -> String {
        let mut pattern = String::from(r"\b");
        for (i, ch) in term.chars().enumerate() {
            if i > 0 {
                pattern.push_str(SEPARATOR_RUN);
            }
            pattern.push_str(&regex::escape(&ch.to_string()));
        }
        pattern.push_str(r"s?(?:\b|[^\w])");
        pattern
    }

    /// Decide whether normalized text contains the term.
    pub fn is_match(&self, normalized: &str) -> bool {
        let hit = self.pattern.is_match(normalized);
        if hit {
            debug!("Term match in normalized text: {}", normalized);
        }
        hit
    }
}

/// Decide whether normalized text contains the disallowed term. Shares one
/// compiled matcher per process.
pub fn matches_disallowed_term(normalized: &str) -> bool {
    static MATCHER: OnceLock<Option<TermMatcher>> = OnceLock::new();
    MATCHER
        .get_or_init(|| TermMatcher::new(DISALLOWED_TERM).ok())
        .as_ref()
        .map(|matcher| matcher.is_match(normalized))
        .unwrap_or(false)
}

/// Normalize-then-match pipeline over raw message text.
pub struct TermDetector {
    matcher: TermMatcher,
}

impl TermDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            matcher: TermMatcher::new(DISALLOWED_TERM)?,
        })
    }

    /// Run the full pipeline against raw message text.
    pub fn scan(&self, raw: &str) -> bool {
        self.matcher.is_match(&normalize(raw))
    }
}
