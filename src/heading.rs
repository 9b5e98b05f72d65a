//! Heading classification: decide whether a line names a section role

use crate::error::Result;
use crate::types::HeadingRole;
use regex::{Regex, RegexBuilder};

/// Keyword stems accepted as a verse heading.
pub const VERSE_KEYWORDS: &[&str] = &["verses", "verse", "scripture", "reading", "meditation", "text"];

/// Keyword stems accepted as a reflection heading.
pub const REFLECTION_KEYWORDS: &[&str] = &[
    "thoughts",
    "thought",
    "reflections",
    "reflection",
    "devotional",
    "lessons",
    "lesson",
    "meditation",
];

/// Keyword stems accepted as a prayer heading.
pub const PRAYER_KEYWORDS: &[&str] =
    &["prayer suggestion", "suggested prayer", "prayers", "prayer"];

static BUILTIN_RULES: std::sync::LazyLock<HeadingRules> = std::sync::LazyLock::new(|| {
    HeadingRules::from_patterns(
        &line_heading_pattern(VERSE_KEYWORDS),
        &line_heading_pattern(REFLECTION_KEYWORDS),
        &line_heading_pattern(PRAYER_KEYWORDS),
    )
    .unwrap()
});

/// A line recognized as a section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Which section the heading names
    pub role: HeadingRole,

    /// Same-line text after the colon, trimmed; `None` when the heading
    /// stands alone or the colon ends the line
    pub inline: Option<String>,
}

/// Compiled heading patterns for the three roles.
///
/// One `inline`-capturing pattern per role; all matching is case-insensitive
/// and anchored at line start.
#[derive(Debug, Clone)]
pub struct HeadingRules {
    verse: Regex,
    reflection: Regex,
    prayer: Regex,
}

impl HeadingRules {
    /// Compile rules from three pattern strings. Each pattern may use a
    /// named `inline` capture for same-line heading content.
    pub fn from_patterns(verse: &str, reflection: &str, prayer: &str) -> Result<Self> {
        Ok(Self {
            verse: case_insensitive(verse)?,
            reflection: case_insensitive(reflection)?,
            prayer: case_insensitive(prayer)?,
        })
    }

    /// The built-in rules covering every known heading spelling.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_RULES.clone()
    }

    /// Classify a single normalized line.
    ///
    /// Verse takes priority over reflection, reflection over prayer, so a
    /// keyword shared between roles resolves to the earlier role.
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<HeadingMatch> {
        let ordered = [
            (HeadingRole::Verse, &self.verse),
            (HeadingRole::Reflection, &self.reflection),
            (HeadingRole::Prayer, &self.prayer),
        ];
        for (role, pattern) in ordered {
            if let Some(caps) = pattern.captures(line) {
                let inline = caps
                    .name("inline")
                    .map(|m| m.as_str().trim())
                    .filter(|text| !text.is_empty())
                    .map(str::to_string);
                return Some(HeadingMatch { role, inline });
            }
        }
        None
    }
}

// Date forms seen in era headings like "VERSE FOR MAY 29:": a month name
// with a day, or M/D with an optional 2- or 4-digit year
const HEADING_DATE: &str =
    r"[a-z]+\s+\d{1,2}|\d{1,2}\s*[/.\-]\s*\d{1,2}(?:\s*[/.\-]\s*(?:\d{4}|\d{2}))?";

/// Build the line-anchored heading pattern for a keyword set.
///
/// Accepts optional leading emphasis markers, an optional possessive
/// ("Today's" with apostrophe variants, or "Our"), an optional trailing
/// "for Today" or "for <date>", optional closing emphasis, and an optional
/// colon with same-line inline text.
#[must_use]
pub fn line_heading_pattern(keywords: &[&str]) -> String {
    let alternation = keyword_alternation(keywords);
    format!(
        r"^\s*(?:\*\*|__|[*_])?\s*(?:today['’`´]?s?\s+|our\s+)?(?:{alternation})(?:\s+for\s+(?:today|{HEADING_DATE}))?\s*(?:\*\*|__|[*_])?\s*(?::\s*(?:\*\*|__|[*_])?\s*(?P<inline>.*))?$"
    )
}

/// Join keywords into a regex alternation, turning interior spaces into
/// whitespace runs.
fn keyword_alternation(keywords: &[&str]) -> String {
    keywords
        .iter()
        .map(|word| word.split_whitespace().collect::<Vec<_>>().join(r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

pub(crate) fn case_insensitive(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}
