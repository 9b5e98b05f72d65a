//! Section location: first verse, first later reflection, first later prayer,
//! with prayer inference when no explicit prayer heading exists

use crate::error::Result;
use crate::heading::{case_insensitive, HeadingRules};
use crate::types::HeadingRole;
use regex::Regex;

/// Default prayer-opener phrases.
pub const DEFAULT_OPENER_PATTERN: &str =
    r"^\s*(?:dear\s+(?:heavenly\s+)?father|dear\s+lord|heavenly\s+father|lord\s+jesus)\b";

/// Default author sign-off, matched against a full line after emphasis
/// markers are trimmed.
pub const DEFAULT_SIGNATURE_PATTERN: &str =
    r"^pastor\s+(?:alvin\s+and\s+marcie\s+)?(?:sather|al)\b\.?$";

/// Default trailing-Amen rule.
pub const DEFAULT_AMEN_PATTERN: &str = r"\bamen\.?\s*$";

static DEFAULT_CUES: std::sync::LazyLock<PrayerCues> = std::sync::LazyLock::new(|| {
    PrayerCues::from_patterns(
        DEFAULT_OPENER_PATTERN,
        DEFAULT_SIGNATURE_PATTERN,
        DEFAULT_AMEN_PATTERN,
    )
    .unwrap()
});

/// Compiled fallback signals used to infer a prayer start when no explicit
/// prayer heading is present.
#[derive(Debug, Clone)]
pub struct PrayerCues {
    openers: Regex,
    signatures: Regex,
    amen: Regex,
}

impl PrayerCues {
    /// Compile cue patterns. All three are matched case-insensitively.
    pub fn from_patterns(openers: &str, signatures: &str, amen: &str) -> Result<Self> {
        Ok(Self {
            openers: case_insensitive(openers)?,
            signatures: case_insensitive(signatures)?,
            amen: case_insensitive(amen)?,
        })
    }
}

impl Default for PrayerCues {
    fn default() -> Self {
        DEFAULT_CUES.clone()
    }
}

/// How a section start was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOrigin {
    /// An explicit heading line; content begins on the next line
    Heading,

    /// A prayer-opener phrase; the matched line is prayer content
    OpenerPhrase,

    /// An author sign-off line; content begins on the next line
    SignatureLine,

    /// A paragraph whose last line ends in "Amen"; the paragraph's first
    /// line is prayer content
    TrailingAmen,
}

/// A located or inferred section start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStart {
    /// Line index into the normalized body
    pub line: usize,

    /// Same-line heading content, when the heading carried any
    pub inline: Option<String>,

    /// Which signal established this start
    pub origin: StartOrigin,
}

/// The located starts for the three roles.
///
/// Construction guarantees strictly increasing line indices: a reflection is
/// only accepted after the verse line, a prayer only after the reflection
/// line, so a spurious later-role keyword ahead of an earlier role is
/// silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPositions {
    pub verse: Option<SectionStart>,
    pub reflection: Option<SectionStart>,
    pub prayer: Option<SectionStart>,
}

impl SectionPositions {
    /// True when all three sections were located.
    #[must_use]
    pub const fn all_found(&self) -> bool {
        self.verse.is_some() && self.reflection.is_some() && self.prayer.is_some()
    }
}

/// Walk the body lines in order and record each role's first valid start.
///
/// Without a verse anchor nothing else is examined. When verse and
/// reflection are found but no explicit prayer heading follows, the prayer
/// start is inferred from `cues` (when provided).
#[must_use]
pub fn locate_sections(
    lines: &[&str],
    rules: &HeadingRules,
    cues: Option<&PrayerCues>,
) -> SectionPositions {
    let mut positions = SectionPositions::default();

    let Some(verse) = first_role_match(lines, 0, rules, HeadingRole::Verse) else {
        return positions;
    };
    let after_verse = verse.line + 1;
    positions.verse = Some(verse);

    let Some(reflection) = first_role_match(lines, after_verse, rules, HeadingRole::Reflection)
    else {
        return positions;
    };
    let reflection_line = reflection.line;
    positions.reflection = Some(reflection);

    positions.prayer = first_role_match(lines, reflection_line + 1, rules, HeadingRole::Prayer)
        .or_else(|| cues.and_then(|cues| infer_prayer_start(lines, reflection_line, cues)));

    positions
}

/// Infer a prayer start after the reflection line.
///
/// Strategies are tried in order, first match wins: an opener phrase, a
/// sign-off line, then the paragraph holding the last trailing "Amen".
#[must_use]
pub fn infer_prayer_start(
    lines: &[&str],
    reflection_line: usize,
    cues: &PrayerCues,
) -> Option<SectionStart> {
    let from = reflection_line + 1;

    for (index, line) in lines.iter().enumerate().skip(from) {
        if cues.openers.is_match(line) {
            return Some(SectionStart {
                line: index,
                inline: None,
                origin: StartOrigin::OpenerPhrase,
            });
        }
    }

    for (index, line) in lines.iter().enumerate().skip(from) {
        if cues.signatures.is_match(strip_emphasis(line)) {
            return Some(SectionStart {
                line: index,
                inline: None,
                origin: StartOrigin::SignatureLine,
            });
        }
    }

    for (index, line) in lines.iter().enumerate().skip(from).rev() {
        if cues.amen.is_match(line) {
            let mut start = index;
            while start > from && !lines[start - 1].trim().is_empty() {
                start -= 1;
            }
            return Some(SectionStart {
                line: start,
                inline: None,
                origin: StartOrigin::TrailingAmen,
            });
        }
    }

    None
}

fn first_role_match(
    lines: &[&str],
    from: usize,
    rules: &HeadingRules,
    role: HeadingRole,
) -> Option<SectionStart> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(index, line)| {
            rules
                .classify(line)
                .filter(|found| found.role == role)
                .map(|found| SectionStart {
                    line: index,
                    inline: found.inline,
                    origin: StartOrigin::Heading,
                })
        })
}

fn strip_emphasis(line: &str) -> &str {
    line.trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace())
}
