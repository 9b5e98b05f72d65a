//! Section slicing: extract raw spans between located section starts

use crate::locate::{SectionPositions, SectionStart, StartOrigin};
use regex::Regex;

/// Default terminator phrases capping an open-ended span.
pub const DEFAULT_TERMINATOR_PATTERNS: &[&str] =
    &[r"\bpastor\s+(?:alvin\s+and\s+marcie\s+)?(?:sather|al)\b"];

static DEFAULT_TERMINATORS: std::sync::LazyLock<Vec<Regex>> = std::sync::LazyLock::new(|| {
    DEFAULT_TERMINATOR_PATTERNS
        .iter()
        .map(|pattern| {
            regex::RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap()
        })
        .collect()
});

/// The compiled default terminator list.
#[must_use]
pub fn default_terminators() -> &'static [Regex] {
    &DEFAULT_TERMINATORS
}

/// Raw section spans. `None` means the section was never located; an empty
/// string means the section was located but carried no content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSpans {
    pub verse: Option<String>,
    pub reflection: Option<String>,
    pub prayer: Option<String>,
}

/// Compute the raw span for each located section.
///
/// A span runs from its start to the next located section's start line.
/// When no next section exists, it runs to the first line matching a
/// terminator, or to the end of the body. Spans never include another
/// section's start line.
#[must_use]
pub fn slice_sections(
    lines: &[&str],
    positions: &SectionPositions,
    terminators: &[Regex],
) -> SectionSpans {
    let mut spans = SectionSpans::default();

    if let Some(verse) = &positions.verse {
        let end = span_end(
            lines,
            verse,
            positions.reflection.as_ref().map(|s| s.line),
            terminators,
        );
        spans.verse = Some(extract_span(lines, verse, end));
    }

    if let Some(reflection) = &positions.reflection {
        let end = span_end(
            lines,
            reflection,
            positions.prayer.as_ref().map(|s| s.line),
            terminators,
        );
        spans.reflection = Some(extract_span(lines, reflection, end));
    }

    if let Some(prayer) = &positions.prayer {
        let end = span_end(lines, prayer, None, terminators);
        spans.prayer = Some(extract_span(lines, prayer, end));
    }

    spans
}

/// The exclusive end line for a span: the next section's start, else the
/// first terminator line after the start, else the end of the body.
fn span_end(
    lines: &[&str],
    start: &SectionStart,
    next: Option<usize>,
    terminators: &[Regex],
) -> usize {
    next.unwrap_or_else(|| {
        (start.line + 1..lines.len())
            .find(|&index| terminators.iter().any(|t| t.is_match(lines[index])))
            .unwrap_or(lines.len())
    })
}

fn extract_span(lines: &[&str], start: &SectionStart, end: usize) -> String {
    // Opener and Amen starts are prayer content; heading and sign-off lines
    // are boundary markers only.
    let content_from = match start.origin {
        StartOrigin::Heading | StartOrigin::SignatureLine => start.line + 1,
        StartOrigin::OpenerPhrase | StartOrigin::TrailingAmen => start.line,
    };

    let mut parts: Vec<String> = Vec::new();
    if let Some(inline) = &start.inline {
        parts.push(inline.clone());
    }
    if content_from < end {
        let tail = lines[content_from..end].join("\n");
        let tail = tail.trim();
        if !tail.is_empty() {
            parts.push(tail.to_string());
        }
    }
    parts.join("\n")
}
