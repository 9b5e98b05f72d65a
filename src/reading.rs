//! Reading reference extraction: the optional "(read Book C:V)" citation

use crate::scrub::scrub_inline;
use regex::Regex;

/// How many lines after the verse heading are searched for a reading.
pub const READING_WINDOW: usize = 2;

static SUBJECT_LABEL: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)^\s*subject\s*:\s*").unwrap());

static READ_PAREN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\(([^)]*\bread\b[^)]*)\)").unwrap());

static READ_TAIL: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\bread\b\s*:?\s*\(?\s*(.+?)\s*\)?\s*$").unwrap());

static ANY_PAREN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?s)\((.*?)\)").unwrap());

static READ_PREFIX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)^\s*\(?\s*read\b[:\s]*").unwrap());

/// Extract the reading reference from a subject line.
///
/// The last parenthetical containing the word "read" supplies the reading;
/// that parenthetical is removed from the subject. Returns the cleaned
/// subject (leading `Subject:` label stripped, scrubbed) and the reading,
/// if any.
#[must_use]
pub fn extract_subject_reading(subject: &str) -> (String, Option<String>) {
    let stripped = SUBJECT_LABEL.replace(subject, "");
    let stripped: &str = &stripped;
    let mut cleaned = stripped.to_string();
    let mut reading = None;

    if let Some(caps) = READ_PAREN.captures_iter(stripped).last() {
        if let Some(whole) = caps.get(0) {
            if let Some(tail) = READ_TAIL.captures(&caps[1]) {
                reading = non_empty(clean_reading(&tail[1]));
            }
            cleaned = format!("{}{}", &stripped[..whole.start()], &stripped[whole.end()..]);
        }
    }

    (scrub_inline(&cleaned), reading)
}

/// Extract a reading reference from the lines at and after the verse
/// heading, used only when the subject yielded nothing.
///
/// Within the window: a second parenthetical (the first being the verse's
/// own citation) wins; otherwise the first line containing the word "read"
/// supplies everything after it. A standalone `(read ...)` line satisfies
/// the latter form.
#[must_use]
pub fn extract_body_reading(lines: &[&str], verse_line: usize, window: usize) -> Option<String> {
    let end = (verse_line + window).min(lines.len());
    if verse_line >= end {
        return None;
    }

    let window_text = lines[verse_line..end].join("\n");
    let parens: Vec<_> = ANY_PAREN.captures_iter(&window_text).collect();
    if parens.len() >= 2 {
        let inside = parens[1].get(1).map_or("", |m| m.as_str());
        let inside = READ_PREFIX.replace(inside, "");
        return non_empty(clean_reading(&inside));
    }

    for line in &lines[verse_line..end] {
        if let Some(caps) = READ_TAIL.captures(line) {
            return non_empty(clean_reading(&caps[1]));
        }
    }

    None
}

/// Trim a raw reading value: no embedded newlines, no leading parenthesis,
/// no trailing parenthesis/period/semicolon/comma, single-spaced.
fn clean_reading(value: &str) -> String {
    let value = value.replace('\n', " ");
    let value = value
        .trim_start_matches(|c: char| c == '(' || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, ')' | '.' | ';' | ',') || c.is_whitespace());
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
