//! Post-parse record scanning: flag records that need manual review

use crate::types::DevotionalRecord;
use regex::Regex;
use serde::Serialize;

static UNUSUAL_CHAR: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[^\x20-\x7E\n\r\t]").unwrap());

static MARKUP_TAG: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static EMPHASIS_MARKER: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\*\*|[*_#]").unwrap());

static WORD: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[A-Za-z']+").unwrap());

/// The scrubbed fields a scan inspects.
fn scanned_fields(record: &DevotionalRecord) -> [(&'static str, &str); 4] {
    [
        ("subject", record.subject.as_str()),
        ("verse", record.verse.as_str()),
        ("reflection", record.reflection.as_str()),
        ("prayer", record.prayer.as_str()),
    ]
}

/// One problem found in a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordIssue {
    /// The record is not fully identified
    NotIdentified,

    /// Characters outside printable ASCII survived scrubbing
    UnusualCharacters { field: String, sample: String },

    /// An HTML or XML tag survived normalization
    MarkupTags { field: String, sample: String },

    /// Emphasis or markdown markers survived scrubbing
    EmphasisMarkers { field: String },

    /// The same word appears twice in a row
    RepeatedWords { field: String, word: String },
}

/// Scan findings for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    pub message_id: String,
    pub issues: Vec<RecordIssue>,
}

/// Scan a single record for leftovers the pipeline should have removed and
/// for incompleteness. An empty result means nothing needs review.
#[must_use]
pub fn validate_record(record: &DevotionalRecord) -> Vec<RecordIssue> {
    let mut issues = Vec::new();

    if !record.identified {
        issues.push(RecordIssue::NotIdentified);
    }

    for (name, value) in scanned_fields(record) {
        if let Some(found) = UNUSUAL_CHAR.find(value) {
            issues.push(RecordIssue::UnusualCharacters {
                field: name.to_string(),
                sample: found.as_str().to_string(),
            });
        }
        if let Some(found) = MARKUP_TAG.find(value) {
            issues.push(RecordIssue::MarkupTags {
                field: name.to_string(),
                sample: found.as_str().to_string(),
            });
        }
        if EMPHASIS_MARKER.is_match(value) {
            issues.push(RecordIssue::EmphasisMarkers {
                field: name.to_string(),
            });
        }
        if let Some(word) = first_repeated_word(value) {
            issues.push(RecordIssue::RepeatedWords {
                field: name.to_string(),
                word,
            });
        }
    }

    issues
}

/// Scan a batch and report only the records with findings, in input order.
#[must_use]
pub fn scan_records(records: &[DevotionalRecord]) -> Vec<RecordReport> {
    records
        .iter()
        .filter_map(|record| {
            let issues = validate_record(record);
            (!issues.is_empty()).then(|| RecordReport {
                message_id: record.message_id.clone(),
                issues,
            })
        })
        .collect()
}

fn first_repeated_word(value: &str) -> Option<String> {
    let mut previous: Option<&str> = None;
    for word in WORD.find_iter(value).map(|m| m.as_str()) {
        if previous.is_some_and(|p| p.eq_ignore_ascii_case(word)) {
            return Some(word.to_string());
        }
        previous = Some(word);
    }
    None
}
