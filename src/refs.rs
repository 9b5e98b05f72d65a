//! Scripture reference cleanup: Roman book numerals to Arabic

use crate::types::DevotionalRecord;
use regex::Regex;

// A leading Roman numeral before a book name, e.g. "II Corinthians 5:17"
static ROMAN_PREFIX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^\s*(I{1,3})\s+([A-Za-z][A-Za-z.\s-]*\S.*)$").unwrap()
});

/// Normalize a leading Roman book numeral ("I John 4:7" becomes
/// "1 John 4:7"). Anything else passes through unchanged.
#[must_use]
pub fn normalize_book_numeral(reference: &str) -> String {
    let Some(caps) = ROMAN_PREFIX.captures(reference) else {
        return reference.to_string();
    };
    let arabic = match &caps[1] {
        "I" => "1",
        "II" => "2",
        "III" => "3",
        _ => return reference.to_string(),
    };
    format!("{arabic} {}", caps[2].trim_start())
}

/// A copy of the record with Roman book numerals normalized in the verse
/// and reading fields. Records are replaced whole, never edited in place.
#[must_use]
pub fn normalize_record_references(record: &DevotionalRecord) -> DevotionalRecord {
    let mut updated = record.clone();
    updated.verse = normalize_book_numeral(&record.verse);
    updated.reading = record
        .reading
        .as_deref()
        .map(normalize_book_numeral);
    updated
}
