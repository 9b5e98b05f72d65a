use devotional_extract::{
    normalize_book_numeral, normalize_record_references, parse_message, scan_records,
    validate_record, RawMessage, RecordIssue,
};

fn parsed(body: &str) -> devotional_extract::DevotionalRecord {
    parse_message(&RawMessage {
        message_id: "m-1".to_string(),
        subject: "TITLE".to_string(),
        date: String::new(),
        body_html: None,
        body_plain: Some(body.to_string()),
    })
}

#[test]
fn test_clean_identified_record_has_no_issues() {
    let record = parsed(
        "Verse: John 3:16\nFor God so loved the world.\nReflection:\nGrace.\nPrayer:\nAmen.",
    );
    assert!(validate_record(&record).is_empty());
}

#[test]
fn test_unidentified_record_is_flagged() {
    let record = parsed("No headings at all in this body.");
    let issues = validate_record(&record);
    assert!(issues.contains(&RecordIssue::NotIdentified));
}

#[test]
fn test_leftover_markup_and_markers_are_flagged() {
    let mut record = parsed(
        "Verse: John 3:16\nFor God so loved the world.\nReflection:\nGrace.\nPrayer:\nAmen.",
    );
    record.reflection = "He <b>restores</b> my soul".to_string();
    record.prayer = "Lord **hear** us".to_string();

    let issues = validate_record(&record);
    assert!(issues.iter().any(|issue| matches!(
        issue,
        RecordIssue::MarkupTags { field, .. } if field == "reflection"
    )));
    assert!(issues.iter().any(|issue| matches!(
        issue,
        RecordIssue::EmphasisMarkers { field } if field == "prayer"
    )));
}

#[test]
fn test_unusual_characters_are_flagged() {
    let mut record = parsed(
        "Verse: John 3:16\nFor God so loved the world.\nReflection:\nGrace.\nPrayer:\nAmen.",
    );
    record.verse = "John 3:16 \u{2014} for God".to_string();

    let issues = validate_record(&record);
    assert!(issues.iter().any(|issue| matches!(
        issue,
        RecordIssue::UnusualCharacters { field, .. } if field == "verse"
    )));
}

#[test]
fn test_repeated_words_are_flagged() {
    let mut record = parsed(
        "Verse: John 3:16\nFor God so loved the world.\nReflection:\nGrace.\nPrayer:\nAmen.",
    );
    record.reflection = "He leads me beside the the still waters".to_string();

    let issues = validate_record(&record);
    assert!(issues.iter().any(|issue| matches!(
        issue,
        RecordIssue::RepeatedWords { word, .. } if word == "the"
    )));
}

#[test]
fn test_scan_reports_only_problem_records() {
    let clean = parsed(
        "Verse: John 3:16\nFor God so loved the world.\nReflection:\nGrace.\nPrayer:\nAmen.",
    );
    let mut broken = clean.clone();
    broken.message_id = "m-2".to_string();
    broken.prayer = "Lord _hear_ us".to_string();

    let reports = scan_records(&[clean, broken]);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message_id, "m-2");
}

#[test]
fn test_roman_book_numerals_normalized() {
    assert_eq!(normalize_book_numeral("I John 4:7"), "1 John 4:7");
    assert_eq!(normalize_book_numeral("II Corinthians 5:17"), "2 Corinthians 5:17");
    assert_eq!(normalize_book_numeral("III John 1:2"), "3 John 1:2");
    assert_eq!(normalize_book_numeral("John 3:16"), "John 3:16");
    assert_eq!(normalize_book_numeral("Isaiah 40:31"), "Isaiah 40:31");
}

#[test]
fn test_record_reference_normalization_returns_a_copy() {
    let mut record = parsed(
        "Verse: I John 4:7\nBeloved, let us love.\nReflection:\nLove is of God.\nPrayer:\nAmen.",
    );
    record.reading = Some("II Kings 2:11".to_string());

    let updated = normalize_record_references(&record);
    assert!(updated.verse.starts_with("1 John 4:7"));
    assert_eq!(updated.reading.as_deref(), Some("2 Kings 2:11"));
    assert!(record.verse.starts_with("I John 4:7"));
}
