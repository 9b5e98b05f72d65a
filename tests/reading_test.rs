use devotional_extract::{extract_body_reading, extract_subject_reading, READING_WINDOW};

#[test]
fn test_subject_reading_extracted_and_removed() {
    let (subject, reading) = extract_subject_reading("THE LISTENING PRAYER (read Ps. 86:1-12)");
    assert_eq!(subject, "THE LISTENING PRAYER");
    assert_eq!(reading.as_deref(), Some("Ps. 86:1-12"));
}

#[test]
fn test_subject_label_prefix_stripped() {
    let (subject, reading) = extract_subject_reading("Subject: HOPE RISES (read John 3)");
    assert_eq!(subject, "HOPE RISES");
    assert_eq!(reading.as_deref(), Some("John 3"));
}

#[test]
fn test_subject_without_reading_is_untouched() {
    let (subject, reading) = extract_subject_reading("JUST A TITLE");
    assert_eq!(subject, "JUST A TITLE");
    assert_eq!(reading, None);
}

#[test]
fn test_last_read_parenthetical_wins() {
    let (subject, reading) = extract_subject_reading("TITLE (read Gen. 1:1) (read Exod. 2:1)");
    assert_eq!(reading.as_deref(), Some("Exod. 2:1"));
    assert_eq!(subject, "TITLE (read Gen. 1:1)");
}

#[test]
fn test_reading_trailing_punctuation_trimmed() {
    let (_, reading) = extract_subject_reading("TITLE (read Ps. 23;)");
    assert_eq!(reading.as_deref(), Some("Ps. 23"));
}

#[test]
fn test_body_reading_from_second_parenthetical() {
    let lines = [
        "Verse: (John 3:16) (read Ps. 86:1-12)",
        "For God so loved the world.",
    ];
    let reading = extract_body_reading(&lines, 0, READING_WINDOW);
    assert_eq!(reading.as_deref(), Some("Ps. 86:1-12"));
}

#[test]
fn test_body_reading_from_standalone_read_line() {
    let lines = ["Verse for Today:", "(read Num. 6:22-27)", "The Lord bless you."];
    let reading = extract_body_reading(&lines, 0, READING_WINDOW);
    assert_eq!(reading.as_deref(), Some("Num. 6:22-27"));
}

#[test]
fn test_body_reading_inline_after_read_keyword() {
    let lines = ["Verse: John 1:1 read Ps. 100", "In the beginning."];
    let reading = extract_body_reading(&lines, 0, READING_WINDOW);
    assert_eq!(reading.as_deref(), Some("Ps. 100"));
}

#[test]
fn test_no_qualifying_reading_yields_none() {
    let lines = ["Verse: John 1:1", "In the beginning was the Word."];
    assert_eq!(extract_body_reading(&lines, 0, READING_WINDOW), None);
}

#[test]
fn test_window_does_not_reach_past_its_end() {
    let lines = ["Verse: John 1:1", "plain line", "(read Ps. 100)"];
    assert_eq!(extract_body_reading(&lines, 0, READING_WINDOW), None);
}
