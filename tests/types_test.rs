use devotional_extract::{parse_message, DevotionalRecord, HeadingRole, RawMessage};

// --- RawMessage ingestion ---

#[test]
fn test_from_rfc822_plain_text() {
    let raw = b"From: pastor@example.com\r\n\
                To: flock@example.com\r\n\
                Subject: Morning Devotional\r\n\
                Date: Thu, 01 Jan 2025 12:00:00 +0000\r\n\
                Message-ID: <abc123@example.com>\r\n\
                \r\n\
                Today's Verse: John 3:16\r\n\
                For God so loved the world.";

    let msg = RawMessage::from_rfc822(raw).unwrap();

    assert_eq!(msg.message_id, "<abc123@example.com>");
    assert_eq!(msg.subject, "Morning Devotional");
    assert_eq!(msg.date, "2025-01-01T12:00:00+00:00");
    assert!(msg.body_html.is_none());
    assert!(msg.body_plain.unwrap().contains("John 3:16"));
}

#[test]
fn test_from_rfc822_html_body() {
    let raw = b"From: pastor@example.com\r\n\
                Subject: Evening Devotional\r\n\
                Date: Thu, 01 Jan 2025 12:00:00 +0000\r\n\
                Message-ID: <def456@example.com>\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <b>Verse:</b> Psalm 23:1";

    let msg = RawMessage::from_rfc822(raw).unwrap();

    assert!(msg.body_plain.is_none());
    assert!(msg.body_html.unwrap().contains("Psalm 23:1"));
}

#[test]
fn test_from_rfc822_unparseable_date_passes_through() {
    let raw = b"From: pastor@example.com\r\n\
                Subject: Odd Date\r\n\
                Date: sometime last spring\r\n\
                Message-ID: <ghi789@example.com>\r\n\
                \r\n\
                Body text";

    let msg = RawMessage::from_rfc822(raw).unwrap();
    assert_eq!(msg.date, "sometime last spring");
}

#[test]
fn test_from_rfc822_feeds_the_parser() {
    let raw = b"From: pastor@example.com\r\n\
                Subject: WALKING IN LIGHT\r\n\
                Date: Sun, 06 Jun 2021 11:30:00 +0000\r\n\
                Message-ID: <jkl012@example.com>\r\n\
                \r\n\
                Verse: John 8:12\r\n\
                I am the light of the world.\r\n\
                Reflection:\r\n\
                Walk while you have the light.\r\n\
                Prayer:\r\n\
                Lord Jesus, light our path. Amen.";

    let record = parse_message(&RawMessage::from_rfc822(raw).unwrap());

    assert!(record.identified);
    assert_eq!(record.verse, "John 8:12 I am the light of the world.");
}

// --- HeadingRole ---

#[test]
fn test_heading_role_display() {
    assert_eq!(HeadingRole::Verse.to_string(), "verse");
    assert_eq!(HeadingRole::Reflection.to_string(), "reflection");
    assert_eq!(HeadingRole::Prayer.to_string(), "prayer");
}

// --- DevotionalRecord ---

#[test]
fn test_unidentified_record_is_empty() {
    let msg = RawMessage {
        message_id: "m-0".to_string(),
        subject: "raw subject".to_string(),
        date: "2020-01-01".to_string(),
        body_html: None,
        body_plain: None,
    };
    let record = DevotionalRecord::unidentified(&msg, "cleaned".to_string());

    assert_eq!(record.message_id, "m-0");
    assert_eq!(record.subject, "cleaned");
    assert!(!record.identified);
    assert!(record.verse.is_empty() && record.reflection.is_empty() && record.prayer.is_empty());
    assert!(record.reading.is_none());
}

#[test]
fn test_record_serializes_without_absent_reading() {
    let msg = RawMessage {
        message_id: "m-0".to_string(),
        subject: String::new(),
        date: String::new(),
        body_html: None,
        body_plain: None,
    };
    let record = DevotionalRecord::unidentified(&msg, String::new());
    let json = serde_json::to_string(&record).unwrap();

    assert!(!json.contains("\"reading\""));
    assert!(json.contains("\"found_verse\":false"));
}
