use devotional_extract::{
    parse_message_with, InferenceRules, ParseError, ParsingProfile, RawMessage,
};

fn era_profile() -> ParsingProfile {
    ParsingProfile {
        name: "good-news-era".to_string(),
        verse_pattern: r"^\s*Good\s+News\s*:\s*(?P<inline>.*)$".to_string(),
        reflection_pattern: r"^\s*Lesson\s*:\s*(?P<inline>.*)$".to_string(),
        prayer_pattern: r"^\s*Prayer\s*:\s*(?P<inline>.*)$".to_string(),
        terminators: vec![r"\bpastor\s+(?:sather|al)\b".to_string()],
        inference: InferenceRules::default(),
        preserve_paragraphs: false,
    }
}

fn message(body: &str) -> RawMessage {
    RawMessage {
        message_id: "m-1".to_string(),
        subject: "TITLE".to_string(),
        date: String::new(),
        body_html: None,
        body_plain: Some(body.to_string()),
    }
}

#[test]
fn test_profile_drives_segmentation() {
    let compiled = era_profile().compile().unwrap();
    let record = parse_message_with(
        &compiled,
        &message(
            "good news: Rom 5:8\n\
             But God shows his love for us.\n\
             Lesson:\n\
             Grace precedes merit.\n\
             Prayer:\n\
             Lord Jesus, thank you. Amen.",
        ),
    );

    assert!(record.identified);
    assert_eq!(record.verse, "Rom 5:8 But God shows his love for us.");
    assert_eq!(record.reflection, "Grace precedes merit.");
    assert_eq!(record.prayer, "Lord Jesus, thank you. Amen.");
}

#[test]
fn test_profile_inference_still_applies() {
    let compiled = era_profile().compile().unwrap();
    let record = parse_message_with(
        &compiled,
        &message(
            "Good News: Rom 5:8\ntext\nLesson:\nmore\nDear Heavenly Father, we thank you. Amen.",
        ),
    );

    assert!(record.found_prayer);
    assert_eq!(record.prayer, "Dear Heavenly Father, we thank you. Amen.");
}

#[test]
fn test_profile_can_disable_inference() {
    let mut profile = era_profile();
    profile.inference.allow_prayer_inference = false;
    let compiled = profile.compile().unwrap();
    let record = parse_message_with(
        &compiled,
        &message("Good News: Rom 5:8\ntext\nLesson:\nmore\nDear Lord, hear us. Amen."),
    );

    assert!(!record.found_prayer);
    assert!(!record.identified);
}

#[test]
fn test_profile_preserves_paragraphs_when_asked() {
    let mut profile = era_profile();
    profile.preserve_paragraphs = true;
    let compiled = profile.compile().unwrap();
    let record = parse_message_with(
        &compiled,
        &message(
            "Good News: Rom 5:8\n\
             Lesson:\n\
             First thought.\n\n\
             Second thought.\n\
             Prayer:\n\
             Amen.",
        ),
    );

    assert_eq!(record.reflection, "First thought.\n\nSecond thought.");
}

#[test]
fn test_builtin_profile_is_a_usable_baseline() {
    let compiled = ParsingProfile::builtin("baseline").compile().unwrap();
    let record = parse_message_with(
        &compiled,
        &message("Today's Verse: John 3:16\ntext\nThought for Today:\nmore\nPrayer:\nAmen."),
    );

    assert!(record.identified);
    assert_eq!(record.verse, "John 3:16 text");
}

#[test]
fn test_profile_json_round_trip() {
    let profile = era_profile();
    let json = serde_json::to_string_pretty(&profile).unwrap();
    let back: ParsingProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn test_profile_save_and_load() {
    let dir = std::env::temp_dir().join(format!("devotional_profile_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("era.json");

    let profile = era_profile();
    profile.save(&path).unwrap();
    let back = ParsingProfile::load(&path).unwrap();
    assert_eq!(back, profile);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_malformed_pattern_is_a_config_error() {
    let mut profile = era_profile();
    profile.verse_pattern = "(".to_string();
    match profile.compile() {
        Err(ParseError::Pattern(_)) => {}
        other => panic!("expected a pattern error, got {other:?}"),
    }
}
