//! Main segmentation pipeline: raw message in, devotional record out

use crate::heading::HeadingRules;
use crate::locate::{locate_sections, PrayerCues};
use crate::normalize::normalize_body;
use crate::profile::CompiledProfile;
use crate::reading::{extract_body_reading, extract_subject_reading, READING_WINDOW};
use crate::scrub::{scrub_field, ScrubOptions};
use crate::slice::{default_terminators, slice_sections};
use crate::types::{DevotionalRecord, RawMessage};
use regex::Regex;
use tracing::debug;

/// Segment a message with the built-in heading rules, prayer cues, and
/// terminators.
///
/// Never fails: a message that cannot be segmented comes back with its
/// `found_*` flags false and `identified` false.
#[must_use]
pub fn parse_message(msg: &RawMessage) -> DevotionalRecord {
    let rules = HeadingRules::builtin();
    let cues = PrayerCues::default();
    segment(
        msg,
        &rules,
        Some(&cues),
        default_terminators(),
        &ScrubOptions::default(),
    )
}

/// Segment a message using a compiled parsing profile.
#[must_use]
pub fn parse_message_with(profile: &CompiledProfile, msg: &RawMessage) -> DevotionalRecord {
    segment(
        msg,
        profile.rules(),
        profile.cues(),
        profile.terminators(),
        profile.scrub_options(),
    )
}

fn segment(
    msg: &RawMessage,
    rules: &HeadingRules,
    cues: Option<&PrayerCues>,
    terminators: &[Regex],
    scrub_options: &ScrubOptions,
) -> DevotionalRecord {
    let (subject, subject_reading) = extract_subject_reading(&msg.subject);

    let Some(body) = normalize_body(msg) else {
        debug!("message {} has no usable body", msg.message_id);
        return DevotionalRecord::unidentified(msg, subject);
    };

    let lines: Vec<&str> = body.lines().collect();
    let positions = locate_sections(&lines, rules, cues);
    let spans = slice_sections(&lines, &positions, terminators);

    let reading = subject_reading.or_else(|| {
        positions
            .verse
            .as_ref()
            .and_then(|verse| extract_body_reading(&lines, verse.line, READING_WINDOW))
    });

    let found_verse = spans.verse.is_some();
    let found_reflection = spans.reflection.is_some();
    let found_prayer = spans.prayer.is_some();
    let found_reading = reading.is_some();
    let identified = found_verse && found_reflection && found_prayer;

    debug!(
        "segmented message {}: verse={found_verse} reflection={found_reflection} \
         prayer={found_prayer} reading={found_reading}",
        msg.message_id
    );

    DevotionalRecord {
        message_id: msg.message_id.clone(),
        date: msg.date.clone(),
        subject,
        verse: spans
            .verse
            .map(|span| scrub_field(&span, scrub_options))
            .unwrap_or_default(),
        reflection: spans
            .reflection
            .map(|span| scrub_field(&span, scrub_options))
            .unwrap_or_default(),
        prayer: spans
            .prayer
            .map(|span| scrub_field(&span, scrub_options))
            .unwrap_or_default(),
        reading,
        found_verse,
        found_reflection,
        found_prayer,
        found_reading,
        identified,
    }
}
