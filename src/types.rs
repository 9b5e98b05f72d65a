//! Core types: raw messages in, devotional records out

use crate::error::{ParseError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three semantic sections extracted from a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingRole {
    Verse,
    Reflection,
    Prayer,
}

impl HeadingRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verse => "verse",
            Self::Reflection => "reflection",
            Self::Prayer => "prayer",
        }
    }
}

impl fmt::Display for HeadingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw message as delivered by an external mail source.
///
/// Exactly one of `body_html` / `body_plain` is expected to be populated;
/// a message with neither yields an unidentified record. The `date` is an
/// opaque string passed through to the output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub message_id: String,
    pub subject: String,
    pub date: String,
    pub body_html: Option<String>,
    pub body_plain: Option<String>,
}

impl RawMessage {
    /// Build a `RawMessage` from raw RFC 822 bytes.
    ///
    /// Walks the MIME tree for the first `text/plain` and `text/html`
    /// parts. The `Date` header is normalized to a UTC RFC 3339 string;
    /// an unparseable date passes through verbatim.
    pub fn from_rfc822(raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

        let message_id = header_value(&parsed.headers, "message-id").unwrap_or_default();
        let subject = header_value(&parsed.headers, "subject").unwrap_or_default();
        let date = header_value(&parsed.headers, "date").map_or_else(String::new, |raw_date| {
            DateTime::parse_from_rfc2822(&raw_date)
                .map_or(raw_date, |dt| dt.with_timezone(&Utc).to_rfc3339())
        });

        let mut body_plain = None;
        let mut body_html = None;
        collect_bodies(&parsed, &mut body_plain, &mut body_html);

        Ok(Self {
            message_id,
            subject,
            date,
            body_html,
            body_plain,
        })
    }
}

/// The normalized output record for one message.
///
/// The `found_*` flags record whether each field was located, not whether
/// it is non-empty after scrubbing: a heading with no content is still
/// found. Records are built once per message and never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevotionalRecord {
    pub message_id: String,

    /// Message date, passed through from the raw message
    pub date: String,

    /// Subject with any `(read ...)` parenthetical removed
    pub subject: String,

    pub verse: String,
    pub reflection: String,
    pub prayer: String,

    /// Optional scripture reading distinct from the main verse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,

    pub found_verse: bool,
    pub found_reflection: bool,
    pub found_prayer: bool,
    pub found_reading: bool,

    /// True iff verse, reflection, and prayer were all found
    pub identified: bool,
}

impl DevotionalRecord {
    /// A record for a message that could not be segmented: every field
    /// empty, every flag false.
    #[must_use]
    pub fn unidentified(msg: &RawMessage, subject: String) -> Self {
        Self {
            message_id: msg.message_id.clone(),
            date: msg.date.clone(),
            subject,
            verse: String::new(),
            reflection: String::new(),
            prayer: String::new(),
            reading: None,
            found_verse: false,
            found_reflection: false,
            found_prayer: false,
            found_reading: false,
            identified: false,
        }
    }
}

fn header_value(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == name)
        .map(mailparse::MailHeader::get_value)
}

fn collect_bodies(
    part: &mailparse::ParsedMail,
    plain: &mut Option<String>,
    html: &mut Option<String>,
) {
    if part.subparts.is_empty() {
        let mime = part.ctype.mimetype.to_lowercase();
        if let Ok(body) = part.get_body() {
            if mime.contains("text/html") && html.is_none() {
                *html = Some(body);
            } else if mime.contains("text/plain") && plain.is_none() {
                *plain = Some(body);
            }
        }
    } else {
        for sub in &part.subparts {
            collect_bodies(sub, plain, html);
        }
    }
}
