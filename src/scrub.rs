//! Field scrubbing: final cleanup of an extracted section span

use regex::{Captures, Regex};

static NEWLINE_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?:\r?\n)+").unwrap());

static WS_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+").unwrap());

static DOT_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

static PUNCT_SPACING: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s*([,;:.])\s*").unwrap());

static PARA_BREAK: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Scrubbing behavior knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrubOptions {
    /// Keep blank-line paragraph breaks instead of flattening the field to
    /// one logical paragraph
    pub preserve_paragraphs: bool,
}

/// Scrub a raw section span into its final stored form.
///
/// Emphasis markers are removed, literal `\n` sequences and real newlines
/// become single spaces, whitespace and doubled periods collapse, and
/// punctuation is spaced (no space before, one after) except for colons
/// between digits, which stay tight. Scrubbing already-clean text is a
/// no-op; an empty result is legal.
#[must_use]
pub fn scrub_field(raw: &str, options: &ScrubOptions) -> String {
    let flat = raw.replace('*', "").replace('_', "").replace("\\n", " ");
    if options.preserve_paragraphs {
        PARA_BREAK
            .split(&flat)
            .map(scrub_paragraph)
            .filter(|paragraph| !paragraph.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        scrub_paragraph(&flat)
    }
}

/// Scrub with default options: a single logical paragraph.
#[must_use]
pub fn scrub_inline(raw: &str) -> String {
    scrub_field(raw, &ScrubOptions::default())
}

fn scrub_paragraph(text: &str) -> String {
    let text = NEWLINE_RUN.replace_all(text, " ");
    let text = WS_RUN.replace_all(&text, " ");
    let text = DOT_RUN.replace_all(&text, ".");
    let text = space_punctuation(&text);
    let text = WS_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// Normalize spacing around `, ; : .` with chapter:verse colons excepted.
fn space_punctuation(text: &str) -> String {
    PUNCT_SPACING
        .replace_all(text, |caps: &Captures| {
            let punct = &caps[1];
            if punct == ":" {
                let whole = caps.get(0).unwrap();
                let before = text[..whole.start()].chars().next_back();
                let after = text[whole.end()..].chars().next();
                if before.is_some_and(|c| c.is_ascii_digit())
                    && after.is_some_and(|c| c.is_ascii_digit())
                {
                    return ":".to_string();
                }
            }
            format!("{punct} ")
        })
        .into_owned()
}
