//! Body normalization: Unicode folding, HTML flattening, whitespace repair

use crate::types::RawMessage;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Tags that force a line boundary when flattening HTML
const BLOCK_NAMES: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "noscript",
    "ol",
    "output",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "tfoot",
    "thead",
    "ul",
];

static SPACE_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static NEWLINE_PAD: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r" *\n *").unwrap());

// A bare hyphen followed by a line break is a soft-wrapped word
static HYPHEN_WRAP: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"-\n+").unwrap());

static BLANK_RUN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

// An emphasis run opened on one line and closed at the start of the next
static BOLD_WRAP: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\*\*(\S[^*\n]*)\n\*\*").unwrap());

static ITALIC_WRAP: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"_(\S[^_\n]*)\n_").unwrap());

// A closing marker jammed against the following word
static BOLD_JAM: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\*\*(\S+)\*\*(\S)").unwrap());

static ITALIC_JAM: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"_(\S+)_(\S)").unwrap());

/// Normalize the message body, preferring the HTML part when both are present.
///
/// Returns `None` when the message carries no body or the body is empty after
/// normalization.
#[must_use]
pub fn normalize_body(msg: &RawMessage) -> Option<String> {
    let body = msg
        .body_html
        .as_deref()
        .map(normalize_html)
        .or_else(|| msg.body_plain.as_deref().map(normalize_plain))?;
    (!body.is_empty()).then_some(body)
}

/// Normalize a plain-text body into its canonical line-structured form.
///
/// The result is a fixed point: normalizing it again returns it unchanged.
#[must_use]
pub fn normalize_plain(text: &str) -> String {
    cleanup(&fold_unicode(text))
}

/// Flatten an HTML body to markdown-ish plain text and normalize it.
///
/// Bold/strong content is wrapped in `**`, italic/em in `_`, block elements
/// become line boundaries, and table cells on one row are joined by a space.
#[must_use]
pub fn normalize_html(html: &str) -> String {
    cleanup(&fold_unicode(&decode_entities(&flatten_html(html))))
}

/// NFKC-normalize and fold apostrophe/space variants; delete zero-width and
/// soft-hyphen characters.
fn fold_unicode(s: &str) -> String {
    let composed: String = s.nfkc().collect();
    let mut out = String::with_capacity(composed.len());
    for ch in composed.chars() {
        match ch {
            '\u{2019}' | '\u{2018}' | '`' | '\u{00B4}' => out.push('\''),
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => out.push(' '),
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00AD}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Whitespace and emphasis repair shared by both body kinds.
fn cleanup(s: &str) -> String {
    let s = s.replace("\r\n", "\n").replace('\r', "\n");
    let s = SPACE_RUN.replace_all(&s, " ");
    let s = NEWLINE_PAD.replace_all(&s, "\n");
    let s = HYPHEN_WRAP.replace_all(&s, "");
    let s = BOLD_WRAP.replace_all(&s, "**${1}** ");
    let s = ITALIC_WRAP.replace_all(&s, "_${1}_ ");
    let s = drop_marker_lines(&s);
    let s = BLANK_RUN.replace_all(&s, "\n\n");
    let s = BOLD_JAM.replace_all(&s, "**${1}** ${2}");
    let s = ITALIC_JAM.replace_all(&s, "_${1}_ ${2}");
    let s = SPACE_RUN.replace_all(&s, " ");
    let s = NEWLINE_PAD.replace_all(&s, "\n");
    s.trim().to_string()
}

/// Drop lines left holding nothing but emphasis markers.
fn drop_marker_lines(s: &str) -> String {
    s.lines()
        .filter(|line| !matches!(line.trim(), "**" | "****" | "_" | "__"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&rsquo;", "'")
        .replace("&lsquo;", "'")
        .replace("&ldquo;", "\u{201C}")
        .replace("&rdquo;", "\u{201D}")
        .replace("&ndash;", "\u{2013}")
        .replace("&mdash;", "\u{2014}")
        .replace("&hellip;", "\u{2026}")
        .replace("&amp;", "&")
}

/// Flatten HTML markup, keeping emphasis as `**`/`_` markers and block
/// structure as newlines. Script and style content is discarded.
fn flatten_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    // Set while inside script/style, holding the tag that ends the skip
    let mut skip: Option<&'static str> = None;

    loop {
        let Some(lt) = rest.find('<') else {
            if skip.is_none() {
                out.push_str(rest);
            }
            break;
        };
        if skip.is_none() {
            out.push_str(&rest[..lt]);
        }
        let after = &rest[lt + 1..];
        let Some(gt) = after.find('>') else {
            if skip.is_none() {
                out.push_str(&rest[lt..]);
            }
            break;
        };
        let tag = after[..gt].trim();
        rest = &after[gt + 1..];

        let closing = tag.starts_with('/');
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();

        if let Some(want) = skip {
            if closing && name == want {
                skip = None;
            }
            continue;
        }

        match name.as_str() {
            "script" if !closing => skip = Some("script"),
            "style" if !closing => skip = Some("style"),
            "br" => out.push('\n'),
            "b" | "strong" => out.push_str("**"),
            "i" | "em" => out.push('_'),
            "td" | "th" => {
                if closing {
                    out.push(' ');
                }
            }
            "tr" => {
                if closing {
                    while out.ends_with(' ') {
                        out.pop();
                    }
                }
                ensure_newline(&mut out);
            }
            _ if BLOCK_NAMES.contains(&name.as_str()) => ensure_newline(&mut out),
            _ => {}
        }
    }

    out
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
