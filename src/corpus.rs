//! Profile discovery: cluster a directory of saved sample messages by their
//! heading signatures and derive a reusable parsing profile

use crate::error::{ParseError, Result};
use crate::normalize::normalize_plain;
use crate::parser::parse_message_with;
use crate::profile::{InferenceRules, ParsingProfile};
use crate::slice::DEFAULT_TERMINATOR_PATTERNS;
use crate::types::{DevotionalRecord, HeadingRole, RawMessage};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Separator line used by the saved-export corpus format.
const EXPORT_SEPARATOR: &str =
    "===================================================================";

static BODY_MARKER: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    let sep = regex::escape(EXPORT_SEPARATOR);
    Regex::new(&format!(
        r"(?m)^{sep}\s*Body \(clean, unformatted\):\s*{sep}\s*"
    ))
    .unwrap()
});

static VERSE_WORD: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:verse|verses|scripture|text|reading|meditation)\b").unwrap()
});

static REFLECTION_WORD: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:thought|thoughts|reflection|reflections|devotional|lesson|lessons|meditation)\b")
        .unwrap()
});

static PRAYER_WORD: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\b(?:prayer|prayers)\b").unwrap());

static TODAY_WORDS: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\b(?:for\s+today|today'?s?)\b").unwrap());

static SIGNATURE_TOKEN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[a-z]+").unwrap());

/// Tokens admissible into a derived verse pattern.
const VERSE_TOKEN_WHITELIST: &[&str] =
    &["verse", "verses", "scripture", "text", "reading", "meditation"];

/// Tokens admissible into a derived reflection pattern.
const REFLECTION_TOKEN_WHITELIST: &[&str] = &[
    "thought",
    "thoughts",
    "reflection",
    "reflections",
    "devotional",
    "lesson",
    "lessons",
    "meditation",
];

/// Tokens admissible into a derived prayer pattern. "pastor" admits
/// signature-style prayer starts observed in some eras.
const PRAYER_TOKEN_WHITELIST: &[&str] = &["prayer", "prayers", "suggestion", "pastor"];

/// One sample message loaded from a saved export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSample {
    pub message_id: String,
    pub subject: String,
    pub date: String,
    pub body: String,
}

/// The normalized heading-text triple used as a clustering key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HeadingSignature {
    pub verse: String,
    pub reflection: String,
    pub prayer: String,
}

/// A ranked cluster of samples sharing one heading signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterReport {
    pub signature: HeadingSignature,
    pub count: usize,
    pub sample_message_ids: Vec<String>,
}

/// Knobs for a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Name written into the generated profile
    pub profile_name: String,

    /// How many clusters to report
    pub top_n: usize,

    /// How many sample message ids to keep per reported cluster
    pub sample_ids: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            profile_name: "auto_profile".to_string(),
            top_n: 5,
            sample_ids: 10,
        }
    }
}

/// The result of a discovery run over a corpus.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Clusters ranked by member count descending
    pub clusters: Vec<ClusterReport>,

    /// Profile derived from the top-ranked cluster; `None` when no sample
    /// produced a complete heading triple
    pub profile: Option<ParsingProfile>,

    /// Samples with a complete verse < reflection < prayer triple
    pub complete: usize,

    /// Samples examined
    pub total: usize,
}

/// The result of applying one profile across a corpus.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<DevotionalRecord>,

    /// Messages whose record came back fully identified
    pub matched: usize,

    pub total: usize,

    /// Ids of the identified messages, in corpus order, so a caller can
    /// mark them handled
    pub matched_ids: Vec<String>,
}

/// Load every `.txt` sample in a directory, sorted by file name.
///
/// Files use the saved-export format: labeled header lines, a separator, a
/// `Body (clean, unformatted):` marker, another separator, then the body.
/// A file without separators is treated as body-only.
pub fn load_corpus(dir: &Path) -> Result<Vec<CorpusSample>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut samples = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        let fallback_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        samples.push(parse_export(&text, &fallback_id));
    }

    debug!("loaded {} corpus samples from {}", samples.len(), dir.display());
    Ok(samples)
}

/// Discover clusters and derive a profile from an in-memory corpus.
///
/// Only explicit heading triples participate; prayer inference is a
/// parse-time concern and plays no part in clustering. Running discovery
/// twice over an unchanged corpus produces identical output.
pub fn discover_profile(
    samples: &[CorpusSample],
    options: &DiscoveryOptions,
) -> Result<DiscoveryOutcome> {
    if options.top_n == 0 {
        return Err(ParseError::Config("top_n must be at least 1".to_string()));
    }
    if options.profile_name.trim().is_empty() {
        return Err(ParseError::Config("profile name must not be empty".to_string()));
    }

    let mut clusters: BTreeMap<HeadingSignature, Vec<&CorpusSample>> = BTreeMap::new();
    let mut complete = 0;

    for sample in samples {
        let body = normalize_plain(&sample.body);
        let lines: Vec<&str> = body.lines().collect();
        if let Some((verse, reflection, prayer)) = explicit_triple(&lines) {
            complete += 1;
            let signature = HeadingSignature {
                verse: normalized_heading(lines[verse]),
                reflection: normalized_heading(lines[reflection]),
                prayer: normalized_heading(lines[prayer]),
            };
            clusters.entry(signature).or_default().push(sample);
        }
    }

    let mut ranked: Vec<(&HeadingSignature, &Vec<&CorpusSample>)> = clusters.iter().collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    let reports = ranked
        .iter()
        .take(options.top_n)
        .map(|(signature, members)| ClusterReport {
            signature: (*signature).clone(),
            count: members.len(),
            sample_message_ids: members
                .iter()
                .take(options.sample_ids)
                .map(|member| member.message_id.clone())
                .collect(),
        })
        .collect();

    let profile = ranked
        .first()
        .map(|(signature, _)| derive_profile(signature, &options.profile_name));

    debug!(
        "discovery: {} samples, {complete} complete triples, {} clusters",
        samples.len(),
        clusters.len()
    );

    Ok(DiscoveryOutcome {
        clusters: reports,
        profile,
        complete,
        total: samples.len(),
    })
}

/// Load a directory and discover a profile in one step.
pub fn profile_from_directory(dir: &Path, options: &DiscoveryOptions) -> Result<DiscoveryOutcome> {
    discover_profile(&load_corpus(dir)?, options)
}

/// Apply one profile across a corpus, counting how many messages it fully
/// identifies so an operator can judge whether the profile generalizes.
pub fn batch_parse(profile: &ParsingProfile, samples: &[CorpusSample]) -> Result<BatchOutcome> {
    let compiled = profile.compile()?;
    let mut records = Vec::with_capacity(samples.len());
    let mut matched_ids = Vec::new();

    for sample in samples {
        let msg = RawMessage {
            message_id: sample.message_id.clone(),
            subject: sample.subject.clone(),
            date: sample.date.clone(),
            body_html: None,
            body_plain: Some(sample.body.clone()),
        };
        let record = parse_message_with(&compiled, &msg);
        if record.identified {
            matched_ids.push(record.message_id.clone());
        }
        records.push(record);
    }

    debug!(
        "batch: {}/{} matched under profile {}",
        matched_ids.len(),
        samples.len(),
        profile.name
    );

    Ok(BatchOutcome {
        records,
        matched: matched_ids.len(),
        total: samples.len(),
        matched_ids,
    })
}

fn parse_export(text: &str, fallback_id: &str) -> CorpusSample {
    let mut message_id = String::new();
    let mut subject = String::new();
    let mut date = String::new();

    for line in text.lines() {
        if let Some(value) = line.strip_prefix("message_id: ") {
            message_id = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("subject   : ") {
            subject = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("date      : ") {
            date = value.trim().to_string();
        }
        if line.trim() == EXPORT_SEPARATOR {
            break;
        }
    }

    if message_id.is_empty() {
        message_id = fallback_id.to_string();
    }

    CorpusSample {
        message_id,
        subject,
        date,
        body: extract_export_body(text),
    }
}

fn extract_export_body(text: &str) -> String {
    if let Some(found) = BODY_MARKER.find(text) {
        return text[found.end()..].trim().to_string();
    }
    let parts: Vec<&str> = text.split(EXPORT_SEPARATOR).collect();
    if parts.len() >= 3 {
        return parts[2..].join(EXPORT_SEPARATOR).trim().to_string();
    }
    text.trim().to_string()
}

/// First verse, first later reflection, first later prayer, using
/// explicit headings only.
fn explicit_triple(lines: &[&str]) -> Option<(usize, usize, usize)> {
    let candidates = heading_candidates(lines);
    let verse = candidates
        .iter()
        .find(|(_, text)| classify_heading_text(text) == Some(HeadingRole::Verse))?
        .0;
    let reflection = candidates
        .iter()
        .find(|(index, text)| {
            *index > verse && classify_heading_text(text) == Some(HeadingRole::Reflection)
        })?
        .0;
    let prayer = candidates
        .iter()
        .find(|(index, text)| {
            *index > reflection && classify_heading_text(text) == Some(HeadingRole::Prayer)
        })?
        .0;
    Some((verse, reflection, prayer))
}

/// Heading-ish lines: after trimming emphasis, the line ends in a colon and
/// the text before it is non-trivial.
fn heading_candidates(lines: &[&str]) -> Vec<(usize, String)> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim().trim_matches(|c| c == '*' || c == '_').trim();
            let text = trimmed.strip_suffix(':')?.trim();
            let len = text.chars().count();
            ((2..=200).contains(&len)).then(|| (index, text.to_string()))
        })
        .collect()
}

/// Classify a candidate heading by keyword word-search, verse taking
/// priority over reflection, reflection over prayer.
fn classify_heading_text(text: &str) -> Option<HeadingRole> {
    if VERSE_WORD.is_match(text) {
        Some(HeadingRole::Verse)
    } else if REFLECTION_WORD.is_match(text) {
        Some(HeadingRole::Reflection)
    } else if PRAYER_WORD.is_match(text) {
        Some(HeadingRole::Prayer)
    } else {
        None
    }
}

/// Strip possessive/"for today" wrapping, collapse whitespace, lowercase.
fn normalized_heading(line: &str) -> String {
    let text = line
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .trim_end_matches(':')
        .trim();
    let text = TODAY_WORDS.replace_all(text, " ");
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn derive_profile(signature: &HeadingSignature, name: &str) -> ParsingProfile {
    ParsingProfile {
        name: name.to_string(),
        verse_pattern: profile_pattern(&role_tokens(&signature.verse, VERSE_TOKEN_WHITELIST)),
        reflection_pattern: profile_pattern(&role_tokens(
            &signature.reflection,
            REFLECTION_TOKEN_WHITELIST,
        )),
        prayer_pattern: profile_pattern(&role_tokens(&signature.prayer, PRAYER_TOKEN_WHITELIST)),
        terminators: DEFAULT_TERMINATOR_PATTERNS
            .iter()
            .map(|pattern| (*pattern).to_string())
            .collect(),
        inference: InferenceRules::default(),
        preserve_paragraphs: false,
    }
}

/// Keyword tokens actually observed in a role's heading text, filtered
/// against the role whitelist; the full whitelist when nothing survives.
fn role_tokens(text: &str, whitelist: &[&str]) -> Vec<String> {
    let observed: BTreeSet<String> = SIGNATURE_TOKEN
        .find_iter(&text.to_lowercase())
        .map(|token| token.as_str().to_string())
        .filter(|token| token.len() >= 3 && whitelist.contains(&token.as_str()))
        .collect();
    if observed.is_empty() {
        whitelist.iter().map(|token| (*token).to_string()).collect()
    } else {
        observed.into_iter().collect()
    }
}

/// A derived heading pattern: any of the observed tokens with the shared
/// possessive and "for Today" wrapping, colon required, inline capture.
fn profile_pattern(tokens: &[String]) -> String {
    let alternation = tokens.join("|");
    format!(
        r"^\s*(?:Today['’`´]?s?\s+|Our\s+)?(?:{alternation})(?:\s+for\s+Today)?\s*:\s*(?P<inline>.*)$"
    )
}
