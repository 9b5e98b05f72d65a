//! Parsing profiles: a serializable bundle of heading patterns, terminators,
//! and inference rules covering one message-format era

use crate::error::Result;
use crate::heading::{
    case_insensitive, line_heading_pattern, HeadingRules, PRAYER_KEYWORDS, REFLECTION_KEYWORDS,
    VERSE_KEYWORDS,
};
use crate::locate::{
    PrayerCues, DEFAULT_AMEN_PATTERN, DEFAULT_OPENER_PATTERN, DEFAULT_SIGNATURE_PATTERN,
};
use crate::scrub::ScrubOptions;
use crate::slice::DEFAULT_TERMINATOR_PATTERNS;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Prayer-inference configuration carried by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRules {
    /// Whether batch parsing may fall back to inference when no explicit
    /// prayer heading matches
    pub allow_prayer_inference: bool,

    /// Prayer-opener pattern
    pub openers: String,

    /// Author sign-off pattern, matched against a full emphasis-trimmed line
    pub signatures: String,

    /// Trailing-Amen pattern
    pub amen: String,
}

impl Default for InferenceRules {
    fn default() -> Self {
        Self {
            allow_prayer_inference: true,
            openers: DEFAULT_OPENER_PATTERN.to_string(),
            signatures: DEFAULT_SIGNATURE_PATTERN.to_string(),
            amen: DEFAULT_AMEN_PATTERN.to_string(),
        }
    }
}

/// A named, reusable parsing profile.
///
/// Immutable once generated; regenerating a profile overwrites it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingProfile {
    pub name: String,
    pub verse_pattern: String,
    pub reflection_pattern: String,
    pub prayer_pattern: String,

    /// Phrases capping an open-ended span
    pub terminators: Vec<String>,

    pub inference: InferenceRules,

    /// Keep paragraph breaks in scrubbed fields
    #[serde(default)]
    pub preserve_paragraphs: bool,
}

impl ParsingProfile {
    /// A profile carrying the built-in heading patterns, terminators, and
    /// inference rules. A usable baseline for a batch run before any
    /// discovery has been done.
    #[must_use]
    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            verse_pattern: line_heading_pattern(VERSE_KEYWORDS),
            reflection_pattern: line_heading_pattern(REFLECTION_KEYWORDS),
            prayer_pattern: line_heading_pattern(PRAYER_KEYWORDS),
            terminators: DEFAULT_TERMINATOR_PATTERNS
                .iter()
                .map(|pattern| (*pattern).to_string())
                .collect(),
            inference: InferenceRules::default(),
            preserve_paragraphs: false,
        }
    }

    /// Compile the profile's patterns for use by the segmentation pipeline.
    ///
    /// Fails only on malformed patterns, which is a configuration error,
    /// never a data error.
    pub fn compile(&self) -> Result<CompiledProfile> {
        let rules = HeadingRules::from_patterns(
            &self.verse_pattern,
            &self.reflection_pattern,
            &self.prayer_pattern,
        )?;
        let terminators = self
            .terminators
            .iter()
            .map(|pattern| case_insensitive(pattern))
            .collect::<Result<Vec<_>>>()?;
        let cues = if self.inference.allow_prayer_inference {
            Some(PrayerCues::from_patterns(
                &self.inference.openers,
                &self.inference.signatures,
                &self.inference.amen,
            )?)
        } else {
            None
        };
        Ok(CompiledProfile {
            name: self.name.clone(),
            rules,
            terminators,
            cues,
            scrub: ScrubOptions {
                preserve_paragraphs: self.preserve_paragraphs,
            },
        })
    }

    /// Load a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Save the profile as pretty-printed JSON, overwriting any previous
    /// generation.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// A profile with every pattern compiled, ready to segment messages.
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    name: String,
    rules: HeadingRules,
    terminators: Vec<Regex>,
    cues: Option<PrayerCues>,
    scrub: ScrubOptions,
}

impl CompiledProfile {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn rules(&self) -> &HeadingRules {
        &self.rules
    }

    #[must_use]
    pub const fn cues(&self) -> Option<&PrayerCues> {
        self.cues.as_ref()
    }

    #[must_use]
    pub fn terminators(&self) -> &[Regex] {
        &self.terminators
    }

    #[must_use]
    pub const fn scrub_options(&self) -> &ScrubOptions {
        &self.scrub
    }
}
