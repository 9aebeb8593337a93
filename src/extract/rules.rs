//! # Extraction Rules
//!
//! Each rule is a named pattern that fills exactly one [`Field`]. Rules run
//! in the order of [`DEFAULT_RULES`]; a rule whose field is already filled is
//! skipped, so earlier rules take priority and fallbacks can be appended
//! without disturbing them.
//!
//! The download page has no stable structure, so the patterns are tolerant
//! of stray spaces inside numbers ("1. 1.1"), split keywords ("s ize"),
//! mixed casing and missing fields.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::{ExtractionResult, Field};

/// Matcher signature: page text plus the fields found so far
pub type Matcher = fn(&str, &ExtractionResult) -> Option<String>;

/// A named pattern that produces one field
#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    field: Field,
    matcher: Matcher,
}

impl Rule {
    /// Create a rule
    pub const fn new(name: &'static str, field: Field, matcher: Matcher) -> Self {
        Self {
            name,
            field,
            matcher,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Run the rule against normalized text
    pub fn apply(&self, text: &str, found: &ExtractionResult) -> Option<String> {
        (self.matcher)(text, found)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("field", &self.field)
            .finish()
    }
}

/// Built-in rules in priority order
pub static DEFAULT_RULES: [Rule; 7] = [
    Rule::new("version_marker", Field::Version, version_marker),
    Rule::new("version_in_title", Field::Version, version_in_title),
    Rule::new("version_bare_v", Field::Version, version_bare_v),
    Rule::new("download_size", Field::DownloadSize, download_size),
    Rule::new("unpacked_size", Field::UnpackedSize, unpacked_size),
    Rule::new("version_release_date", Field::ReleaseDate, version_release_date),
    Rule::new("generic_release_date", Field::ReleaseDate, generic_release_date),
];

// "Version:" then the number, ending at the next capitalized word or the end.
static VERSION_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:Version:)\s*([\d\.a-z\s]+?)(?:\s+(?:[A-Z]|Download|Unpacked)|$)")
        .expect("version marker pattern is valid")
});

static VERSION_IN_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:CTGP Deluxe \()([\d\.a-z\s]+?)\)").expect("title pattern is valid")
});

static VERSION_BARE_V_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bv([\d\.a-z\s]+?)\b").expect("bare v pattern is valid")
});

static DOWNLOAD_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Download.*?s\s*ize\s*:\s*([\d\.]+\s*[KMGT]?B)")
        .expect("download size pattern is valid")
});

static UNPACKED_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Unpacked.*?s\s*ize\s*:\s*([\d\.]+\s*[KMGT]?B)")
        .expect("unpacked size pattern is valid")
});

static GENERIC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+\s+\d{1,2}(?:st|nd|rd|th)?,\s+20\d{2})")
        .expect("generic date pattern is valid")
});

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Drop the spaces the site injects inside version numbers.
///
/// A match is kept even when nothing is left, so later version rules do not run.
fn clean_version(raw: String) -> String {
    raw.replace(' ', "").trim().to_string()
}

fn version_marker(text: &str, _: &ExtractionResult) -> Option<String> {
    first_capture(&VERSION_MARKER_RE, text).map(clean_version)
}

fn version_in_title(text: &str, _: &ExtractionResult) -> Option<String> {
    first_capture(&VERSION_IN_TITLE_RE, text).map(clean_version)
}

// Last resort; matches any word starting with "v".
fn version_bare_v(text: &str, _: &ExtractionResult) -> Option<String> {
    first_capture(&VERSION_BARE_V_RE, text).map(clean_version)
}

fn download_size(text: &str, _: &ExtractionResult) -> Option<String> {
    first_capture(&DOWNLOAD_SIZE_RE, text)
}

fn unpacked_size(text: &str, _: &ExtractionResult) -> Option<String> {
    first_capture(&UNPACKED_SIZE_RE, text)
}

/// Changelog entry for the detected version, e.g. "v1.1.1 - March 23rd, 2025"
fn version_release_date(text: &str, found: &ExtractionResult) -> Option<String> {
    let version = found.version()?;
    let pattern = format!(
        r"(?i)v?{}\s*-\s*([A-Za-z]+\s+\d+\w*,\s+\d{{4}})",
        regex::escape(version)
    );

    match Regex::new(&pattern) {
        Ok(re) => first_capture(&re, text),
        Err(e) => {
            warn!("Failed to build release date pattern for {}: {}", version, e);
            None
        }
    }
}

fn generic_release_date(text: &str, _: &ExtractionResult) -> Option<String> {
    first_capture(&GENERIC_DATE_RE, text)
}
