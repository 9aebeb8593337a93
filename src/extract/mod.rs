//! # Field Extraction Module
//!
//! Turns the CTGP Deluxe download page into a small set of named fields.
//! This is the first stage of every update cycle and has no I/O of its own.
//!
//! ## Key Components
//!
//! - `normalize_html`: strips markup and collapses whitespace into one line
//! - `Extractor`: runs an ordered list of [`Rule`]s over the normalized text
//! - `ExtractionResult`: the fields that matched, keyed by [`Field`]
//!
//! ## Usage
//!
//! ```rust
//! use ctgpdx::extract::{extract_page, Field};
//!
//! let html = "<p>Version: 1. 1.1</p><p>Download size : 3.86 GB</p>";
//! let result = extract_page(html).unwrap();
//! assert_eq!(result.get(Field::Version), Some("1.1.1"));
//! assert_eq!(result.get(Field::DownloadSize), Some("3.86 GB"));
//! ```

mod error;
mod normalize;
pub mod rules;

pub use error::ExtractError;
pub use normalize::{collapse_whitespace, normalize_html};
pub use rules::{DEFAULT_RULES, Rule};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{instrument, trace};

/// A value the extractor knows how to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Version,
    DownloadSize,
    UnpackedSize,
    ReleaseDate,
}

impl Field {
    /// Every field, in report order
    pub const ALL: [Field; 4] = [
        Field::Version,
        Field::DownloadSize,
        Field::UnpackedSize,
        Field::ReleaseDate,
    ];

    /// Key used when the result is published
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::DownloadSize => "download_size",
            Field::UnpackedSize => "unpacked_size",
            Field::ReleaseDate => "release_date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields found on the page
///
/// Values are the text exactly as matched (versions have their stray spaces
/// removed); nothing is parsed as a number or a date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    fields: BTreeMap<Field, String>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, field: Field, value: String) -> Option<String> {
        self.fields.insert(field, value)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(Field::Version)
    }

    pub fn download_size(&self) -> Option<&str> {
        self.get(Field::DownloadSize)
    }

    pub fn unpacked_size(&self) -> Option<&str> {
        self.get(Field::UnpackedSize)
    }

    pub fn release_date(&self) -> Option<&str> {
        self.get(Field::ReleaseDate)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the present fields in [`Field::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

/// Runs extraction rules in priority order
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<Rule>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl Extractor {
    /// Create an extractor with the built-in rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom rule list
    ///
    /// Rules are tried in the given order; the first rule to produce a value
    /// for a field wins.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Extract fields from normalized page text
    ///
    /// # Arguments
    ///
    /// * `text` - Output of [`normalize_html`]
    ///
    /// # Returns
    ///
    /// The fields found, or [`ExtractError::NoFields`] when nothing matched.
    /// A result missing some fields is still a success.
    #[instrument(skip_all, level = "debug")]
    pub fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractError> {
        let mut result = ExtractionResult::new();

        for rule in &self.rules {
            if result.contains(rule.field()) {
                continue;
            }
            if let Some(value) = rule.apply(text, &result) {
                trace!(rule = rule.name(), field = %rule.field(), value = %value, "Rule matched");
                result.insert(rule.field(), value);
            }
        }

        if result.is_empty() {
            return Err(ExtractError::NoFields);
        }

        Ok(result)
    }
}

/// Extract fields from normalized text with the built-in rules
pub fn extract_fields(text: &str) -> Result<ExtractionResult, ExtractError> {
    Extractor::default().extract(text)
}

/// Normalize an HTML document and extract its fields
pub fn extract_page(html: &str) -> Result<ExtractionResult, ExtractError> {
    extract_fields(&normalize_html(html))
}
