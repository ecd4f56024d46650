//! Extraction result.

use crate::model::{KeyValuePairs, Table};
use serde::{Deserialize, Serialize};

/// Everything derived from one document's block collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// LINE text joined with single spaces
    pub full_text: String,

    /// Resolved form fields
    pub key_value_pairs: KeyValuePairs,

    /// Resolved tables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,

    /// Distinct page count
    pub page_count: u32,

    /// Mean block confidence, rounded to 2 decimals
    pub extraction_confidence: f64,

    /// Set when the OCR stage failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// An empty result recording why extraction failed.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Check if this result records a failure.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Approximate word count of the full text.
    pub fn word_count(&self) -> usize {
        self.full_text.split_whitespace().count()
    }
}
