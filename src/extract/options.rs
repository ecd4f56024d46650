//! Extraction options and configuration.

use crate::model::{Block, BlockType};

/// Options controlling block-graph extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Resolve TABLE/CELL blocks into tables
    pub tables: bool,

    /// Drop WORD and LINE blocks recognized below this confidence
    pub min_confidence: Option<f64>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table extraction.
    pub fn with_tables(mut self, tables: bool) -> Self {
        self.tables = tables;
        self
    }

    /// Set the minimum word/line confidence.
    pub fn with_min_confidence(mut self, confidence: f64) -> Self {
        self.min_confidence = Some(confidence);
        self
    }

    /// Check if a text-bearing block passes the confidence filter.
    ///
    /// Blocks without a confidence, and non-text blocks, always pass.
    pub fn accepts(&self, block: &Block) -> bool {
        let is_text = matches!(block.block_type, BlockType::Word | BlockType::Line);
        match (self.min_confidence, block.confidence) {
            (Some(min), Some(confidence)) if is_text => confidence >= min,
            _ => true,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            tables: true,
            min_confidence: None,
        }
    }
}
