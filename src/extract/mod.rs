//! Block-graph extraction.
//!
//! Turns a flat OCR block collection into full text, form fields, tables,
//! a page count and a confidence score. Traversal never goes deeper than one
//! CHILD hop (or VALUE then CHILD for field values), and references to ids
//! that are not in the collection are skipped rather than reported.
//!
//! # Example
//!
//! ```
//! use unocr::extract::Extractor;
//! use unocr::model::Block;
//!
//! let blocks = vec![Block::line("l1", "Hello"), Block::line("l2", "World")];
//! let result = Extractor::new().extract(&blocks);
//! assert_eq!(result.full_text, "Hello World");
//! ```

mod fields;
mod options;
mod result;
mod stats;
mod tables;
mod text;

pub use options::ExtractOptions;
pub use result::ExtractionResult;
pub use stats::{average_confidence, page_count};
pub use tables::MAX_TABLE_INDEX;

pub(crate) use stats::round2;

use crate::model::{Block, BlockGraph, KeyValuePairs, Table};

/// Runs extraction over block collections with fixed options.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Run every extraction step over `blocks`.
    pub fn extract(&self, blocks: &[Block]) -> ExtractionResult {
        let graph = BlockGraph::new(blocks);

        let result = ExtractionResult {
            full_text: text::line_text(&graph, &self.options),
            key_value_pairs: fields::resolve_pairs(&graph, &self.options),
            tables: if self.options.tables {
                tables::resolve_tables(&graph, &self.options)
            } else {
                Vec::new()
            },
            page_count: page_count(blocks),
            extraction_confidence: average_confidence(blocks),
            error: None,
        };

        log::debug!(
            "extracted {} blocks: {} pages, {} fields, {} tables",
            blocks.len(),
            result.page_count,
            result.key_value_pairs.len(),
            result.tables.len()
        );

        result
    }

    /// Join LINE text in collection order.
    pub fn full_text(&self, blocks: &[Block]) -> String {
        text::line_text(&BlockGraph::new(blocks), &self.options)
    }

    /// Resolve form fields.
    pub fn key_value_pairs(&self, blocks: &[Block]) -> KeyValuePairs {
        fields::resolve_pairs(&BlockGraph::new(blocks), &self.options)
    }

    /// Resolve tables.
    pub fn tables(&self, blocks: &[Block]) -> Vec<Table> {
        tables::resolve_tables(&BlockGraph::new(blocks), &self.options)
    }
}

/// Join the text of every LINE block with single spaces, in collection order.
pub fn full_text(blocks: &[Block]) -> String {
    Extractor::new().full_text(blocks)
}

/// Resolve KEY blocks into a key text → value text map.
pub fn key_value_pairs(blocks: &[Block]) -> KeyValuePairs {
    Extractor::new().key_value_pairs(blocks)
}

/// Resolve TABLE blocks into tables.
pub fn tables(blocks: &[Block]) -> Vec<Table> {
    Extractor::new().tables(blocks)
}
