//! # unocr
//!
//! Structured extraction from OCR block graphs.
//!
//! OCR services that analyze forms and tables return a flat list of blocks
//! (pages, lines, words, key-value sets, tables, cells) that reference each
//! other by id. This library turns such a list into the document's full text,
//! a key-value map of form fields, its tables, a page count and an average
//! confidence, and can combine that with an external text-analysis service
//! into one output record per document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unocr::{extract_file, render};
//!
//! fn main() -> unocr::Result<()> {
//!     // A saved OCR response ({"Blocks": [...]})
//!     let result = extract_file("invoice.json")?;
//!
//!     for (key, value) in result.key_value_pairs.iter() {
//!         println!("{}: {}", key, value);
//!     }
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Form fields**: KEY blocks resolved to key text → value text
//! - **Tables**: TABLE/CELL blocks rebuilt into row/column grids
//! - **Lenient traversal**: dangling block references are skipped
//! - **Pipeline**: OCR → extraction → text analysis → stored JSON record
//! - **Parallel batches**: Uses Rayon for many documents

pub mod analysis;
pub mod error;
pub mod extract;
pub mod model;
pub mod ocr;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use analysis::{AnalysisOptions, TextAnalysis, TextAnalyzer};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, ExtractionResult, Extractor};
pub use model::{Block, BlockGraph, BlockType, KeyValuePairs, Table};
pub use ocr::OcrProvider;
pub use pipeline::{DocumentProcessor, OutputRecord, PipelineOptions, StageOutcome, Status};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract from a saved OCR response file.
///
/// # Arguments
///
/// * `path` - Path to a JSON OCR response
///
/// # Example
///
/// ```no_run
/// use unocr::extract_file;
///
/// let result = extract_file("response.json").unwrap();
/// println!("Pages: {}", result.page_count);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract from a saved OCR response file with custom options.
///
/// # Example
///
/// ```no_run
/// use unocr::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new()
///     .with_tables(false)
///     .with_min_confidence(60.0);
/// let result = extract_file_with_options("response.json", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    let blocks = ocr::parse_response_file(path)?;
    Ok(Extractor::with_options(options).extract(&blocks))
}

/// Extract from an OCR response held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractionResult> {
    extract_bytes_with_options(data, ExtractOptions::default())
}

/// Extract from an OCR response held in memory with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<ExtractionResult> {
    let blocks = ocr::parse_response(data)?;
    Ok(Extractor::with_options(options).extract(&blocks))
}

/// Extract from an OCR response read from a reader.
///
/// # Example
///
/// ```no_run
/// use unocr::extract_reader;
///
/// let result = extract_reader(std::io::stdin()).unwrap();
/// println!("{}", result.full_text);
/// ```
pub fn extract_reader<R: Read>(mut reader: R) -> Result<ExtractionResult> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    extract_bytes(&data)
}

/// Extract from blocks already in memory.
///
/// # Example
///
/// ```
/// use unocr::{extract_blocks, Block};
///
/// let blocks = vec![
///     Block::key("k1").with_children(["w1"]).with_values(["v1"]),
///     Block::value("v1").with_children(["w2"]),
///     Block::word("w1", "Total"),
///     Block::word("w2", "$12.00"),
/// ];
/// let result = extract_blocks(&blocks);
/// assert_eq!(result.key_value_pairs.get("Total"), Some("$12.00"));
/// ```
pub fn extract_blocks(blocks: &[Block]) -> ExtractionResult {
    Extractor::new().extract(blocks)
}

/// Builder for extracting and rendering OCR responses.
///
/// # Example
///
/// ```no_run
/// use unocr::Unocr;
///
/// let json = Unocr::new()
///     .without_tables()
///     .with_min_confidence(50.0)
///     .extract_file("response.json")?
///     .to_json(unocr::JsonFormat::Compact)?;
/// # Ok::<(), unocr::Error>(())
/// ```
pub struct Unocr {
    options: ExtractOptions,
}

impl Unocr {
    /// Create a new Unocr builder.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Skip table reconstruction.
    pub fn without_tables(mut self) -> Self {
        self.options = self.options.with_tables(false);
        self
    }

    /// Drop words and lines recognized below `confidence`.
    pub fn with_min_confidence(mut self, confidence: f64) -> Self {
        self.options = self.options.with_min_confidence(confidence);
        self
    }

    /// Extract from a saved OCR response file.
    pub fn extract_file<P: AsRef<Path>>(self, path: P) -> Result<UnocrResult> {
        let result = extract_file_with_options(path, self.options)?;
        Ok(UnocrResult { result })
    }

    /// Extract from an OCR response in memory.
    pub fn extract_bytes(self, data: &[u8]) -> Result<UnocrResult> {
        let result = extract_bytes_with_options(data, self.options)?;
        Ok(UnocrResult { result })
    }
}

impl Default for Unocr {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting an OCR response.
pub struct UnocrResult {
    result: ExtractionResult,
}

impl UnocrResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.result, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.result)
    }

    /// Get the extraction result.
    pub fn result(&self) -> &ExtractionResult {
        &self.result
    }

    /// Take the extraction result.
    pub fn into_result(self) -> ExtractionResult {
        self.result
    }
}
