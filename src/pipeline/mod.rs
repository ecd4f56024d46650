//! Document processing pipeline.
//!
//! For each document: ask the OCR collaborator for blocks, extract from
//! them, analyze the extracted text, and merge everything into an
//! [`OutputRecord`]. Each stage returns a [`StageOutcome`]; a failed stage
//! contributes its partial value and an error string instead of aborting.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use unocr::analysis::UnavailableAnalyzer;
//! use unocr::model::Block;
//! use unocr::ocr::StaticProvider;
//! use unocr::pipeline::{DocumentProcessor, Status};
//!
//! let ocr = StaticProvider::new(vec![Block::line("l1", "Hello World")]);
//! let processor = DocumentProcessor::new(Arc::new(ocr), Arc::new(UnavailableAnalyzer));
//!
//! let record = processor.process("hello.png");
//! assert_eq!(record.extraction.full_text, "Hello World");
//! assert_eq!(record.status, Status::Partial);
//! ```

mod options;
mod record;
mod stage;
mod store;

pub use options::PipelineOptions;
pub use record::{result_key, OutputRecord};
pub use stage::{StageOutcome, Status};
pub use store::{DirectoryStore, RecordStore};

use crate::analysis::{analyze_text, TextAnalysis, TextAnalyzer};
use crate::error::Result;
use crate::extract::{ExtractionResult, Extractor};
use crate::ocr::OcrProvider;
use chrono::Utc;
use rayon::prelude::*;
use std::sync::Arc;

/// Runs documents through OCR, extraction and text analysis.
#[derive(Clone)]
pub struct DocumentProcessor {
    ocr: Arc<dyn OcrProvider>,
    analyzer: Arc<dyn TextAnalyzer>,
    extractor: Extractor,
    options: PipelineOptions,
}

impl DocumentProcessor {
    /// Create a processor with default options.
    pub fn new(ocr: Arc<dyn OcrProvider>, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self::with_options(ocr, analyzer, PipelineOptions::default())
    }

    /// Create a processor with custom options.
    pub fn with_options(
        ocr: Arc<dyn OcrProvider>,
        analyzer: Arc<dyn TextAnalyzer>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            ocr,
            analyzer,
            extractor: Extractor::with_options(options.extract.clone()),
            options,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// OCR the document and extract from its blocks.
    ///
    /// When OCR fails, extraction runs over no blocks, so the partial result
    /// has empty text and zero counts.
    pub fn extract(&self, document: &str) -> StageOutcome<ExtractionResult> {
        log::info!("extracting {} via {}", document, self.ocr.name());
        let blocks = match self.ocr.analyze(document) {
            Ok(blocks) => StageOutcome::Complete(blocks),
            Err(e) => {
                log::warn!("OCR failed for {}: {}", document, e);
                StageOutcome::failed(Vec::new(), e.to_string())
            }
        };
        blocks.map(|blocks| self.extractor.extract(&blocks))
    }

    /// Analyze extracted text.
    pub fn analyze(&self, text: &str) -> StageOutcome<TextAnalysis> {
        analyze_text(self.analyzer.as_ref(), text, &self.options.analysis)
    }

    /// Process one document into a record. Never fails; stage errors are
    /// recorded on the record.
    pub fn process(&self, document: &str) -> OutputRecord {
        let extraction = self.extract(document);
        let analysis = self.analyze(&extraction.value().full_text);
        let status = Status::from_stages(&extraction, &analysis);

        let (mut extraction, extraction_error) = extraction.into_parts();
        extraction.error = extraction_error;
        let (mut analysis, analysis_error) = analysis.into_parts();
        analysis.error = analysis_error;

        log::info!("processed {}: {}", document, status);

        OutputRecord {
            document_name: document.to_string(),
            processed_at: Utc::now(),
            extraction,
            analysis,
            status,
        }
    }

    /// Process many documents. Output order matches input order.
    pub fn process_batch<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vec<OutputRecord> {
        if self.options.parallel {
            documents
                .par_iter()
                .map(|d| self.process(d.as_ref()))
                .collect()
        } else {
            documents.iter().map(|d| self.process(d.as_ref())).collect()
        }
    }

    /// Process a document and store its record under its result key.
    ///
    /// Returns the record and the key it was stored under.
    pub fn process_and_store(
        &self,
        document: &str,
        store: &dyn RecordStore,
    ) -> Result<(OutputRecord, String)> {
        let record = self.process(document);
        let key = record.result_key();
        store.put(&key, &record)?;
        Ok((record, key))
    }
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor")
            .field("ocr", &self.ocr.name())
            .field("analyzer", &self.analyzer.name())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UnavailableAnalyzer;
    use crate::error::Error;
    use crate::model::Block;
    use crate::ocr::StaticProvider;

    struct DownProvider;

    impl OcrProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        fn analyze(&self, _document: &str) -> Result<Vec<Block>> {
            Err(Error::Ocr("service unavailable".to_string()))
        }
    }

    fn processor(blocks: Vec<Block>) -> DocumentProcessor {
        DocumentProcessor::new(
            Arc::new(StaticProvider::new(blocks)),
            Arc::new(UnavailableAnalyzer),
        )
    }

    #[test]
    fn test_analysis_failure_is_partial() {
        let record = processor(vec![Block::line("l1", "Quarterly report")]).process("r.pdf");

        assert_eq!(record.status, Status::Partial);
        assert!(record.extraction.error.is_none());
        assert!(record.analysis.error.is_some());
    }

    #[test]
    fn test_empty_document_reports_short_text() {
        let record = processor(Vec::new()).process("blank.pdf");
        assert_eq!(
            record.analysis.error.as_deref(),
            Some(crate::analysis::TEXT_TOO_SHORT)
        );
        assert_eq!(record.extraction.page_count, 0);
    }

    #[test]
    fn test_ocr_failure_extracts_nothing() {
        let p = DocumentProcessor::new(Arc::new(DownProvider), Arc::new(UnavailableAnalyzer));
        let outcome = p.extract("scan.pdf");

        assert!(!outcome.is_complete());
        assert_eq!(outcome.error(), Some("OCR error: service unavailable"));
        assert_eq!(outcome.value(), &ExtractionResult::default());
    }

    #[test]
    fn test_batch_order() {
        let p = DocumentProcessor::with_options(
            Arc::new(StaticProvider::new(vec![Block::line("l1", "x")])),
            Arc::new(UnavailableAnalyzer),
            PipelineOptions::new().sequential(),
        );
        let records = p.process_batch(&["a", "b", "c"]);
        let names: Vec<_> = records.iter().map(|r| r.document_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
