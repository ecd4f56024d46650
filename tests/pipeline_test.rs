//! Integration tests for the document pipeline.

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use unocr::analysis::{
    Entity, JsonResponseAnalyzer, KeyPhrase, Sentiment, SentimentScores, TextAnalyzer,
    TEXT_TOO_SHORT,
};
use unocr::error::{Error, Result};
use unocr::model::Block;
use unocr::ocr::{JsonResponseProvider, OcrProvider};
use unocr::pipeline::{
    DirectoryStore, DocumentProcessor, OutputRecord, PipelineOptions, RecordStore, Status,
};

/// OCR mock serving fixed blocks per document; unknown documents time out.
struct MockOcr {
    documents: HashMap<String, Vec<Block>>,
}

impl MockOcr {
    fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    fn with_document(mut self, name: &str, blocks: Vec<Block>) -> Self {
        self.documents.insert(name.to_string(), blocks);
        self
    }
}

impl OcrProvider for MockOcr {
    fn name(&self) -> &str {
        "mock"
    }

    fn analyze(&self, document: &str) -> Result<Vec<Block>> {
        self.documents
            .get(document)
            .cloned()
            .ok_or_else(|| Error::Ocr(format!("timed out analyzing {}", document)))
    }
}

/// Analyzer mock recording the text it was given.
struct MockAnalyzer {
    calls: AtomicUsize,
    last_text_len: AtomicUsize,
}

impl MockAnalyzer {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_text_len: AtomicUsize::new(0),
        }
    }
}

impl TextAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    fn detect_entities(&self, text: &str, language_code: &str) -> Result<Vec<Entity>> {
        assert_eq!(language_code, "en");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_text_len.store(text.len(), Ordering::SeqCst);
        Ok(vec![Entity {
            text: "12345".to_string(),
            entity_type: "OTHER".to_string(),
            score: 0.876,
        }])
    }

    fn detect_sentiment(&self, _text: &str, _language_code: &str) -> Result<Sentiment> {
        Ok(Sentiment {
            overall: "NEUTRAL".to_string(),
            scores: SentimentScores {
                positive: 0.1,
                negative: 0.05,
                neutral: 0.849,
                mixed: 0.001,
            },
        })
    }

    fn detect_key_phrases(&self, _text: &str, _language_code: &str) -> Result<Vec<KeyPhrase>> {
        Ok((1..=15)
            .map(|i| KeyPhrase {
                text: format!("phrase {}", i),
                score: 1.0 / i as f64,
            })
            .collect())
    }
}

fn invoice_blocks() -> Vec<Block> {
    vec![
        Block::line("l1", "Invoice Number 12345").with_confidence(99.0),
        Block::key("k1")
            .with_children(["w1", "w2"])
            .with_values(["v1"])
            .with_confidence(90.0),
        Block::value("v1").with_children(["w3"]),
        Block::word("w1", "Invoice"),
        Block::word("w2", "Number"),
        Block::word("w3", "12345"),
    ]
}

fn processor(ocr: MockOcr, analyzer: Arc<MockAnalyzer>) -> DocumentProcessor {
    DocumentProcessor::new(Arc::new(ocr), analyzer)
}

#[test]
fn test_successful_document() {
    let analyzer = Arc::new(MockAnalyzer::new());
    let ocr = MockOcr::new().with_document("uploads/invoice.pdf", invoice_blocks());
    let record = processor(ocr, analyzer.clone()).process("uploads/invoice.pdf");

    assert_eq!(record.status, Status::Success);
    assert_eq!(record.document_name, "uploads/invoice.pdf");
    assert_eq!(record.extraction.full_text, "Invoice Number 12345");
    assert_eq!(record.extraction.key_value_pairs.get("Invoice Number"), Some("12345"));
    assert_eq!(record.extraction.page_count, 1);
    assert_eq!(record.extraction.extraction_confidence, 94.5);

    let analysis = &record.analysis;
    assert!(analysis.error.is_none());
    assert_eq!(analysis.entities.as_ref().unwrap()[0].score, 0.88);
    assert_eq!(analysis.sentiment.as_ref().unwrap().scores.neutral, 0.85);
    let phrases = analysis.key_phrases.as_ref().unwrap();
    assert_eq!(phrases.len(), 10);
    assert_eq!(phrases[2].score, 0.33);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_ocr_failure_still_produces_record() {
    let analyzer = Arc::new(MockAnalyzer::new());
    let record = processor(MockOcr::new(), analyzer.clone()).process("lost.pdf");

    assert_ne!(record.status, Status::Success);
    assert_eq!(record.status, Status::Failed);
    assert_eq!(
        record.extraction.error.as_deref(),
        Some("OCR error: timed out analyzing lost.pdf")
    );
    assert_eq!(record.extraction.full_text, "");
    assert_eq!(record.extraction.page_count, 0);
    assert!(record.extraction.key_value_pairs.is_empty());

    // Nothing to analyze, and the analyzer is never called
    assert_eq!(record.analysis.error.as_deref(), Some(TEXT_TOO_SHORT));
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_long_text_truncated_for_analysis() {
    let long_line = "word ".repeat(2000);
    let analyzer = Arc::new(MockAnalyzer::new());
    let ocr = MockOcr::new().with_document("long.pdf", vec![Block::line("l1", long_line.clone())]);
    let record = processor(ocr, analyzer.clone()).process("long.pdf");

    assert_eq!(record.extraction.full_text.len(), long_line.len());
    assert_eq!(analyzer.last_text_len.load(Ordering::SeqCst), 5000);
}

#[test]
fn test_record_json_shape() {
    let ocr = MockOcr::new().with_document("a.pdf", invoice_blocks());
    let record = processor(ocr, Arc::new(MockAnalyzer::new())).process("a.pdf");

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["extraction"]["key_value_pairs"]["Invoice Number"], "12345");
    assert_eq!(value["analysis"]["sentiment"]["overall"], "NEUTRAL");
    assert_eq!(value["analysis"]["entities"][0]["type"], "OTHER");
    assert!(value["processed_at"].as_str().unwrap().contains('T'));

    let back: OutputRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_batch_processing_parallel() {
    let mut ocr = MockOcr::new();
    let names: Vec<String> = (0..20).map(|i| format!("doc-{}.pdf", i)).collect();
    for name in names.iter().step_by(2) {
        ocr = ocr.with_document(name, invoice_blocks());
    }

    let records = processor(ocr, Arc::new(MockAnalyzer::new())).process_batch(names.as_slice());

    assert_eq!(records.len(), 20);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.document_name, names[i]);
        let expected = if i % 2 == 0 {
            Status::Success
        } else {
            Status::Failed
        };
        assert_eq!(record.status, expected);
    }
}

#[test]
fn test_process_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let ocr = MockOcr::new().with_document("inbox/scan.png", invoice_blocks());
    let p = processor(ocr, Arc::new(MockAnalyzer::new()));

    let (record, key) = p.process_and_store("inbox/scan.png", &store).unwrap();
    assert_eq!(key, "processed/scan.png.json");

    let written = fs::read_to_string(dir.path().join(&key)).unwrap();
    let stored: OutputRecord = serde_json::from_str(&written).unwrap();
    assert_eq!(stored, record);
    assert!(written.contains('\n'));
}

#[test]
fn test_store_rejects_escaping_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let ocr = MockOcr::new().with_document("a.pdf", invoice_blocks());
    let record = processor(ocr, Arc::new(MockAnalyzer::new())).process("a.pdf");

    assert!(matches!(
        store.put("../outside.json", &record),
        Err(Error::Store(_))
    ));
}

#[test]
fn test_replayed_responses_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("form.pdf.json"),
        r#"{"Blocks": [
            {"BlockType": "LINE", "Id": "l1", "Text": "Patient: Jane Roe", "Confidence": 97.25},
            {"BlockType": "KEY_VALUE_SET", "Id": "k", "EntityTypes": ["KEY"],
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}, {"Type": "VALUE", "Ids": ["v"]}]},
            {"BlockType": "KEY_VALUE_SET", "Id": "v", "EntityTypes": ["VALUE"],
             "Relationships": [{"Type": "CHILD", "Ids": ["w2", "w3"]}]},
            {"BlockType": "WORD", "Id": "w1", "Text": "Patient:"},
            {"BlockType": "WORD", "Id": "w2", "Text": "Jane"},
            {"BlockType": "WORD", "Id": "w3", "Text": "Roe"}
        ]}"#,
    )
    .unwrap();
    let analyzer = JsonResponseAnalyzer::from_bytes(
        br#"{"Entities": [{"Text": "Jane Roe", "Type": "PERSON", "Score": 0.9991}],
             "Sentiment": "NEUTRAL",
             "SentimentScore": {"Positive": 0.0, "Negative": 0.0, "Neutral": 1.0, "Mixed": 0.0}}"#,
    )
    .unwrap();

    let p = DocumentProcessor::with_options(
        Arc::new(JsonResponseProvider::new(dir.path())),
        Arc::new(analyzer),
        PipelineOptions::new().sequential(),
    );
    let record = p.process("form.pdf");

    assert_eq!(record.extraction.key_value_pairs.get("Patient:"), Some("Jane Roe"));
    assert_eq!(record.extraction.extraction_confidence, 97.25);
    // Key phrases are missing from the capture: entities and sentiment survive
    assert_eq!(record.status, Status::Partial);
    assert_eq!(record.analysis.entities.as_ref().unwrap()[0].score, 1.0);
    assert!(record.analysis.sentiment.is_some());
    assert!(record.analysis.key_phrases.is_none());
    assert!(record.analysis.error.as_deref().unwrap().contains("KeyPhrases"));
}
