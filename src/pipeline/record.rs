//! Output record persisted per document.

use super::Status;
use crate::analysis::TextAnalysis;
use crate::extract::ExtractionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Combined extraction and analysis result for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Document identifier as given to the pipeline
    pub document_name: String,

    /// When processing finished (RFC 3339)
    pub processed_at: DateTime<Utc>,

    /// Block-graph extraction
    pub extraction: ExtractionResult,

    /// Text analysis of the extracted text
    pub analysis: TextAnalysis,

    /// Overall status
    pub status: Status,
}

impl OutputRecord {
    /// Key the record is stored under.
    pub fn result_key(&self) -> String {
        result_key(&self.document_name)
    }
}

/// Storage key for a document's record: `processed/<basename>.json`.
pub fn result_key(document_name: &str) -> String {
    let basename = document_name.rsplit('/').next().unwrap_or(document_name);
    format!("processed/{}.json", basename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_key() {
        assert_eq!(result_key("uploads/2024/invoice.pdf"), "processed/invoice.pdf.json");
        assert_eq!(result_key("scan.png"), "processed/scan.png.json");
    }

    #[test]
    fn test_record_shape() {
        let record = OutputRecord {
            document_name: "a.pdf".to_string(),
            processed_at: DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            extraction: ExtractionResult::default(),
            analysis: TextAnalysis::default(),
            status: Status::Success,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["document_name"], "a.pdf");
        assert_eq!(value["processed_at"], "2024-05-01T12:00:00Z");
        assert_eq!(value["status"], "success");
        assert_eq!(value["extraction"]["page_count"], 0);
        assert_eq!(record.result_key(), "processed/a.pdf.json");
    }
}
