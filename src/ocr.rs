//! OCR collaborator interface and response parsing.
//!
//! The OCR service itself is external. This module defines the seam the
//! pipeline calls through ([`OcrProvider`]) and providers that replay
//! responses already captured from the service.

use crate::error::{Error, Result};
use crate::model::Block;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of OCR block collections, one call per document.
pub trait OcrProvider: Send + Sync {
    /// Name of this provider, for logging.
    fn name(&self) -> &str;

    /// Run OCR (with form and table analysis) over a document.
    fn analyze(&self, document: &str) -> Result<Vec<Block>>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseShape {
    Envelope {
        #[serde(rename = "Blocks")]
        blocks: Vec<Block>,
    },
    Bare(Vec<Block>),
}

/// Parse an OCR response body.
///
/// Accepts the service envelope (`{"Blocks": [...]}`, other fields ignored)
/// or a bare array of blocks.
pub fn parse_response(data: &[u8]) -> Result<Vec<Block>> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::InvalidResponse("empty response".to_string()));
    }

    let shape: ResponseShape = serde_json::from_slice(data).map_err(|e| {
        Error::InvalidResponse(format!("expected a Blocks array or block list: {}", e))
    })?;

    Ok(match shape {
        ResponseShape::Envelope { blocks } => blocks,
        ResponseShape::Bare(blocks) => blocks,
    })
}

/// Parse an OCR response stored in a file.
pub fn parse_response_file<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    let data = fs::read(path)?;
    parse_response(&data)
}

/// Replays OCR responses saved as JSON files under a root directory.
///
/// A document named `scans/invoice.pdf` resolves to `<root>/scans/invoice.pdf`
/// when that file holds the response, otherwise `<root>/scans/invoice.pdf.json`.
#[derive(Debug, Clone)]
pub struct JsonResponseProvider {
    root: PathBuf,
}

impl JsonResponseProvider {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory responses are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, document: &str) -> Option<PathBuf> {
        let direct = self.root.join(document);
        if direct.is_file() {
            return Some(direct);
        }
        let sidecar = self.root.join(format!("{}.json", document));
        sidecar.is_file().then_some(sidecar)
    }
}

impl OcrProvider for JsonResponseProvider {
    fn name(&self) -> &str {
        "json-response"
    }

    fn analyze(&self, document: &str) -> Result<Vec<Block>> {
        let path = self
            .locate(document)
            .ok_or_else(|| Error::DocumentNotFound(document.to_string()))?;
        log::debug!("reading OCR response from {}", path.display());
        parse_response_file(path)
    }
}

/// Returns the same block collection for every document.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    blocks: Vec<Block>,
}

impl StaticProvider {
    /// Create a provider serving `blocks`.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl OcrProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn analyze(&self, _document: &str) -> Result<Vec<Block>> {
        Ok(self.blocks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;

    #[test]
    fn test_parse_envelope() {
        let data = br#"{
            "DocumentMetadata": {"Pages": 1},
            "Blocks": [
                {"BlockType": "PAGE", "Id": "p1"},
                {"BlockType": "LINE", "Id": "l1", "Text": "Hello", "Confidence": 99.1}
            ]
        }"#;
        let blocks = parse_response(data).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::Page);
        assert_eq!(blocks[1].text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_parse_bare_array() {
        let data = br#"[{"BlockType": "WORD", "Id": "w1", "Text": "Hi"}]"#;
        let blocks = parse_response(data).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(matches!(
            parse_response(b"  \n"),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(matches!(
            parse_response(br#"{"Pages": 3}"#),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticProvider::new(vec![Block::line("l1", "Hi")]);
        assert_eq!(provider.analyze("anything").unwrap().len(), 1);
        assert_eq!(provider.name(), "static");
    }

    #[test]
    fn test_json_provider_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonResponseProvider::new(dir.path());
        assert!(matches!(
            provider.analyze("nope.pdf"),
            Err(Error::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_json_provider_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("invoice.pdf.json"),
            r#"{"Blocks": [{"BlockType": "LINE", "Id": "l1", "Text": "Total"}]}"#,
        )
        .unwrap();

        let provider = JsonResponseProvider::new(dir.path());
        let blocks = provider.analyze("invoice.pdf").unwrap();
        assert_eq!(blocks[0].text.as_deref(), Some("Total"));
    }
}
