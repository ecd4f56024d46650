//! Analyzers that do not call a live service.

use super::{Entity, KeyPhrase, Sentiment, SentimentScores, TextAnalyzer};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireEntity {
    text: String,
    #[serde(rename = "Type")]
    entity_type: String,
    score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WirePhrase {
    text: String,
    score: f64,
}

/// A captured NLP service response, in the service's own field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireResponse {
    entities: Option<Vec<WireEntity>>,
    sentiment: Option<String>,
    sentiment_score: Option<SentimentScores>,
    key_phrases: Option<Vec<WirePhrase>>,
}

/// Replays a captured analysis response for every text.
///
/// The response is one JSON object merging the service's three replies:
/// `Entities`, `Sentiment` with `SentimentScore`, and `KeyPhrases`. A part
/// missing from the capture fails the corresponding detection.
#[derive(Debug, Clone)]
pub struct JsonResponseAnalyzer {
    response: WireResponse,
}

impl JsonResponseAnalyzer {
    /// Parse a captured response.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let response = serde_json::from_slice(data)?;
        Ok(Self { response })
    }

    /// Load a captured response from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }
}

fn missing(part: &str) -> Error {
    Error::Analysis(format!("captured response has no {}", part))
}

impl TextAnalyzer for JsonResponseAnalyzer {
    fn name(&self) -> &str {
        "json-response"
    }

    fn detect_entities(&self, _text: &str, _language_code: &str) -> Result<Vec<Entity>> {
        let entities = self.response.entities.as_ref().ok_or_else(|| missing("Entities"))?;
        Ok(entities
            .iter()
            .map(|e| Entity {
                text: e.text.clone(),
                entity_type: e.entity_type.clone(),
                score: e.score,
            })
            .collect())
    }

    fn detect_sentiment(&self, _text: &str, _language_code: &str) -> Result<Sentiment> {
        let overall = self.response.sentiment.clone().ok_or_else(|| missing("Sentiment"))?;
        Ok(Sentiment {
            overall,
            scores: self.response.sentiment_score.clone().unwrap_or_default(),
        })
    }

    fn detect_key_phrases(&self, _text: &str, _language_code: &str) -> Result<Vec<KeyPhrase>> {
        let phrases = self
            .response
            .key_phrases
            .as_ref()
            .ok_or_else(|| missing("KeyPhrases"))?;
        Ok(phrases
            .iter()
            .map(|p| KeyPhrase {
                text: p.text.clone(),
                score: p.score,
            })
            .collect())
    }
}

/// Analyzer used when no NLP backend is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableAnalyzer;

impl TextAnalyzer for UnavailableAnalyzer {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn detect_entities(&self, _text: &str, _language_code: &str) -> Result<Vec<Entity>> {
        Err(Error::Analysis("no text analysis backend configured".to_string()))
    }

    fn detect_sentiment(&self, _text: &str, _language_code: &str) -> Result<Sentiment> {
        Err(Error::Analysis("no text analysis backend configured".to_string()))
    }

    fn detect_key_phrases(&self, _text: &str, _language_code: &str) -> Result<Vec<KeyPhrase>> {
        Err(Error::Analysis("no text analysis backend configured".to_string()))
    }
}
