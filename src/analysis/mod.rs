//! Text-analysis collaborator interface.
//!
//! Entity, sentiment and key-phrase detection run on an external NLP
//! service. [`TextAnalyzer`] is the seam the pipeline calls through;
//! [`analyze_text`] applies the input limits and trims the response.

mod options;
mod replay;

pub use options::AnalysisOptions;
pub use replay::{JsonResponseAnalyzer, UnavailableAnalyzer};

use crate::error::Result;
use crate::extract::round2;
use crate::pipeline::StageOutcome;
use serde::{Deserialize, Serialize};

/// A detected named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity text as it appears in the input
    pub text: String,

    /// Entity category (PERSON, DATE, QUANTITY, ...)
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Detection score in [0, 1]
    pub score: f64,
}

/// Per-class sentiment scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentScores {
    /// Score for POSITIVE
    pub positive: f64,
    /// Score for NEGATIVE
    pub negative: f64,
    /// Score for NEUTRAL
    pub neutral: f64,
    /// Score for MIXED
    pub mixed: f64,
}

impl SentimentScores {
    fn rounded(&self) -> Self {
        Self {
            positive: round2(self.positive),
            negative: round2(self.negative),
            neutral: round2(self.neutral),
            mixed: round2(self.mixed),
        }
    }
}

/// Overall sentiment of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Winning class (POSITIVE, NEGATIVE, NEUTRAL, MIXED)
    pub overall: String,

    /// Score for every class
    pub scores: SentimentScores,
}

/// A ranked key phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    /// Phrase text
    pub text: String,

    /// Detection score in [0, 1]
    pub score: f64,
}

/// Result of analyzing a document's text.
///
/// Parts are `None` when the collaborator was never asked for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_phrases: Option<Vec<KeyPhrase>>,

    /// Set when analysis was skipped or failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// External NLP service.
pub trait TextAnalyzer: Send + Sync {
    /// Name of this analyzer, for logging.
    fn name(&self) -> &str;

    /// Detect named entities.
    fn detect_entities(&self, text: &str, language_code: &str) -> Result<Vec<Entity>>;

    /// Detect overall sentiment.
    fn detect_sentiment(&self, text: &str, language_code: &str) -> Result<Sentiment>;

    /// Detect key phrases, ranked by the service.
    fn detect_key_phrases(&self, text: &str, language_code: &str) -> Result<Vec<KeyPhrase>>;
}

/// Message recorded when the input is too short to analyze.
pub const TEXT_TOO_SHORT: &str = "Text too short for analysis";

/// Analyze `text` through `analyzer`.
///
/// Text shorter than the configured minimum is not sent at all. Longer text
/// is cut to the byte limit on a character boundary. Scores are rounded to 2
/// decimals and only the top key phrases are kept. The three detections run
/// in order; the first failure stops the rest and is reported alongside the
/// parts that already succeeded.
pub fn analyze_text(
    analyzer: &dyn TextAnalyzer,
    text: &str,
    options: &AnalysisOptions,
) -> StageOutcome<TextAnalysis> {
    if text.trim().chars().count() < options.min_chars {
        return StageOutcome::failed(TextAnalysis::default(), TEXT_TOO_SHORT);
    }

    let text = truncate_to_bytes(text, options.max_bytes);
    let lang = options.language_code.as_str();
    let mut analysis = TextAnalysis::default();

    let entities = match analyzer.detect_entities(text, lang) {
        Ok(entities) => entities,
        Err(e) => return fail(analyzer, analysis, e),
    };
    analysis.entities = Some(
        entities
            .into_iter()
            .map(|e| Entity {
                score: round2(e.score),
                ..e
            })
            .collect(),
    );

    let sentiment = match analyzer.detect_sentiment(text, lang) {
        Ok(sentiment) => sentiment,
        Err(e) => return fail(analyzer, analysis, e),
    };
    analysis.sentiment = Some(Sentiment {
        scores: sentiment.scores.rounded(),
        overall: sentiment.overall,
    });

    let phrases = match analyzer.detect_key_phrases(text, lang) {
        Ok(phrases) => phrases,
        Err(e) => return fail(analyzer, analysis, e),
    };
    analysis.key_phrases = Some(
        phrases
            .into_iter()
            .take(options.max_key_phrases)
            .map(|p| KeyPhrase {
                score: round2(p.score),
                ..p
            })
            .collect(),
    );

    StageOutcome::Complete(analysis)
}

fn fail(
    analyzer: &dyn TextAnalyzer,
    partial: TextAnalysis,
    err: crate::error::Error,
) -> StageOutcome<TextAnalysis> {
    log::warn!("{} analysis failed: {}", analyzer.name(), err);
    StageOutcome::failed(partial, err.to_string())
}

/// Longest prefix of `text` that fits in `max_bytes` without splitting a character.
pub fn truncate_to_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
