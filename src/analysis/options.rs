//! Text-analysis options.

/// Limits applied around the text-analysis collaborator.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Maximum input size in bytes accepted by the service
    pub max_bytes: usize,

    /// Number of top-ranked key phrases kept
    pub max_key_phrases: usize,

    /// Minimum trimmed length (characters) worth analyzing
    pub min_chars: usize,

    /// Language code passed to the service
    pub language_code: String,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input byte limit.
    pub fn with_max_bytes(mut self, bytes: usize) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Set how many key phrases are kept.
    pub fn with_max_key_phrases(mut self, count: usize) -> Self {
        self.max_key_phrases = count;
        self
    }

    /// Set the minimum text length.
    pub fn with_min_chars(mut self, chars: usize) -> Self {
        self.min_chars = chars;
        self
    }

    /// Set the language code.
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_bytes: 5000,
            max_key_phrases: 10,
            min_chars: 3,
            language_code: "en".to_string(),
        }
    }
}
