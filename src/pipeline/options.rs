//! Pipeline options and configuration.

use crate::analysis::AnalysisOptions;
use crate::extract::ExtractOptions;

/// Options for processing documents end to end.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Extraction options
    pub extract: ExtractOptions,

    /// Text-analysis options
    pub analysis: AnalysisOptions,

    /// Process batches in parallel
    pub parallel: bool,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set analysis options.
    pub fn with_analysis_options(mut self, options: AnalysisOptions) -> Self {
        self.analysis = options;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            analysis: AnalysisOptions::default(),
            parallel: true,
        }
    }
}
