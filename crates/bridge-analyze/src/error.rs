use thiserror::Error;

/// Errors raised while preparing the analyzer.
#[derive(Debug, Clone, Error)]
pub enum AnalyzeError {
    #[error("invalid rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
