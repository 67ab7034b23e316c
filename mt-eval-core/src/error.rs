use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Length mismatch: {hypotheses} hypotheses vs {references} references")]
    LengthMismatch { hypotheses: usize, references: usize },

    #[error("Empty reference at index {index}")]
    EmptyReference { index: usize },

    #[error("No hypothesis/reference pairs to score")]
    EmptyInput,

    #[error("Unknown segmentation level: {0}")]
    UnknownLevel(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, MetricsError>;

impl MetricsError {
    /// Fails with `LengthMismatch` unless both sides hold the same number of segments.
    pub fn ensure_aligned(hypotheses: usize, references: usize) -> Result<()> {
        if hypotheses != references {
            return Err(MetricsError::LengthMismatch {
                hypotheses,
                references,
            });
        }
        Ok(())
    }
}

impl From<serde_json::Error> for MetricsError {
    fn from(err: serde_json::Error) -> Self {
        MetricsError::Serialization(err.to_string())
    }
}
