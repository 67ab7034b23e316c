use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MetricsError;

/// Evaluation metrics a validation run can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalMetric {
    Bleu,
    Chrf,
    Wer,
    Cer,
    TokenAccuracy,
    SequenceAccuracy,
}

impl EvalMetric {
    pub const ALL: [EvalMetric; 6] = [
        EvalMetric::Bleu,
        EvalMetric::Chrf,
        EvalMetric::Wer,
        EvalMetric::Cer,
        EvalMetric::TokenAccuracy,
        EvalMetric::SequenceAccuracy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EvalMetric::Bleu => "bleu",
            EvalMetric::Chrf => "chrf",
            EvalMetric::Wer => "wer",
            EvalMetric::Cer => "cer",
            EvalMetric::TokenAccuracy => "token_accuracy",
            EvalMetric::SequenceAccuracy => "sequence_accuracy",
        }
    }

    /// Error rates improve downwards, every other metric upwards.
    pub fn higher_is_better(self) -> bool {
        !matches!(self, EvalMetric::Wer | EvalMetric::Cer)
    }

    /// Returns true when `candidate` beats `best` under this metric.
    pub fn is_improvement(self, candidate: f64, best: f64) -> bool {
        if self.higher_is_better() {
            candidate > best
        } else {
            candidate < best
        }
    }
}

impl fmt::Display for EvalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvalMetric {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EvalMetric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| MetricsError::UnknownMetric(s.to_string()))
    }
}
