pub mod accuracy;
pub mod bleu;
pub mod chrf;
pub mod error_rate;

pub use accuracy::*;
pub use bleu::*;
pub use chrf::*;
pub use error_rate::*;

use mt_eval_core::{EvalMetric, Level, Result};
use serde::{Deserialize, Serialize};

/// Index-aligned hypothesis and reference segments of one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusInput {
    pub hypotheses: Vec<String>,
    pub references: Vec<String>,
}

impl CorpusInput {
    pub fn new<H, R>(hypotheses: H, references: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            hypotheses: hypotheses.into_iter().map(Into::into).collect(),
            references: references.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricOutput {
    pub score: f64,
    pub metadata: serde_json::Value,
}

/// Scores a batch with the given metric. `level` only affects token accuracy;
/// chrF contributes its corpus score.
pub fn evaluate<H, R>(
    metric: EvalMetric,
    hypotheses: &[H],
    references: &[R],
    level: Level,
) -> Result<f64>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    match metric {
        EvalMetric::Bleu => corpus_bleu(hypotheses, references),
        EvalMetric::Chrf => Ok(character_f_score(hypotheses, references).score),
        EvalMetric::Wer => word_error_rate(hypotheses, references),
        EvalMetric::Cer => char_error_rate(hypotheses, references),
        EvalMetric::TokenAccuracy => token_accuracy(hypotheses, references, level),
        EvalMetric::SequenceAccuracy => sequence_accuracy(hypotheses, references),
    }
}
