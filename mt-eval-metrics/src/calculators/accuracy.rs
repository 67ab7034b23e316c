use mt_eval_core::{Level, MetricCalculator, MetricsError, Result};
use serde_json::json;
use tracing::debug;

use super::{CorpusInput, MetricOutput};
use crate::aggregators::AccuracyCounts;

/// Position-wise token matches over the hypotheses' character counts.
///
/// Tokens are compared up to the shorter of the two token sequences. The
/// denominator is the length of each unsplit hypothesis string in characters,
/// not its token count.
pub fn token_accuracy_counts<H, R>(hypotheses: &[H], references: &[R], level: Level) -> Result<AccuracyCounts>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    MetricsError::ensure_aligned(hypotheses.len(), references.len())?;

    let mut counts = AccuracyCounts::default();
    for (hypothesis, reference) in hypotheses.iter().zip(references) {
        let hypothesis = hypothesis.as_ref();
        counts.total += hypothesis.chars().count();
        counts.correct += level
            .split(hypothesis)
            .into_iter()
            .zip(level.split(reference.as_ref()))
            .filter(|(hyp_token, ref_token)| hyp_token == ref_token)
            .count();
    }

    debug!(correct = counts.correct, total = counts.total, %level, "token accuracy");
    Ok(counts)
}

/// Token accuracy as a percentage; 0.0 when the hypotheses are all empty.
pub fn token_accuracy<H, R>(hypotheses: &[H], references: &[R], level: Level) -> Result<f64>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    Ok(token_accuracy_counts(hypotheses, references, level)?.percentage())
}

/// Number of hypotheses identical to their reference.
pub fn sequence_accuracy_counts<H, R>(hypotheses: &[H], references: &[R]) -> Result<AccuracyCounts>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    MetricsError::ensure_aligned(hypotheses.len(), references.len())?;

    let correct = hypotheses
        .iter()
        .zip(references)
        .filter(|&(hyp, reference)| hyp.as_ref() == reference.as_ref())
        .count();

    Ok(AccuracyCounts::new(correct, hypotheses.len()))
}

/// Percentage of exact sequence matches; 0.0 for an empty batch.
pub fn sequence_accuracy<H, R>(hypotheses: &[H], references: &[R]) -> Result<f64>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    Ok(sequence_accuracy_counts(hypotheses, references)?.percentage())
}

#[derive(Debug, Clone, Default)]
pub struct TokenAccuracyCalculator {
    pub level: Level,
}

impl TokenAccuracyCalculator {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl MetricCalculator for TokenAccuracyCalculator {
    type Input = CorpusInput;
    type Output = MetricOutput;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        let counts = token_accuracy_counts(&input.hypotheses, &input.references, self.level)?;

        Ok(MetricOutput {
            score: counts.percentage(),
            metadata: json!({
                "metric": "token_accuracy",
                "level": self.level,
                "correct": counts.correct,
                "total": counts.total,
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceAccuracyCalculator;

impl MetricCalculator for SequenceAccuracyCalculator {
    type Input = CorpusInput;
    type Output = MetricOutput;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        let counts = sequence_accuracy_counts(&input.hypotheses, &input.references)?;

        Ok(MetricOutput {
            score: counts.percentage(),
            metadata: json!({
                "metric": "sequence_accuracy",
                "correct": counts.correct,
                "total": counts.total,
            }),
        })
    }
}
