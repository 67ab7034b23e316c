use mt_eval_core::{MetricCalculator, Result};
use serde_json::json;
use tracing::{debug, trace};

use super::{CorpusInput, MetricOutput};
use crate::aggregators::{ErrorRateReport, PairErrorRate};
use crate::edit_distance::levenshtein;

/// Word-level edit distance of every pair, normalized by reference token count.
///
/// Pairs are formed by zipping, so surplus segments on the longer side are
/// ignored. Fails on a reference without tokens.
pub fn word_error_rate_report<H, R>(hypotheses: &[H], references: &[R]) -> Result<ErrorRateReport>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let mut pairs = Vec::with_capacity(hypotheses.len().min(references.len()));

    for (index, (hypothesis, reference)) in hypotheses.iter().zip(references).enumerate() {
        let hypothesis = hypothesis.as_ref();
        let reference = reference.as_ref();
        let hyp_tokens: Vec<&str> = hypothesis.split_whitespace().collect();
        let ref_tokens: Vec<&str> = reference.split_whitespace().collect();

        let pair = PairErrorRate::new(index, levenshtein(&hyp_tokens, &ref_tokens), ref_tokens.len())?;
        trace!(
            index,
            hypothesis,
            hyp_len = hyp_tokens.len(),
            reference,
            ref_len = ref_tokens.len(),
            edits = pair.edits,
            rate = pair.rate,
            "wer pair"
        );
        pairs.push(pair);
    }

    let report = ErrorRateReport::new(pairs);
    debug!(sum = report.sum(), count = report.len(), "wer");
    Ok(report)
}

/// Mean word error rate over all pairs, as a ratio.
pub fn word_error_rate<H, R>(hypotheses: &[H], references: &[R]) -> Result<f64>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    word_error_rate_report(hypotheses, references)?.mean()
}

/// Character-level edit distance of every pair, normalized by the reference
/// character count.
///
/// Only the hypothesis has its whitespace runs collapsed to single spaces;
/// the reference is compared as given.
pub fn char_error_rate_report<H, R>(hypotheses: &[H], references: &[R]) -> Result<ErrorRateReport>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let mut pairs = Vec::with_capacity(hypotheses.len().min(references.len()));

    for (index, (hypothesis, reference)) in hypotheses.iter().zip(references).enumerate() {
        let hypothesis = hypothesis.as_ref();
        let reference = reference.as_ref();
        let normalized = collapse_whitespace(hypothesis);
        let hyp_chars: Vec<char> = normalized.chars().collect();
        let ref_chars: Vec<char> = reference.chars().collect();

        let pair = PairErrorRate::new(index, levenshtein(&hyp_chars, &ref_chars), ref_chars.len())?;
        trace!(
            index,
            hypothesis,
            normalized = normalized.as_str(),
            hyp_len = hypothesis.chars().count(),
            normalized_len = hyp_chars.len(),
            reference,
            ref_len = ref_chars.len(),
            edits = pair.edits,
            rate = pair.rate,
            "cer pair"
        );
        pairs.push(pair);
    }

    let report = ErrorRateReport::new(pairs);
    debug!(sum = report.sum(), count = report.len(), "cer");
    Ok(report)
}

/// Mean character error rate over all pairs, as a ratio.
pub fn char_error_rate<H, R>(hypotheses: &[H], references: &[R]) -> Result<f64>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    char_error_rate_report(hypotheses, references)?.mean()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WerCalculator;

impl MetricCalculator for WerCalculator {
    type Input = CorpusInput;
    type Output = MetricOutput;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        let report = word_error_rate_report(&input.hypotheses, &input.references)?;

        Ok(MetricOutput {
            score: report.mean()?,
            metadata: json!({
                "metric": "wer",
                "pairs": report.len(),
                "pooled": report.pooled()?,
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CerCalculator;

impl MetricCalculator for CerCalculator {
    type Input = CorpusInput;
    type Output = MetricOutput;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        let report = char_error_rate_report(&input.hypotheses, &input.references)?;

        Ok(MetricOutput {
            score: report.mean()?,
            metadata: json!({
                "metric": "cer",
                "pairs": report.len(),
                "pooled": report.pooled()?,
            }),
        })
    }
}
