use mt_eval_core::{MetricCalculator, MetricsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::{CorpusInput, MetricOutput};

pub const NGRAM_ORDER: usize = 4;

/// Floor value substituted for a zero match count.
pub const DEFAULT_SMOOTH_VALUE: f64 = 0.1;

/// Stand-in for `ln(0)` so a missing order drives the score to zero.
const LOG_ZERO: f64 = -9_999_999_999.0;

/// Sufficient statistics of corpus BLEU: clipped n-gram matches, n-gram
/// totals and token lengths, summed over segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BleuStatistics {
    pub counts: [usize; NGRAM_ORDER],
    pub totals: [usize; NGRAM_ORDER],
    pub sys_len: usize,
    pub ref_len: usize,
}

impl BleuStatistics {
    /// Statistics of one segment against its single reference. Tokens are the
    /// whitespace-separated pieces of the raw text; case is kept.
    pub fn from_segment(hypothesis: &str, reference: &str) -> Self {
        let hyp_tokens: Vec<&str> = hypothesis.split_whitespace().collect();
        let ref_tokens: Vec<&str> = reference.split_whitespace().collect();

        let mut stats = Self {
            sys_len: hyp_tokens.len(),
            ref_len: ref_tokens.len(),
            ..Self::default()
        };

        for n in 1..=NGRAM_ORDER {
            let hyp_ngrams = count_ngrams(&hyp_tokens, n);
            let ref_ngrams = count_ngrams(&ref_tokens, n);

            for (ngram, &count) in &hyp_ngrams {
                let ref_count = ref_ngrams.get(ngram).copied().unwrap_or(0);
                stats.counts[n - 1] += count.min(ref_count);
                stats.totals[n - 1] += count;
            }
        }

        stats
    }

    /// Accumulates segment statistics over a system stream and one reference
    /// stream of the same length.
    pub fn from_corpus<H, R>(hypotheses: &[H], references: &[R]) -> Result<Self>
    where
        H: AsRef<str>,
        R: AsRef<str>,
    {
        MetricsError::ensure_aligned(hypotheses.len(), references.len())?;

        Ok(hypotheses
            .iter()
            .zip(references)
            .map(|(hyp, reference)| Self::from_segment(hyp.as_ref(), reference.as_ref()))
            .fold(Self::default(), Self::merge))
    }

    pub fn merge(self, other: BleuStatistics) -> Self {
        let mut merged = self;
        for n in 0..NGRAM_ORDER {
            merged.counts[n] += other.counts[n];
            merged.totals[n] += other.totals[n];
        }
        merged.sys_len += other.sys_len;
        merged.ref_len += other.ref_len;
        merged
    }

    /// Corpus BLEU with floor smoothing and effective order.
    ///
    /// Orders are scored until the first one without any hypothesis n-grams;
    /// the geometric mean runs over the orders seen before it.
    pub fn score(&self, smooth_value: f64) -> BleuScore {
        let mut precisions = [0.0; NGRAM_ORDER];
        let mut effective_order = NGRAM_ORDER;

        for n in 0..NGRAM_ORDER {
            if self.totals[n] == 0 {
                break;
            }
            effective_order = n + 1;

            precisions[n] = if self.counts[n] == 0 {
                100.0 * smooth_value / self.totals[n] as f64
            } else {
                100.0 * self.counts[n] as f64 / self.totals[n] as f64
            };
        }

        let bp = if self.sys_len < self.ref_len {
            if self.sys_len > 0 {
                (1.0 - self.ref_len as f64 / self.sys_len as f64).exp()
            } else {
                0.0
            }
        } else {
            1.0
        };

        let log_sum: f64 = precisions[..effective_order]
            .iter()
            .map(|&precision| if precision == 0.0 { LOG_ZERO } else { precision.ln() })
            .sum();
        let score = bp * (log_sum / effective_order as f64).exp();

        BleuScore {
            score,
            counts: self.counts,
            totals: self.totals,
            precisions,
            bp,
            sys_len: self.sys_len,
            ref_len: self.ref_len,
        }
    }
}

fn count_ngrams<'a>(tokens: &'a [&'a str], n: usize) -> HashMap<&'a [&'a str], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for window in tokens.windows(n) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }
    counts
}

/// Result of a corpus BLEU computation on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BleuScore {
    pub score: f64,
    pub counts: [usize; NGRAM_ORDER],
    pub totals: [usize; NGRAM_ORDER],
    pub precisions: [f64; NGRAM_ORDER],
    pub bp: f64,
    pub sys_len: usize,
    pub ref_len: usize,
}

impl BleuScore {
    /// Hypothesis to reference length ratio.
    pub fn ratio(&self) -> f64 {
        if self.ref_len == 0 {
            0.0
        } else {
            self.sys_len as f64 / self.ref_len as f64
        }
    }
}

impl fmt::Display for BleuScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BLEU = {:.2} {:.1}/{:.1}/{:.1}/{:.1} (BP = {:.3} ratio = {:.3} hyp_len = {} ref_len = {})",
            self.score,
            self.precisions[0],
            self.precisions[1],
            self.precisions[2],
            self.precisions[3],
            self.bp,
            self.ratio(),
            self.sys_len,
            self.ref_len,
        )
    }
}

/// Untokenized corpus BLEU of a system stream against a single reference
/// stream.
pub fn raw_corpus_bleu<H, R>(hypotheses: &[H], references: &[R], smooth_value: f64) -> Result<BleuScore>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let stats = BleuStatistics::from_corpus(hypotheses, references)?;
    let bleu = stats.score(smooth_value);
    debug!(score = bleu.score, sys_len = bleu.sys_len, ref_len = bleu.ref_len, "bleu");
    Ok(bleu)
}

/// Full corpus BLEU result with the default floor smoothing.
pub fn corpus_bleu_score<H, R>(hypotheses: &[H], references: &[R]) -> Result<BleuScore>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    raw_corpus_bleu(hypotheses, references, DEFAULT_SMOOTH_VALUE)
}

/// Corpus BLEU score (0-100) of raw, untokenized text.
pub fn corpus_bleu<H, R>(hypotheses: &[H], references: &[R]) -> Result<f64>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    Ok(corpus_bleu_score(hypotheses, references)?.score)
}

#[derive(Debug, Clone)]
pub struct BleuCalculator {
    pub smooth_value: f64,
}

impl BleuCalculator {
    pub fn new() -> Self {
        Self {
            smooth_value: DEFAULT_SMOOTH_VALUE,
        }
    }

    pub fn with_smooth_value(mut self, smooth_value: f64) -> Self {
        self.smooth_value = smooth_value;
        self
    }
}

impl Default for BleuCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricCalculator for BleuCalculator {
    type Input = CorpusInput;
    type Output = MetricOutput;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        let bleu = raw_corpus_bleu(&input.hypotheses, &input.references, self.smooth_value)?;

        Ok(MetricOutput {
            score: bleu.score,
            metadata: json!({
                "metric": "bleu",
                "smooth_value": self.smooth_value,
                "precisions": bleu.precisions,
                "bp": bleu.bp,
                "sys_len": bleu.sys_len,
                "ref_len": bleu.ref_len,
            }),
        })
    }
}
