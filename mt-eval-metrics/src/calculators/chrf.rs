use mt_eval_core::{MetricCalculator, MetricsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::{CorpusInput, MetricOutput};

pub const CHRF_ORDER: usize = 6;
pub const CHRF_BETA: f64 = 2.0;

/// Per-order character n-gram counts summed over a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChrfStatistics {
    pub hypothesis_ngrams: Vec<usize>,
    pub reference_ngrams: Vec<usize>,
    pub common_ngrams: Vec<usize>,
}

impl ChrfStatistics {
    pub fn new(char_order: usize) -> Self {
        Self {
            hypothesis_ngrams: vec![0; char_order],
            reference_ngrams: vec![0; char_order],
            common_ngrams: vec![0; char_order],
        }
    }

    pub fn char_order(&self) -> usize {
        self.hypothesis_ngrams.len()
    }

    /// Counts of one segment with all whitespace removed from both sides.
    pub fn from_segment(hypothesis: &str, reference: &str, char_order: usize) -> Self {
        let hyp_chars = strip_whitespace(hypothesis);
        let ref_chars = strip_whitespace(reference);
        let mut stats = Self::new(char_order);

        for n in 1..=char_order {
            let hyp_ngrams = count_char_ngrams(&hyp_chars, n);
            let ref_ngrams = count_char_ngrams(&ref_chars, n);

            stats.hypothesis_ngrams[n - 1] = hyp_ngrams.values().sum();
            stats.reference_ngrams[n - 1] = ref_ngrams.values().sum();
            stats.common_ngrams[n - 1] = hyp_ngrams
                .iter()
                .map(|(ngram, &count)| count.min(ref_ngrams.get(ngram).copied().unwrap_or(0)))
                .sum();
        }

        stats
    }

    /// Sums segment counts over zipped hypothesis/reference pairs.
    pub fn from_corpus<H, R>(hypotheses: &[H], references: &[R], char_order: usize) -> Self
    where
        H: AsRef<str>,
        R: AsRef<str>,
    {
        let mut stats = Self::new(char_order);
        for (hyp, reference) in hypotheses.iter().zip(references) {
            stats.accumulate(&Self::from_segment(hyp.as_ref(), reference.as_ref(), char_order));
        }
        stats
    }

    fn accumulate(&mut self, other: &ChrfStatistics) {
        for n in 0..self.char_order() {
            self.hypothesis_ngrams[n] += other.hypothesis_ngrams[n];
            self.reference_ngrams[n] += other.reference_ngrams[n];
            self.common_ngrams[n] += other.common_ngrams[n];
        }
    }

    /// Adds the counts of another shard computed with the same n-gram order.
    pub fn merge(mut self, other: &ChrfStatistics) -> Result<Self> {
        if self.char_order() != other.char_order() {
            return Err(MetricsError::Validation(format!(
                "cannot merge chrF statistics of order {} and {}",
                self.char_order(),
                other.char_order()
            )));
        }
        self.accumulate(other);
        Ok(self)
    }

    /// Precision and recall averaged over the orders where both sides have
    /// n-grams.
    pub fn average_precision_recall(&self) -> (f64, f64) {
        let mut precision = 0.0;
        let mut recall = 0.0;
        let mut effective_order = 0;

        for n in 0..self.char_order() {
            let hyp = self.hypothesis_ngrams[n];
            let reference = self.reference_ngrams[n];
            if hyp > 0 && reference > 0 {
                precision += self.common_ngrams[n] as f64 / hyp as f64;
                recall += self.common_ngrams[n] as f64 / reference as f64;
                effective_order += 1;
            }
        }

        if effective_order == 0 {
            return (0.0, 0.0);
        }
        (
            precision / effective_order as f64,
            recall / effective_order as f64,
        )
    }

    pub fn score(&self, beta: f64) -> ChrfScore {
        let (precision, recall) = self.average_precision_recall();

        let f_score = if precision + recall == 0.0 {
            0.0
        } else {
            let beta_square = beta.powi(2);
            (1.0 + beta_square) * (precision * recall) / ((beta_square * precision) + recall)
        };

        ChrfScore {
            score: f_score * 100.0,
            char_order: self.char_order(),
            beta,
            precision,
            recall,
        }
    }
}

fn strip_whitespace(text: &str) -> Vec<char> {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

fn count_char_ngrams(chars: &[char], n: usize) -> HashMap<&[char], usize> {
    let mut counts = HashMap::new();
    if chars.len() >= n {
        for window in chars.windows(n) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }
    counts
}

/// Corpus chrF on the 0-100 scale, with the averaged precision and recall it
/// was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChrfScore {
    pub score: f64,
    pub char_order: usize,
    pub beta: f64,
    pub precision: f64,
    pub recall: f64,
}

impl fmt::Display for ChrfScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chrF{} = {:.2}", self.beta, self.score)
    }
}

pub fn corpus_chrf<H, R>(hypotheses: &[H], references: &[R], char_order: usize, beta: f64) -> ChrfScore
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let chrf = ChrfStatistics::from_corpus(hypotheses, references, char_order).score(beta);
    debug!(score = chrf.score, precision = chrf.precision, recall = chrf.recall, "chrf");
    chrf
}

/// Corpus chrF with six character orders and beta 2.
pub fn character_f_score<H, R>(hypotheses: &[H], references: &[R]) -> ChrfScore
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    corpus_chrf(hypotheses, references, CHRF_ORDER, CHRF_BETA)
}

#[derive(Debug, Clone)]
pub struct ChrfCalculator {
    pub char_order: usize,
    pub beta: f64,
}

impl ChrfCalculator {
    pub fn new(char_order: usize) -> Self {
        Self {
            char_order,
            beta: CHRF_BETA,
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }
}

impl Default for ChrfCalculator {
    fn default() -> Self {
        Self::new(CHRF_ORDER)
    }
}

impl MetricCalculator for ChrfCalculator {
    type Input = CorpusInput;
    type Output = MetricOutput;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output> {
        if self.char_order == 0 {
            return Err(MetricsError::Validation(
                "chrF needs at least one character order".to_string(),
            ));
        }
        let chrf = corpus_chrf(&input.hypotheses, &input.references, self.char_order, self.beta);

        Ok(MetricOutput {
            score: chrf.score,
            metadata: json!({
                "metric": "chrf",
                "char_order": self.char_order,
                "beta": self.beta,
                "precision": chrf.precision,
                "recall": chrf.recall,
            }),
        })
    }
}
