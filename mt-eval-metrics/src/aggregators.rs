use mt_eval_core::{MetricsError, Result};
use serde::{Deserialize, Serialize};

/// Edit-distance outcome for a single hypothesis/reference pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairErrorRate {
    pub edits: usize,
    pub reference_len: usize,
    pub rate: f64,
}

impl PairErrorRate {
    /// Normalizes `edits` by `reference_len`. An empty reference at `index`
    /// has no defined rate.
    pub fn new(index: usize, edits: usize, reference_len: usize) -> Result<Self> {
        if reference_len == 0 {
            return Err(MetricsError::EmptyReference { index });
        }
        Ok(Self {
            edits,
            reference_len,
            rate: edits as f64 / reference_len as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: usize,
}

/// Per-pair error rates of a batch; the corpus score is their arithmetic mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorRateReport {
    pub pairs: Vec<PairErrorRate>,
}

impl ErrorRateReport {
    pub fn new(pairs: Vec<PairErrorRate>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.pairs.iter().map(|pair| pair.rate).sum()
    }

    /// Mean of the per-pair rates. A report without pairs has no mean.
    pub fn mean(&self) -> Result<f64> {
        if self.pairs.is_empty() {
            return Err(MetricsError::EmptyInput);
        }
        Ok(self.sum() / self.pairs.len() as f64)
    }

    /// Micro-averaged rate: total edits over total reference length.
    pub fn pooled(&self) -> Result<f64> {
        let reference_len: usize = self.pairs.iter().map(|pair| pair.reference_len).sum();
        if reference_len == 0 {
            return Err(MetricsError::EmptyInput);
        }
        let edits: usize = self.pairs.iter().map(|pair| pair.edits).sum();
        Ok(edits as f64 / reference_len as f64)
    }

    pub fn summary(&self) -> Result<RateSummary> {
        let mean = self.mean()?;
        let min = self.pairs.iter().map(|pair| pair.rate).fold(f64::INFINITY, f64::min);
        let max = self
            .pairs
            .iter()
            .map(|pair| pair.rate)
            .fold(f64::NEG_INFINITY, f64::max);

        Ok(RateSummary {
            mean,
            min,
            max,
            sum: self.sum(),
            count: self.pairs.len(),
        })
    }

    /// Appends the pairs of a later shard. Merging shards in corpus order
    /// reproduces the report of the whole corpus.
    pub fn merge(mut self, other: ErrorRateReport) -> Self {
        self.pairs.extend(other.pairs);
        self
    }
}

/// Correct/total counts behind the accuracy metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyCounts {
    pub correct: usize,
    pub total: usize,
}

impl AccuracyCounts {
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    /// `correct / total` as a percentage, 0.0 when nothing was counted.
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn merge(self, other: AccuracyCounts) -> Self {
        Self {
            correct: self.correct + other.correct,
            total: self.total + other.total,
        }
    }
}
