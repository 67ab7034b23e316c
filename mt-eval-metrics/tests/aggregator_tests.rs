use approx::assert_relative_eq;
use mt_eval_core::{Level, MetricsError};
use mt_eval_metrics::aggregators::{AccuracyCounts, ErrorRateReport, PairErrorRate};
use mt_eval_metrics::calculators::{
    char_error_rate_report, sequence_accuracy_counts, token_accuracy, token_accuracy_counts,
    word_error_rate, word_error_rate_report,
};
use pretty_assertions::assert_eq;

const HYPOTHESES: [&str; 4] = ["the cat sat", "a b c d", "hello there", "one"];
const REFERENCES: [&str; 4] = ["the cat sat down", "a b x d", "hello world", "one two"];

// ===== Error Rate Reports =====

#[test]
fn test_pair_error_rate_rejects_empty_reference() {
    let err = PairErrorRate::new(3, 2, 0).unwrap_err();
    assert_eq!(err, MetricsError::EmptyReference { index: 3 });
}

#[test]
fn test_empty_report_has_no_mean() {
    let report = ErrorRateReport::default();
    assert!(report.is_empty());
    assert_eq!(report.mean().unwrap_err(), MetricsError::EmptyInput);
    assert!(report.summary().is_err());
}

#[test]
fn test_report_summary() {
    let report = word_error_rate_report(&HYPOTHESES, &REFERENCES).unwrap();
    let summary = report.summary().unwrap();

    assert_eq!(summary.count, 4);
    assert_eq!(summary.min, 0.25);
    assert_eq!(summary.max, 0.5);
    assert_relative_eq!(summary.sum, 1.5, epsilon = 1e-12);
    assert_relative_eq!(summary.mean, 0.375, epsilon = 1e-12);
}

#[test]
fn test_pooled_rate_weights_by_reference_length() {
    let report = word_error_rate_report(&HYPOTHESES, &REFERENCES).unwrap();
    // 4 edits over 12 reference words
    assert_relative_eq!(report.pooled().unwrap(), 4.0 / 12.0, epsilon = 1e-12);
}

#[test]
fn test_wer_report_merge_matches_whole_corpus() {
    let head = word_error_rate_report(&HYPOTHESES[..2], &REFERENCES[..2]).unwrap();
    let tail = word_error_rate_report(&HYPOTHESES[2..], &REFERENCES[2..]).unwrap();

    let merged = head.merge(tail);
    assert_eq!(merged, word_error_rate_report(&HYPOTHESES, &REFERENCES).unwrap());
    assert_eq!(
        merged.mean().unwrap(),
        word_error_rate(&HYPOTHESES, &REFERENCES).unwrap()
    );
}

#[test]
fn test_cer_report_merge_matches_whole_corpus() {
    let head = char_error_rate_report(&HYPOTHESES[..3], &REFERENCES[..3]).unwrap();
    let tail = char_error_rate_report(&HYPOTHESES[3..], &REFERENCES[3..]).unwrap();
    let whole = char_error_rate_report(&HYPOTHESES, &REFERENCES).unwrap();

    assert_eq!(head.merge(tail), whole);
}

// ===== Accuracy Counts =====

#[test]
fn test_accuracy_counts_percentage() {
    assert_eq!(AccuracyCounts::new(1, 4).percentage(), 25.0);
    assert_eq!(AccuracyCounts::default().percentage(), 0.0);
}

#[test]
fn test_token_accuracy_merge_matches_whole_corpus() {
    let head = token_accuracy_counts(&HYPOTHESES[..1], &REFERENCES[..1], Level::Word).unwrap();
    let tail = token_accuracy_counts(&HYPOTHESES[1..], &REFERENCES[1..], Level::Word).unwrap();

    let merged = head.merge(tail);
    assert_eq!(
        merged,
        token_accuracy_counts(&HYPOTHESES, &REFERENCES, Level::Word).unwrap()
    );
    assert_eq!(
        merged.percentage(),
        token_accuracy(&HYPOTHESES, &REFERENCES, Level::Word).unwrap()
    );
}

#[test]
fn test_sequence_accuracy_merge() {
    let head = sequence_accuracy_counts(&["a", "b"], &["a", "b"]).unwrap();
    let tail = sequence_accuracy_counts(&["c", "d"], &["c", "x"]).unwrap();
    assert_eq!(head.merge(tail), AccuracyCounts::new(3, 4));
    assert_eq!(head.merge(tail).percentage(), 75.0);
}
