use approx::assert_relative_eq;
use mt_eval_core::MetricsError;
use mt_eval_metrics::calculators::{
    char_error_rate, char_error_rate_report, word_error_rate, word_error_rate_report,
};
use rstest::rstest;

// ===== Word Error Rate Tests =====

#[test]
fn test_wer_identical() {
    let wer = word_error_rate(&["the cat sat"], &["the cat sat"]).unwrap();
    assert_eq!(wer, 0.0);
}

#[test]
fn test_wer_is_mean_of_pair_rates() {
    let hypotheses = ["the cat sat on the mat", "hello world"];
    let references = ["the cat sat on a mat", "hello there world"];

    let wer = word_error_rate(&hypotheses, &references).unwrap();
    // (1/6 + 1/3) / 2
    assert_relative_eq!(wer, 0.25, epsilon = 1e-12);
}

#[test]
fn test_wer_can_exceed_one() {
    let wer = word_error_rate(&["a b c d"], &["x"]).unwrap();
    assert_eq!(wer, 4.0);
}

#[test]
fn test_wer_ignores_whitespace_runs() {
    let wer = word_error_rate(&["  the   cat\tsat "], &["the cat sat"]).unwrap();
    assert_eq!(wer, 0.0);
}

#[test]
fn test_wer_empty_reference_fails() {
    let err = word_error_rate(&["a", "b"], &["a", ""]).unwrap_err();
    assert_eq!(err, MetricsError::EmptyReference { index: 1 });
}

#[test]
fn test_wer_whitespace_only_reference_fails() {
    let err = word_error_rate(&["a"], &["   "]).unwrap_err();
    assert_eq!(err, MetricsError::EmptyReference { index: 0 });
}

#[test]
fn test_wer_empty_input_fails() {
    let empty: [&str; 0] = [];
    let err = word_error_rate(&empty, &empty).unwrap_err();
    assert_eq!(err, MetricsError::EmptyInput);
}

#[test]
fn test_wer_zips_mismatched_lengths() {
    let wer = word_error_rate(&["a b", "extra"], &["a b"]).unwrap();
    assert_eq!(wer, 0.0);
}

#[test]
fn test_wer_report_exposes_pairs() {
    let report = word_error_rate_report(&["the dog", "a b c"], &["the cat", "a b c"]).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.pairs[0].edits, 1);
    assert_eq!(report.pairs[0].reference_len, 2);
    assert_eq!(report.pairs[0].rate, 0.5);
    assert_eq!(report.pairs[1].edits, 0);
    assert_eq!(report.mean().unwrap(), 0.25);
}

#[rstest]
#[case("hello world", "hello world", 0.0)]
#[case("hello earth", "hello world", 0.5)]
#[case("", "hello world", 1.0)]
#[case("hello", "hello world", 0.5)]
#[case("hello big wide world", "hello world", 1.0)]
fn test_wer_cases(#[case] hypothesis: &str, #[case] reference: &str, #[case] expected: f64) {
    let wer = word_error_rate(&[hypothesis], &[reference]).unwrap();
    assert_relative_eq!(wer, expected, epsilon = 1e-12);
}

// ===== Character Error Rate Tests =====

#[test]
fn test_cer_identical() {
    let cer = char_error_rate(&["abc def"], &["abc def"]).unwrap();
    assert_eq!(cer, 0.0);
}

#[test]
fn test_cer_returns_ratio_not_percentage() {
    let cer = char_error_rate(&["ab cd"], &["abcd"]).unwrap();
    assert_eq!(cer, 0.25);
}

#[test]
fn test_cer_normalizes_hypothesis_spacing() {
    let cer = char_error_rate(&["  ab   cd "], &["ab cd"]).unwrap();
    assert_eq!(cer, 0.0);
}

#[test]
fn test_cer_counts_characters_not_bytes() {
    let cer = char_error_rate(&["naive"], &["naïve"]).unwrap();
    assert_relative_eq!(cer, 0.2, epsilon = 1e-12);
}

#[test]
fn test_cer_empty_reference_fails() {
    let err = char_error_rate(&["abc"], &[""]).unwrap_err();
    assert_eq!(err, MetricsError::EmptyReference { index: 0 });
}

#[test]
fn test_cer_empty_input_fails() {
    let empty: Vec<String> = Vec::new();
    let err = char_error_rate(&empty, &empty).unwrap_err();
    assert_eq!(err, MetricsError::EmptyInput);
}

#[test]
fn test_cer_report_mean() {
    let report = char_error_rate_report(&["abcd", "xy"], &["abce", "xy"]).unwrap();

    assert_eq!(report.pairs[0].edits, 1);
    assert_eq!(report.pairs[0].reference_len, 4);
    assert_relative_eq!(report.mean().unwrap(), 0.125, epsilon = 1e-12);
}

#[test]
fn test_cer_emits_pair_diagnostics_when_tracing_enabled() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    let cer = tracing::subscriber::with_default(subscriber, || {
        char_error_rate(&["ab  cd"], &["abcd"]).unwrap()
    });
    assert_eq!(cer, 0.25);
}
