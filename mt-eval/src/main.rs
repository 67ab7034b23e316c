use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mt_eval_core::{EvalMetric, Level};
use mt_eval_metrics::calculators::{character_f_score, corpus_bleu_score, evaluate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

/// Score machine translation hypotheses against reference translations
#[derive(Debug, Parser)]
#[command(name = "mt-eval", version, about)]
struct Cli {
    /// File with one hypothesis segment per line
    #[arg(long)]
    hypotheses: PathBuf,

    /// File with one reference segment per line
    #[arg(long)]
    references: PathBuf,

    /// Metric to compute (repeatable); defaults to the configured metrics
    #[arg(short, long = "metric")]
    metrics: Vec<EvalMetric>,

    /// Segmentation level for token accuracy (word, bpe, char)
    #[arg(short, long)]
    level: Option<Level>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// One line per metric
    Text,
    /// A JSON object keyed by metric name
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let metrics = if cli.metrics.is_empty() {
        config.metrics.clone()
    } else {
        cli.metrics.clone()
    };
    let level = cli.level.unwrap_or(config.level);

    let hypotheses = read_segments(&cli.hypotheses)?;
    let references = read_segments(&cli.references)?;
    tracing::info!(
        hypotheses = hypotheses.len(),
        references = references.len(),
        %level,
        "Loaded segments"
    );
    if hypotheses.len() != references.len() {
        tracing::warn!("Hypothesis and reference files differ in length");
    }

    let mut scores = serde_json::Map::new();
    let mut lines = Vec::with_capacity(metrics.len());

    for metric in metrics {
        let (score, line) = match metric {
            EvalMetric::Bleu => {
                let bleu = corpus_bleu_score(&hypotheses, &references)?;
                (bleu.score, bleu.to_string())
            }
            EvalMetric::Chrf => {
                let chrf = character_f_score(&hypotheses, &references);
                (chrf.score, chrf.to_string())
            }
            other => {
                let score = evaluate(other, &hypotheses, &references, level)
                    .with_context(|| format!("Failed to compute {}", other))?;
                (score, format!("{} = {:.4}", other, score))
            }
        };
        scores.insert(metric.to_string(), serde_json::json!(score));
        lines.push(line);
    }

    match cli.format {
        OutputFormat::Text => {
            for line in lines {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }
    }

    Ok(())
}

fn read_segments(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(contents.lines().map(str::to_string).collect())
}
