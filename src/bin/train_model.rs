use anyhow::{Context, Result};
use clap::Parser;
use dga_detector::app::batch_pipeline::parse_domain_list;
use dga_detector::core::model::DEFAULT_MODEL_PATH;
use dga_detector::core::training::{random_labels, ModelTrainer, DEFAULT_RANDOM_SAMPLES, DEFAULT_SEED};
use dga_detector::utils::logger;

#[derive(Parser)]
#[command(name = "dga-train")]
#[command(about = "Train the character transition model used by dga-detector")]
struct Args {
    /// Text corpus of legitimate names or prose, one entry per line
    #[arg(long)]
    corpus: String,

    /// Known-legitimate labels for threshold selection (defaults to the corpus)
    #[arg(long)]
    good: Option<String>,

    /// Known-gibberish labels for threshold selection (defaults to random strings)
    #[arg(long)]
    bad: Option<String>,

    /// How many random strings to generate when --bad is not given
    #[arg(long, default_value_t = DEFAULT_RANDOM_SAMPLES)]
    random_samples: usize,

    /// Seed for the random strings
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Where to write the model artifact
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    output: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn read_lines(path: &str) -> Result<Vec<String>> {
    let data = std::fs::read(path).with_context(|| format!("cannot read '{}'", path))?;
    Ok(parse_domain_list(&data))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Training transition model from {}", args.corpus);
    let corpus = read_lines(&args.corpus)?;
    tracing::info!("📚 {} corpus lines", corpus.len());

    let mut trainer = ModelTrainer::new(corpus);
    if let Some(good) = &args.good {
        trainer = trainer.with_good(read_lines(good)?);
    }
    let bad = match &args.bad {
        Some(path) => read_lines(path)?,
        None => {
            tracing::info!(
                "🎲 No bad samples given, generating {} random strings (seed {})",
                args.random_samples,
                args.seed
            );
            random_labels(args.random_samples, args.seed)
        }
    };
    trainer = trainer.with_bad(bad);

    let (model, summary) = trainer.train().context("training failed")?;

    if summary.separable() {
        tracing::info!(
            "✅ Samples separate cleanly: min good {:.4} > max bad {:.4}",
            summary.min_good,
            summary.max_bad
        );
    } else {
        tracing::warn!(
            "⚠️ Samples overlap: min good {:.4} <= max bad {:.4}",
            summary.min_good,
            summary.max_bad
        );
    }
    tracing::info!(
        "🎯 Threshold {:.6}, accuracy {:.2}% over {} good / {} bad samples",
        summary.threshold,
        summary.accuracy() * 100.0,
        summary.good_samples,
        summary.bad_samples
    );

    model
        .write_to_file(&args.output)
        .with_context(|| format!("cannot write model to '{}'", args.output))?;
    println!("📁 Model saved to: {}", args.output);

    Ok(())
}
