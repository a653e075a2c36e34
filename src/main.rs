//! Review Sentiment CLI
//!
//! Scores review text, validates scores against star ratings and prints
//! summaries.
//!
//! ```bash
//! review-sentiment score --input reviews.jsonl --output scored.json
//! review-sentiment validate --input scored.json --sample-size 1000
//! review-sentiment summary --input scored.json
//! review-sentiment findings --input reviews.csv
//! review-sentiment demo
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use review_sentiment::data::{load_dataset, write_json};
use review_sentiment::logging::setup_logging;
use review_sentiment::{
    BatchSentimentEngine, Config, Dataset, FindingsReport, LexiconScorer, PolarityScorer,
    ReviewRow, SummaryReporter, ValidationEngine,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(version, about = "Sentiment scoring and rating validation for product reviews")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Polarity model used for scoring
    #[arg(long, global = true, value_enum, default_value_t = ScorerKind::Lexicon)]
    scorer: ScorerKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScorerKind {
    /// Built-in review lexicon
    Lexicon,
    /// VADER (requires the `vader` feature)
    Vader,
}

type Engine = BatchSentimentEngine<Box<dyn PolarityScorer>>;

#[derive(Subcommand)]
enum Commands {
    /// Score review texts and write the augmented dataset
    Score {
        /// Input dataset (.json, .jsonl or .csv)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Texts per batch
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Validate scores against ratings on a reproducible sample
    Validate {
        /// Input dataset; scored here if it carries no sentiment
        #[arg(short, long)]
        input: PathBuf,

        /// Number of rows to sample
        #[arg(short, long)]
        sample_size: Option<usize>,

        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Summarize sentiment over the whole dataset
    Summary {
        /// Input dataset; scored here if it carries no sentiment
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the key findings report
    Findings {
        /// Input dataset; scored here if it carries no sentiment
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Run the pipeline on built-in sample reviews
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    setup_logging(level);

    match cli.command {
        Commands::Score {
            input,
            output,
            batch_size,
        } => {
            let mut batch = config.batch.clone();
            if let Some(size) = batch_size {
                batch.batch_size = size;
            }
            let engine = BatchSentimentEngine::new(build_scorer(cli.scorer)?).with_config(batch);

            let dataset = load(&input)?;
            let scored = score_with_bar(&engine, dataset)?;
            write_json(&output, &scored)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {} scored reviews to {}", scored.len(), output.display());
        }

        Commands::Validate {
            input,
            sample_size,
            seed,
        } => {
            let mut validator = ValidationEngine::new(config.validation.clone());
            if let Some(size) = sample_size {
                validator = validator.with_sample_size(size);
            }
            if let Some(seed) = seed {
                validator = validator.with_seed(seed);
            }

            let dataset = load_scored(&input, &config, cli.scorer)?;
            let report = validator.validate(&dataset)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Summary { input } => {
            let dataset = load_scored(&input, &config, cli.scorer)?;
            let summary = SummaryReporter::new().summarize(&dataset)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Findings { input } => {
            let dataset = load_scored(&input, &config, cli.scorer)?;
            let validator = ValidationEngine::new(config.validation.clone());
            let report = FindingsReport::build(&dataset, &validator)?;
            println!("{report}");
        }

        Commands::Demo => run_demo(&config, cli.scorer)?,
    }

    Ok(())
}

fn load(path: &Path) -> Result<Dataset> {
    load_dataset(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn build_scorer(kind: ScorerKind) -> Result<Box<dyn PolarityScorer>> {
    match kind {
        ScorerKind::Lexicon => Ok(Box::new(LexiconScorer::new())),
        #[cfg(feature = "vader")]
        ScorerKind::Vader => Ok(Box::new(review_sentiment::VaderScorer::new())),
        #[cfg(not(feature = "vader"))]
        ScorerKind::Vader => anyhow::bail!("VADER scoring needs a build with `--features vader`"),
    }
}

/// Load a dataset, scoring it unless every row already carries a score
fn load_scored(path: &Path, config: &Config, scorer: ScorerKind) -> Result<Dataset> {
    let dataset = load(path)?;
    if dataset.is_scored() {
        return Ok(dataset);
    }
    let engine = BatchSentimentEngine::new(build_scorer(scorer)?).with_config(config.batch.clone());
    score_with_bar(&engine, dataset)
}

fn score_with_bar(engine: &Engine, dataset: Dataset) -> Result<Dataset> {
    dataset.ensure_unscored()?;

    let pb = ProgressBar::new(dataset.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let scores = {
        let texts = dataset.texts();
        engine.score_with_progress(&texts, |p| pb.set_position(p.processed as u64))?
    };
    pb.finish_and_clear();

    Ok(dataset.with_scores(scores)?)
}

fn run_demo(config: &Config, scorer: ScorerKind) -> Result<()> {
    let reviews = [
        ("I love this product! It's amazing and works perfectly.", 5),
        ("Terrible quality, would not recommend to anyone.", 1),
        ("It's okay, nothing special but decent for the price.", 3),
        ("Outstanding! Exceeded all my expectations.", 5),
        ("Waste of money, completely useless product.", 1),
    ];
    let rows = reviews
        .iter()
        .map(|&(text, rating)| ReviewRow::new(text, rating))
        .collect::<Vec<_>>();

    let engine = BatchSentimentEngine::new(build_scorer(scorer)?).with_config(config.batch.clone());
    let scored = engine.analyze_dataset(Dataset::new(rows))?;

    let validation = ValidationEngine::new(config.validation.clone()).validate(&scored)?;
    let summary = SummaryReporter::new().summarize(&scored)?;

    println!("{}", "=".repeat(60));
    println!("Sentiment Analysis Results");
    println!("{}", "=".repeat(60));
    for row in scored.rows() {
        println!(
            "[{:>8}] {:+.3}  ({} stars) {}",
            row.sentiment_category().map(|c| c.as_str()).unwrap_or("-"),
            row.sentiment().unwrap_or_default(),
            row.rating,
            row.text
        );
    }
    println!();
    println!("Correlation: {:.3}", validation.correlation);
    println!("Mean sentiment: {:.3}", summary.basic_stats.mean_sentiment);
    println!(
        "Sentiment distribution: negative={}, neutral={}, positive={}",
        summary.distribution.negative, summary.distribution.neutral, summary.distribution.positive
    );
    println!("Anomaly rate: {:.1}%", validation.anomaly_rate * 100.0);

    Ok(())
}
