use anyhow::{bail, Context, Result};
use clap::Parser;
use dnsfp::classify::{self, ClassificationResult, ClassifierConfig, QualityStats};
use dnsfp::cli::{Cli, OutputFormat};
use dnsfp::corpus::Corpus;
use dnsfp::cost::{CostConfig, CostTable};
use dnsfp::sequence::Sequence;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    run(cli)
}

fn init_tracing(debug: bool) {
    let default_directive = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ClassifierConfig {
        k: cli.k,
        exact_k: cli.exact_k,
        distance_threshold: cli.distance_threshold,
    };
    config.validate()?;

    let table = load_cost_table(cli.cost_config.as_deref())?;
    let corpus = load_corpus(&cli.corpus)?;
    if corpus.is_empty() {
        bail!(
            "corpus `{}` contains no labelled sequences",
            cli.corpus.display()
        );
    }
    info!(
        labels = corpus.label_count(),
        sequences = corpus.sequence_count(),
        "corpus loaded"
    );

    let results = match (&cli.queries, cli.cross_validate) {
        (Some(path), _) => {
            let queries = load_queries(path)?;
            info!(queries = queries.len(), k = config.k, "classifying");
            classify::classify_all(&corpus, &queries, &table, &config)
        }
        (None, true) => {
            info!(k = config.k, "cross-validating corpus");
            classify::cross_validate(&corpus, &table, &config)
        }
        (None, false) => {
            bail!("nothing to classify: pass a queries file or --cross-validate")
        }
    };

    print_results(&results, cli.format)?;

    if cli.stats {
        if results.iter().all(|result| result.label.is_none()) {
            warn!("statistics need ground-truth labels, run with --cross-validate");
        } else {
            println!("{}", QualityStats::csv_header());
            for stats in QualityStats::aggregate(config.k, &results) {
                println!("{}", stats.to_csv_row());
            }
        }
    }
    Ok(())
}

fn load_cost_table(path: Option<&Path>) -> Result<CostTable> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read cost config `{}`", path.display()))?;
            let config: CostConfig = toml::from_str(&raw)
                .with_context(|| format!("failed to parse cost config `{}`", path.display()))?;
            Ok(CostTable::new(&config)?)
        }
        None => Ok(CostTable::shared_default().clone()),
    }
}

fn load_corpus(path: &Path) -> Result<Corpus> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse corpus `{}`", path.display()))
}

fn load_queries(path: &Path) -> Result<Vec<Sequence>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read queries `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse queries `{}`", path.display()))
}

fn print_results(results: &[ClassificationResult], format: OutputFormat) -> Result<()> {
    for result in results {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(result)?),
            OutputFormat::Text => {
                let predicted = result.predicted_label().unwrap_or("-");
                let quality = match &result.label {
                    Some(real) => result.determine_quality(real),
                    None => result.quality(),
                };
                match &result.reason {
                    Some(reason) => {
                        println!("{}: {} ({}) [{}]", result.id, predicted, quality, reason)
                    }
                    None => println!("{}: {} ({})", result.id, predicted, quality),
                }
            }
        }
    }
    Ok(())
}
