//! Report binary - scores one response and prints the analysis as JSON
//!
//! Usage:
//!   language-confusion <expected_language> [FILE]   # reads stdin when FILE is omitted
//!
//! Optional environment variables (see ScoringConfig::from_env):
//! - LC_WORDS_FILE (defaults to ./words)
//! - LC_MIN_TOKENS (defaults to 3)
//! - LC_STATISTICAL_DETECTION (defaults to true)

use anyhow::{Context, Result};
use language_confusion::{ConfusionCalculator, ScoringConfig};
use std::io::Read;
use tracing::info;

fn print_usage() {
    eprintln!("Usage: language-confusion <expected_language> [FILE]");
    eprintln!();
    eprintln!("Supported languages: ko, en, zh, ja, es, fr, de, it, pt");
}

fn read_response(path: Option<&String>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response from {}", path)),
        None => {
            let mut response = String::new();
            std::io::stdin()
                .read_to_string(&mut response)
                .context("Failed to read response from stdin")?;
            Ok(response)
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_confusion=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let expected_language = &args[1];
    let response = read_response(args.get(2))?;

    let config = ScoringConfig::from_env().context("Invalid scoring configuration")?;
    let calculator = ConfusionCalculator::new(config)?;

    info!(
        "Scoring {} bytes of response against '{}'",
        response.len(),
        expected_language
    );
    let analysis = calculator.analyze_response(&response, expected_language)?;

    info!(
        "Analyzed {} lines, confusion score {:.3}",
        analysis.summary.total_lines_analyzed, analysis.summary.language_confusion_score
    );
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    Ok(())
}
