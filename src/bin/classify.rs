//! Command-line classifier: one JSON line per input.
//! Inputs are the CLI arguments, or stdin lines when no arguments are given.

use std::io::{self, Write};

use porsi_sentiment::cli::{classify_lines, write_outcome};
use porsi_sentiment::{AppConfig, SentimentAnalyzer};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    porsi_sentiment::init_tracing();

    let cfg = AppConfig::from_env()?;
    let analyzer = SentimentAnalyzer::from_config(&cfg)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.is_empty() {
        classify_lines(&analyzer, io::stdin().lock(), &mut out)?;
    } else {
        for text in &args {
            write_outcome(&analyzer, text, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}
