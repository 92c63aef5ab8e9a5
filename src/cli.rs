// src/cli.rs
//! Line-oriented driver behind the `porsi-classify` binary.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::warn;

use crate::api::BatchOutcome;
use crate::sentiment::SentimentAnalyzer;

/// Analyze one text and write its outcome as a single JSON line.
pub fn write_outcome<W: Write>(
    analyzer: &SentimentAnalyzer,
    text: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let outcome = BatchOutcome::from(analyzer.analyze(text));
    writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
    Ok(())
}

/// Classify every line of `input`, in order.
///
/// A line that is not valid UTF-8 is skipped with a warning and reading goes on
/// with the next line; any other read error aborts. Returns the number of
/// skipped lines.
pub fn classify_lines<R: BufRead, W: Write>(
    analyzer: &SentimentAnalyzer,
    input: R,
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut skipped = 0;
    for (idx, line) in input.lines().enumerate() {
        match line {
            Ok(text) => write_outcome(analyzer, &text, out)?,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                skipped += 1;
                warn!(line = idx + 1, "skipping input line that is not valid UTF-8");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading input line {}", idx + 1));
            }
        }
    }
    Ok(skipped)
}
