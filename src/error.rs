// src/error.rs
//! Error types for the pipeline and its startup artifacts.
//!
//! Two families:
//! - request-level (`AnalyzeError`): benign, surfaced to the caller as a warning
//! - startup-level (`ArtifactError`, `LexiconError`): fatal, the service must not start

use std::path::PathBuf;
use thiserror::Error;

/// Request-level errors returned by `SentimentAnalyzer::analyze`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Input was empty or whitespace-only; the pipeline did not run.
    #[error("input text is empty")]
    EmptyInput,
}

impl AnalyzeError {
    /// User-facing warning text for presentation surfaces.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalyzeError::EmptyInput => "Silakan masukkan teks terlebih dahulu.",
        }
    }
}

/// Failure to load or validate a classifier / vectorizer artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("reading artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact: {0}")]
    Invalid(String),
}

/// Failure to build the lexicon store.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing lexicon {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("embedded lexicon is malformed: {0}")]
    Embedded(#[source] serde_json::Error),
    #[error("stopword source returned no words")]
    EmptyStopwords,
}
