// src/model/mod.rs
//! Inference-side model artifacts: feature encoder + classifier.
//!
//! Both are loaded once at startup from JSON exports and are read-only afterwards.

pub mod naive_bayes;
pub mod tfidf;

use crate::error::ArtifactError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub use naive_bayes::NaiveBayesClassifier;
pub use tfidf::TfidfEncoder;

/// Sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// Map a model-side class name (Indonesian or English, any case).
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "positif" | "positive" | "pos" => Some(Label::Positive),
            "negatif" | "negative" | "neg" => Some(Label::Negative),
            "netral" | "neutral" | "neu" => Some(Label::Neutral),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse feature row: `(column, weight)` pairs sorted by column, no zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// All-zero vector of the given dimension (empty document).
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Entries are sorted and zero weights dropped; out-of-range columns are ignored.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(i, w)| i < dim && w != 0.0);
        entries.sort_by_key(|&(i, _)| i);
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with a dense row of length `dim`.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(i, w)| w * dense.get(i).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Turns normalized text into a feature vector with a fixed vocabulary.
pub trait FeatureEncoder: Send + Sync {
    fn encode(&self, text: &str) -> FeatureVector;
    fn dim(&self) -> usize;
}

/// A single prediction with its class probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Class name as stored in the model artifact (e.g. "Positif").
    pub class_name: String,
    pub confidence: f64,
}

pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Prediction;
    /// Number of input features the model expects.
    fn n_features(&self) -> usize;
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a TF-IDF vectorizer export.
pub fn load_encoder<P: AsRef<Path>>(path: P) -> Result<TfidfEncoder, ArtifactError> {
    TfidfEncoder::from_path(path)
}

/// Load a Naive Bayes model export.
pub fn load_classifier<P: AsRef<Path>>(path: P) -> Result<NaiveBayesClassifier, ArtifactError> {
    NaiveBayesClassifier::from_path(path)
}
