// src/lexicon.rs
//! Lexicon store: slang dictionary, stopwords, protected stopwords,
//! sentiment lexicons and negation markers.
//!
//! Built once at startup and shared read-only (`Arc<Lexicon>`); there is no
//! mutation API after `Lexicon::build`.
//!
//! JSON shape (`lexicon_id.json`, embedded by default):
//! {
//!   "normalization":       { "gk": "tidak", ... },
//!   "extra_stopwords":     ["saya", ...],
//!   "protected_stopwords": ["tidak", "bisa"],
//!   "positive":            ["bagus", ...],
//!   "negative":            ["error", ...],
//!   "negation":            ["tidak", ...]
//! }

use crate::error::LexiconError;
use crate::stopwords::{BuiltinStopwords, StopwordSource};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

static EMBEDDED_RAW: &str = include_str!("../lexicon_id.json");

/// Raw lexicon data as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconData {
    #[serde(default)]
    pub normalization: HashMap<String, String>,
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    #[serde(default)]
    pub protected_stopwords: Vec<String>,
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub negation: Vec<String>,
}

impl LexiconData {
    /// The lexicon compiled into the binary.
    pub fn embedded() -> Result<Self, LexiconError> {
        serde_json::from_str(EMBEDDED_RAW).map_err(LexiconError::Embedded)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| LexiconError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Frozen lookup structures used by the normalizer and the highlighter.
#[derive(Debug, Clone)]
pub struct Lexicon {
    normalization: HashMap<String, String>,
    stopwords: HashSet<String>,
    protected: HashSet<String>,
    positive: HashSet<String>,
    negative: HashSet<String>,
    negation: HashSet<String>,
}

impl Lexicon {
    /// Merge base stopwords from `source` with the data's extra stopwords.
    /// A failing source is fatal for the caller (startup error).
    pub fn build(data: LexiconData, source: &dyn StopwordSource) -> Result<Self, LexiconError> {
        let mut stopwords = source.base_stopwords()?;
        stopwords.extend(data.extra_stopwords);

        let lex = Self {
            normalization: data.normalization,
            stopwords,
            protected: data.protected_stopwords.into_iter().collect(),
            positive: data.positive.into_iter().collect(),
            negative: data.negative.into_iter().collect(),
            negation: data.negation.into_iter().collect(),
        };
        lex.report_anomalies();

        info!(
            normalization = lex.normalization.len(),
            stopwords = lex.stopwords.len(),
            positive = lex.positive.len(),
            negative = lex.negative.len(),
            negation = lex.negation.len(),
            "lexicon loaded"
        );
        Ok(lex)
    }

    /// Embedded lexicon + embedded stopword list.
    pub fn indonesian_default() -> Result<Self, LexiconError> {
        Self::build(LexiconData::embedded()?, &BuiltinStopwords)
    }

    /// Single-pass slang substitution: the mapped value is not looked up again.
    #[inline]
    pub fn normalize_token<'a>(&'a self, token: &'a str) -> &'a str {
        self.normalization
            .get(token)
            .map(String::as_str)
            .unwrap_or(token)
    }

    /// Stopword filter rule: keep unless a stopword, but protected and
    /// positive-lexicon tokens always survive.
    #[inline]
    pub fn keeps(&self, token: &str) -> bool {
        !self.stopwords.contains(token) || self.protected.contains(token) || self.positive.contains(token)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn is_protected(&self, token: &str) -> bool {
        self.protected.contains(token)
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negation.contains(token)
    }

    // Warn-only: the source data never enforced these.
    fn report_anomalies(&self) {
        let mut chained: Vec<&str> = self
            .normalization
            .iter()
            .filter(|(_, v)| self.normalization.contains_key(v.as_str()))
            .map(|(k, _)| k.as_str())
            .collect();
        if !chained.is_empty() {
            chained.sort_unstable();
            warn!(keys = ?chained, "normalization entries map onto other keys; only one pass is applied");
        }

        let mut both: Vec<&str> = self
            .positive
            .intersection(&self.negative)
            .map(String::as_str)
            .collect();
        if !both.is_empty() {
            both.sort_unstable();
            warn!(tokens = ?both, "tokens in both positive and negative lexicons; positive wins");
        }

        let mut neg_overlap: Vec<&str> = self
            .negation
            .iter()
            .filter(|t| self.positive.contains(*t) || self.negative.contains(*t))
            .map(String::as_str)
            .collect();
        if !neg_overlap.is_empty() {
            neg_overlap.sort_unstable();
            warn!(tokens = ?neg_overlap, "negation markers overlap sentiment lexicons");
        }
    }
}
