// src/model/tfidf.rs
//! TF-IDF encoder over a vocabulary fitted at training time.
//!
//! JSON export shape:
//! {
//!   "vocabulary":   { "bagus": 0, "error": 1, ... },
//!   "idf":          [1.91, 2.20, ...],
//!   "norm":         "l2",          // "l1" | "l2" | null
//!   "sublinear_tf": false,
//!   "ngram_range":  [1, 1],
//!   "lowercase":    true
//! }
//!
//! Tokenization uses the `(?u)\b\w\w+\b` pattern, so one-letter tokens never
//! reach the vocabulary lookup.

use super::{read_json, FeatureEncoder, FeatureVector};
use crate::error::ArtifactError;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}
fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}
fn default_lowercase() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct TfidfEncoder {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    lowercase: bool,
}

impl TfidfEncoder {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let enc: TfidfEncoder = read_json(path.as_ref())?;
        enc.validate()?;
        Ok(enc)
    }

    /// Build directly from fitted parameters (unigrams, l2, raw tf).
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self, ArtifactError> {
        let enc = Self {
            vocabulary,
            idf,
            norm: default_norm(),
            sublinear_tf: false,
            ngram_range: default_ngram_range(),
            lowercase: default_lowercase(),
        };
        enc.validate()?;
        Ok(enc)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(ArtifactError::Invalid(format!(
                "ngram_range ({lo}, {hi}) must satisfy 1 <= min <= max"
            )));
        }
        if let Some((term, &idx)) = self.vocabulary.iter().find(|(_, &i)| i >= self.idf.len()) {
            return Err(ArtifactError::Invalid(format!(
                "vocabulary term '{term}' has index {idx} but idf has {} entries",
                self.idf.len()
            )));
        }
        Ok(())
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        static RE_TOKEN: OnceCell<Regex> = OnceCell::new();
        let re = RE_TOKEN.get_or_init(|| Regex::new(r"(?u)\b\w\w+\b").expect("token regex"));

        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let words: Vec<&str> = re.find_iter(&text).map(|m| m.as_str()).collect();

        let (lo, hi) = self.ngram_range;
        let mut grams = Vec::new();
        for n in lo..=hi.min(words.len()) {
            for window in words.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }
}

impl FeatureEncoder for TfidfEncoder {
    fn encode(&self, text: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { tf.ln() + 1.0 } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= scale;
            }
        }

        FeatureVector::from_entries(self.idf.len(), entries)
    }

    fn dim(&self) -> usize {
        self.idf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> TfidfEncoder {
        let vocab = [("bagus", 0), ("error", 1), ("tidak", 2), ("tidak bisa", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        TfidfEncoder::new(vocab, vec![1.0, 2.0, 1.5, 3.0]).unwrap()
    }

    #[test]
    fn empty_document_is_zero_vector() {
        let v = encoder().encode("");
        assert!(v.is_zero());
        assert_eq!(v.dim(), 4);
    }

    #[test]
    fn l2_normalized_weights() {
        let v = encoder().encode("bagus error error");
        // raw: bagus 1*1.0, error 2*2.0 -> norm sqrt(17)
        let n = 17f64.sqrt();
        assert_eq!(v.nnz(), 2);
        assert!((v.entries()[0].1 - 1.0 / n).abs() < 1e-12);
        assert!((v.entries()[1].1 - 4.0 / n).abs() < 1e-12);
    }

    #[test]
    fn single_letter_tokens_ignored() {
        let mut vocab = HashMap::new();
        vocab.insert("a".to_string(), 0);
        let enc = TfidfEncoder::new(vocab, vec![1.0]).unwrap();
        assert!(enc.encode("a a a").is_zero());
    }

    #[test]
    fn bigrams_when_configured() {
        let mut enc = encoder();
        enc.ngram_range = (1, 2);
        let v = enc.encode("tidak bisa");
        let cols: Vec<usize> = v.entries().iter().map(|(i, _)| *i).collect();
        assert_eq!(cols, vec![2, 3]);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut vocab = HashMap::new();
        vocab.insert("x".to_string(), 5);
        assert!(matches!(
            TfidfEncoder::new(vocab, vec![1.0]),
            Err(ArtifactError::Invalid(_))
        ));
    }
}
