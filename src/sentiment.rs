// src/sentiment.rs
//! Prediction orchestrator: normalize -> encode -> classify -> highlight.
//!
//! Stateless between calls; everything it holds is read-only and shared via `Arc`,
//! so one `SentimentAnalyzer` serves concurrent requests without locking.

use crate::config::{AppConfig, PipelineConfig};
use crate::error::{AnalyzeError, ArtifactError};
use crate::highlight::{render_html, HighlightedToken, Highlighter};
use crate::lexicon::{Lexicon, LexiconData};
use crate::model::{self, Classifier, FeatureEncoder, Label};
use crate::normalize::Normalizer;
use crate::stemmer::Stemmer;
use crate::stopwords::{BuiltinStopwords, FileStopwords, StopwordSource};
use anyhow::Context;
use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of one `analyze` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub label: Label,
    /// Class name as the model artifact spells it (e.g. "Positif").
    pub model_label: String,
    pub confidence: f64,
    pub clean_text: String,
    pub tokens: Vec<String>,
    /// Empty when highlighting is disabled.
    pub highlighted: Vec<HighlightedToken>,
}

impl Analysis {
    pub fn highlighted_html(&self) -> String {
        render_html(&self.highlighted)
    }
}

pub struct SentimentAnalyzer {
    normalizer: Normalizer,
    highlighter: Highlighter,
    encoder: Arc<dyn FeatureEncoder>,
    classifier: Arc<dyn Classifier>,
    enable_highlighting: bool,
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("normalizer", &self.normalizer)
            .field("enable_highlighting", &self.enable_highlighting)
            .field("features", &self.encoder.dim())
            .finish_non_exhaustive()
    }
}

impl SentimentAnalyzer {
    /// Wire the pipeline from already-loaded parts. `pipeline.stemmer` is not
    /// consulted here; the caller passes the stemmer it wants.
    pub fn new(
        lexicon: Arc<Lexicon>,
        stemmer: Arc<dyn Stemmer>,
        encoder: Arc<dyn FeatureEncoder>,
        classifier: Arc<dyn Classifier>,
        pipeline: PipelineConfig,
    ) -> Result<Self, ArtifactError> {
        if encoder.dim() != classifier.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "vectorizer produces {} features but classifier expects {}",
                encoder.dim(),
                classifier.n_features()
            )));
        }

        Ok(Self {
            normalizer: Normalizer::new(lexicon.clone(), stemmer)
                .with_preserve_sentiment_words(pipeline.preserve_sentiment_words),
            highlighter: Highlighter::new(lexicon),
            encoder,
            classifier,
            enable_highlighting: pipeline.enable_highlighting,
        })
    }

    /// Load lexicon, stopwords, stemmer and model artifacts named by `cfg`.
    /// Any failure here is a startup error.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let data = match &cfg.lexicon_path {
            Some(p) => LexiconData::from_path(p)?,
            None => LexiconData::embedded()?,
        };
        let source: Box<dyn StopwordSource> = match &cfg.stopwords_path {
            Some(p) => Box::new(FileStopwords::new(p)),
            None => Box::new(BuiltinStopwords),
        };
        let lexicon = Lexicon::build(data, source.as_ref()).context("building lexicon")?;

        let encoder = model::load_encoder(&cfg.vectorizer_path).context("loading vectorizer")?;
        let classifier =
            model::load_classifier(&cfg.model_path).context("loading classifier")?;

        let analyzer = Self::new(
            Arc::new(lexicon),
            cfg.pipeline.stemmer.build(),
            Arc::new(encoder),
            Arc::new(classifier),
            cfg.pipeline,
        )?;
        info!(
            model = %cfg.model_path.display(),
            vectorizer = %cfg.vectorizer_path.display(),
            stemmer = ?cfg.pipeline.stemmer,
            preserve_sentiment_words = cfg.pipeline.preserve_sentiment_words,
            enable_highlighting = cfg.pipeline.enable_highlighting,
            "sentiment analyzer ready"
        );
        Ok(analyzer)
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn analyze(&self, raw: &str) -> Result<Analysis, AnalyzeError> {
        counter!("sentiment_requests_total").increment(1);
        if raw.trim().is_empty() {
            counter!("sentiment_empty_input_total").increment(1);
            warn!("empty input rejected");
            return Err(AnalyzeError::EmptyInput);
        }

        let started = Instant::now();
        let normalized = self.normalizer.normalize(raw);
        if normalized.is_empty() {
            // Not an error: the model still classifies the empty document.
            debug!(id = %anon_hash(raw), "nothing left after normalization");
        }

        let features = self.encoder.encode(&normalized.clean_text);
        let prediction = self.classifier.predict(&features);

        let highlighted = if self.enable_highlighting {
            self.highlighter.highlight(&normalized.tokens)
        } else {
            Vec::new()
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0;
        histogram!("sentiment_analyze_ms").record(elapsed_ms);
        counter!("sentiment_predictions_total", "label" => prediction.label.as_str()).increment(1);
        debug!(
            id = %anon_hash(raw),
            tokens = normalized.tokens.len(),
            nnz = features.nnz(),
            label = %prediction.label,
            confidence = prediction.confidence,
            elapsed_ms,
            "analyzed"
        );

        Ok(Analysis {
            label: prediction.label,
            model_label: prediction.class_name,
            confidence: prediction.confidence,
            clean_text: normalized.clean_text,
            tokens: normalized.tokens,
            highlighted,
        })
    }
}

/// Short stable id for log lines; raw review text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NaiveBayesClassifier, TfidfEncoder};
    use crate::stemmer::IdentityStemmer;
    use std::collections::HashMap;

    fn analyzer(pipeline: PipelineConfig) -> SentimentAnalyzer {
        let vocab: HashMap<String, usize> = [("bagus", 0), ("error", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let enc = TfidfEncoder::new(vocab, vec![1.0, 1.0]).unwrap();
        let clf = NaiveBayesClassifier::new(
            vec!["Negatif".into(), "Positif".into()],
            vec![0.5f64.ln(), 0.5f64.ln()],
            vec![vec![-3.0, -0.5], vec![-0.5, -3.0]],
        )
        .unwrap();
        SentimentAnalyzer::new(
            Arc::new(Lexicon::indonesian_default().unwrap()),
            Arc::new(IdentityStemmer),
            Arc::new(enc),
            Arc::new(clf),
            pipeline,
        )
        .unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        let a = analyzer(PipelineConfig::default());
        assert_eq!(a.analyze(""), Err(AnalyzeError::EmptyInput));
        assert_eq!(a.analyze(" \t\n "), Err(AnalyzeError::EmptyInput));
    }

    #[test]
    fn labels_follow_model() {
        let a = analyzer(PipelineConfig::default());
        let out = a.analyze("Bagus banget!").unwrap();
        assert_eq!(out.label, Label::Positive);
        assert_eq!(out.model_label, "Positif");
        let out = a.analyze("error terus").unwrap();
        assert_eq!(out.label, Label::Negative);
    }

    #[test]
    fn highlighting_can_be_disabled() {
        let a = analyzer(PipelineConfig {
            enable_highlighting: false,
            ..PipelineConfig::default()
        });
        let out = a.analyze("bagus").unwrap();
        assert_eq!(out.tokens, vec!["bagus"]);
        assert!(out.highlighted.is_empty());
    }

    #[test]
    fn dimension_mismatch_is_fatal() {
        let enc = TfidfEncoder::new(HashMap::new(), vec![1.0; 3]).unwrap();
        let clf = NaiveBayesClassifier::new(
            vec!["Positif".into()],
            vec![0.0],
            vec![vec![0.0; 2]],
        )
        .unwrap();
        let res = SentimentAnalyzer::new(
            Arc::new(Lexicon::indonesian_default().unwrap()),
            Arc::new(IdentityStemmer),
            Arc::new(enc),
            Arc::new(clf),
            PipelineConfig::default(),
        );
        assert!(matches!(res, Err(ArtifactError::Invalid(_))));
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        assert_eq!(anon_hash("abc"), anon_hash("abc"));
        assert_eq!(anon_hash("abc").len(), 12);
        assert_ne!(anon_hash("abc"), anon_hash("abd"));
    }
}
