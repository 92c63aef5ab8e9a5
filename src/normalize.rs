// src/normalize.rs
//! Text normalizer: raw review text -> (clean text, tokens).
//!
//! Stage order matters; each stage assumes the previous ones ran:
//! 1) Unicode lowercase
//! 2) NFKC
//! 3) delete digits
//! 4) everything outside `a-z` / whitespace -> one space
//! 5) whitespace split
//! 6) slang substitution (single pass)
//! 7) stopword filter (protected + positive words survive)
//! 8) stemming, positive words bypassed when `preserve_sentiment_words`
//! 9) join with single spaces

use crate::lexicon::Lexicon;
use crate::stemmer::Stemmer;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Output of `Normalizer::normalize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedText {
    pub clean_text: String,
    pub tokens: Vec<String>,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Clone)]
pub struct Normalizer {
    lexicon: Arc<Lexicon>,
    stemmer: Arc<dyn Stemmer>,
    preserve_sentiment_words: bool,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("preserve_sentiment_words", &self.preserve_sentiment_words)
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn new(lexicon: Arc<Lexicon>, stemmer: Arc<dyn Stemmer>) -> Self {
        Self {
            lexicon,
            stemmer,
            preserve_sentiment_words: true,
        }
    }

    /// Toggle the positive-lexicon stemming bypass (on by default).
    pub fn with_preserve_sentiment_words(mut self, on: bool) -> Self {
        self.preserve_sentiment_words = on;
        self
    }

    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let tokens: Vec<String> = clean_surface(raw)
            .split_whitespace()
            .map(|t| self.lexicon.normalize_token(t))
            .filter(|t| self.lexicon.keeps(t))
            .map(|t| self.reduce(t))
            .filter(|t| !t.is_empty())
            .collect();

        NormalizedText {
            clean_text: tokens.join(" "),
            tokens,
        }
    }

    fn reduce(&self, token: &str) -> String {
        if self.preserve_sentiment_words && self.lexicon.is_positive(token) {
            token.to_string()
        } else {
            self.stemmer.stem(token)
        }
    }
}

/// Stages 1–4: lowercase, NFKC, drop digits, non `[a-z\s]` -> space.
pub fn clean_surface(raw: &str) -> String {
    static RE_DIGITS: OnceCell<Regex> = OnceCell::new();
    static RE_NON_ALPHA: OnceCell<Regex> = OnceCell::new();
    let re_digits = RE_DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digits regex"));
    let re_non_alpha =
        RE_NON_ALPHA.get_or_init(|| Regex::new(r"[^a-z\s]").expect("non-alpha regex"));

    let lowered = raw.to_lowercase();
    let composed: String = lowered.nfkc().collect();
    let no_digits = re_digits.replace_all(&composed, "");
    re_non_alpha.replace_all(&no_digits, " ").into_owned()
}
