// src/stopwords.rs
//! Base stopword sources.
//!
//! The lexicon store only needs `base_stopwords()`; where the words come from is
//! the source's business. Two sources ship: the embedded Indonesian list and a
//! plain-text file (one word per line, `#` starts a comment).

use crate::error::LexiconError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

static BUILTIN_RAW: &str = include_str!("../stopwords_id.txt");

/// Capability that yields the base linguistic stopword set.
pub trait StopwordSource: Send + Sync {
    fn base_stopwords(&self) -> Result<HashSet<String>, LexiconError>;
}

/// Embedded Indonesian stopword list (Sastrawi default dictionary).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStopwords;

impl StopwordSource for BuiltinStopwords {
    fn base_stopwords(&self) -> Result<HashSet<String>, LexiconError> {
        non_empty(parse_word_list(BUILTIN_RAW))
    }
}

/// Stopwords read from a text file at startup.
#[derive(Debug, Clone)]
pub struct FileStopwords {
    path: PathBuf,
}

impl FileStopwords {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StopwordSource for FileStopwords {
    fn base_stopwords(&self) -> Result<HashSet<String>, LexiconError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| LexiconError::Io {
            path: self.path.clone(),
            source,
        })?;
        non_empty(parse_word_list(&raw))
    }
}

/// One word per line; blank lines and `#` comments are skipped, words are lowercased.
pub fn parse_word_list(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(|l| l.split('#').next().unwrap_or_default().trim())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

fn non_empty(words: HashSet<String>) -> Result<HashSet<String>, LexiconError> {
    if words.is_empty() {
        return Err(LexiconError::EmptyStopwords);
    }
    Ok(words)
}
