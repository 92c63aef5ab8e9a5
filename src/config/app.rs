// src/config/app.rs
use crate::stemmer::StemmerKind;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";
pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_MODEL_PATH: &str = "SENTIMENT_MODEL_PATH";
pub const ENV_VECTORIZER_PATH: &str = "SENTIMENT_VECTORIZER_PATH";
pub const ENV_METRICS_ENABLED: &str = "METRICS_ENABLED";

fn default_model_path() -> PathBuf {
    PathBuf::from("models/naive_bayes_model.json")
}
fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("models/tfidf_vectorizer.json")
}

/// Pipeline switches; both default on (whitelist bypass + highlighting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub preserve_sentiment_words: bool,
    pub enable_highlighting: bool,
    pub stemmer: StemmerKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            preserve_sentiment_words: true,
            enable_highlighting: true,
            stemmer: StemmerKind::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Mount `/metrics` (Prometheus exposition).
    pub metrics: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    /// `None` = embedded lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// `None` = embedded stopword list.
    pub stopwords_path: Option<PathBuf>,
    pub pipeline: PipelineConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
            lexicon_path: None,
            stopwords_path: None,
            pipeline: PipelineConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML file and apply env overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Resolve config using env var + fallbacks:
    /// 1) $SENTIMENT_CONFIG_PATH (must exist)
    /// 2) config/sentiment.toml
    /// 3) built-in defaults
    pub fn from_env() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            return Self::load_from_file(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from_file(&default_p);
        }
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(p) = non_empty_env(ENV_MODEL_PATH) {
            self.model_path = PathBuf::from(p);
        }
        if let Some(p) = non_empty_env(ENV_VECTORIZER_PATH) {
            self.vectorizer_path = PathBuf::from(p);
        }
        if let Some(v) = non_empty_env(ENV_METRICS_ENABLED) {
            self.server.metrics = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
