// tests/startup.rs
//
// Startup is the only place fatal errors may occur: broken artifacts,
// lexicon or stopword sources must stop the service before it serves.

use std::fs;
use std::path::PathBuf;

use porsi_sentiment::config::app::{ENV_CONFIG_PATH, ENV_MODEL_PATH, ENV_VECTORIZER_PATH};
use porsi_sentiment::{AppConfig, SentimentAnalyzer};

fn clear_env() {
    for k in [ENV_CONFIG_PATH, ENV_MODEL_PATH, ENV_VECTORIZER_PATH] {
        std::env::remove_var(k);
    }
}

#[test]
fn missing_model_is_fatal() {
    let cfg = AppConfig {
        model_path: PathBuf::from("models/does_not_exist.json"),
        ..AppConfig::default()
    };
    let err = SentimentAnalyzer::from_config(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("loading classifier"), "{err:#}");
}

#[test]
fn corrupt_vectorizer_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("vec.json");
    fs::write(&p, r#"{"vocabulary": {"a": 0}}"#).unwrap();
    let cfg = AppConfig {
        vectorizer_path: p,
        ..AppConfig::default()
    };
    let err = SentimentAnalyzer::from_config(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("loading vectorizer"), "{err:#}");
}

#[test]
fn mismatched_artifacts_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("vec.json");
    fs::write(&p, r#"{"vocabulary": {"bagus": 0}, "idf": [1.0]}"#).unwrap();
    let cfg = AppConfig {
        vectorizer_path: p,
        ..AppConfig::default()
    };
    let err = SentimentAnalyzer::from_config(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("features"), "{err:#}");
}

#[test]
fn missing_stopword_file_is_fatal() {
    let cfg = AppConfig {
        stopwords_path: Some(PathBuf::from("/definitely/not/here/stopwords.txt")),
        ..AppConfig::default()
    };
    assert!(SentimentAnalyzer::from_config(&cfg).is_err());
}

#[test]
fn custom_lexicon_and_stopwords_are_used() {
    let dir = tempfile::tempdir().unwrap();
    let lex = dir.path().join("lex.json");
    fs::write(
        &lex,
        r#"{
            "normalization": {"mantul": "mantap"},
            "protected_stopwords": ["tidak"],
            "positive": ["mantap"],
            "negative": ["error"],
            "negation": ["tidak"]
        }"#,
    )
    .unwrap();
    let sw = dir.path().join("sw.txt");
    fs::write(&sw, "tidak\nsih\n").unwrap();

    let cfg = AppConfig {
        lexicon_path: Some(lex),
        stopwords_path: Some(sw),
        ..AppConfig::default()
    };
    let a = SentimentAnalyzer::from_config(&cfg).unwrap();
    let out = a.analyze("mantul sih, tidak error").unwrap();
    assert_eq!(out.tokens, vec!["mantap", "tidak", "error"]);
}

#[serial_test::serial]
#[tokio::test]
async fn app_refuses_to_build_without_artifacts() {
    clear_env();
    std::env::set_var(ENV_MODEL_PATH, "models/nope.json");
    let res = porsi_sentiment::app().await;
    clear_env();
    assert!(res.is_err());
}

#[serial_test::serial]
#[tokio::test]
async fn app_builds_from_repo_config() {
    clear_env();
    let res = porsi_sentiment::app().await;
    assert!(res.is_ok(), "{:?}", res.err());
}
