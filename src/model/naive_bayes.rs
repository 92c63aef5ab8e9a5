// src/model/naive_bayes.rs
//! Multinomial Naive Bayes inference.
//!
//! JSON export shape:
//! {
//!   "classes":          ["Negatif", "Netral", "Positif"],
//!   "class_log_prior":  [-0.91, -1.20, -1.20],
//!   "feature_log_prob": [[...n_features...], [...], [...]]
//! }
//!
//! jll[c] = class_log_prior[c] + x . feature_log_prob[c]; argmax, first max wins.

use super::{read_json, Classifier, FeatureVector, Label, Prediction};
use crate::error::ArtifactError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct NaiveBayesArtifact {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    classes: Vec<(String, Label)>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl NaiveBayesClassifier {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let raw: NaiveBayesArtifact = read_json(path.as_ref())?;
        Self::new(raw.classes, raw.class_log_prior, raw.feature_log_prob)
    }

    pub fn new(
        classes: Vec<String>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self, ArtifactError> {
        if classes.is_empty() {
            return Err(ArtifactError::Invalid("model has no classes".into()));
        }
        if class_log_prior.len() != classes.len() || feature_log_prob.len() != classes.len() {
            return Err(ArtifactError::Invalid(format!(
                "{} classes but {} priors and {} feature rows",
                classes.len(),
                class_log_prior.len(),
                feature_log_prob.len()
            )));
        }
        let n_features = feature_log_prob[0].len();
        if feature_log_prob.iter().any(|row| row.len() != n_features) {
            return Err(ArtifactError::Invalid(
                "feature_log_prob rows differ in length".into(),
            ));
        }

        let classes = classes
            .into_iter()
            .map(|name| match Label::from_class_name(&name) {
                Some(label) => Ok((name, label)),
                None => Err(ArtifactError::Invalid(format!("unknown class name '{name}'"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }

    /// Joint log likelihood per class, in artifact class order.
    pub fn joint_log_likelihood(&self, x: &FeatureVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| prior + x.dot(row))
            .collect()
    }

    /// Posterior probabilities per class (softmax of the joint log likelihood).
    pub fn predict_proba(&self, x: &FeatureVector) -> Vec<f64> {
        softmax(&self.joint_log_likelihood(x))
    }
}

fn softmax(jll: &[f64]) -> Vec<f64> {
    let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / sum).collect()
}

impl Classifier for NaiveBayesClassifier {
    fn predict(&self, features: &FeatureVector) -> Prediction {
        let jll = self.joint_log_likelihood(features);
        let mut best = 0;
        for (i, v) in jll.iter().enumerate() {
            if *v > jll[best] {
                best = i;
            }
        }
        let (name, label) = &self.classes[best];
        Prediction {
            label: *label,
            class_name: name.clone(),
            confidence: softmax(&jll)[best],
        }
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
