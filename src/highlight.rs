// src/highlight.rs
//! Token highlighting for display.
//!
//! Category priority: positive > negative > negation > plain.
//! Output is 1:1 with the input tokens (same order, same length).

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Negation,
    Plain,
}

impl Category {
    /// Display color used by `render_html`; plain tokens have none.
    pub fn color(self) -> Option<&'static str> {
        match self {
            Category::Positive => Some("green"),
            Category::Negative => Some("red"),
            Category::Negation => Some("orange"),
            Category::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedToken {
    pub token: String,
    pub category: Category,
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    lexicon: Arc<Lexicon>,
}

impl Highlighter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn categorize(&self, token: &str) -> Category {
        if self.lexicon.is_positive(token) {
            Category::Positive
        } else if self.lexicon.is_negative(token) {
            Category::Negative
        } else if self.lexicon.is_negation(token) {
            Category::Negation
        } else {
            Category::Plain
        }
    }

    pub fn highlight<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<HighlightedToken> {
        tokens
            .iter()
            .map(|t| {
                let token = t.as_ref();
                HighlightedToken {
                    token: token.to_string(),
                    category: self.categorize(token),
                }
            })
            .collect()
    }
}

/// Space-joined HTML; categorized tokens get a bold colored span.
pub fn render_html(tokens: &[HighlightedToken]) -> String {
    tokens
        .iter()
        .map(|h| {
            let text = html_escape::encode_text(&h.token);
            match h.category.color() {
                Some(color) => {
                    format!("<span style='color:{color};font-weight:bold'>{text}</span>")
                }
                None => text.into_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
