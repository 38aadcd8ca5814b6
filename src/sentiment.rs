// src/sentiment.rs
// Lexicon-based polarity scoring. Deterministic and total: any text maps
// to either a score in [-1.0, 1.0] or None (nothing scorable), never an
// error, so low-quality input can never block ingestion.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Raw lexicon sums saturate at this many "units"; dividing by it squashes
/// the score into [-1.0, 1.0].
const SATURATION: f32 = 3.0;

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Score a text. Empty or token-free input yields `None`.
    ///
    /// Negation: a negator within the previous 1..=3 tokens inverts the
    /// sign of a word's lexicon score ("not good" counts as negative).
    pub fn score(&self, text: &str) -> Option<f32> {
        let tokens: Vec<String> = tokenize(text).collect();
        if tokens.is_empty() {
            return None;
        }

        let mut raw: i32 = 0;
        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            raw += if negated { -base } else { base };
        }

        Some((raw as f32 / SATURATION).clamp(-1.0, 1.0))
    }
}

/// Alphanumeric tokens, lower-cased. Contractions split on the apostrophe,
/// so "isn't" arrives as "isn" + "t".
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

// The n't stems come out of the tokenizer on their own ("isn't" -> "isn", "t").
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "cannot"
            | "cant"
            | "without"
            | "isn"
            | "wasn"
            | "aren"
            | "don"
            | "doesn"
            | "didn"
            | "wouldn"
            | "couldn"
            | "shouldn"
    )
}
