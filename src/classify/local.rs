//! Keyword classifier — deterministic local guess from free text.
//!
//! Always available and never fails, so it doubles as the fallback when
//! the remote classifier is unreachable.

use super::keywords::{
    PhraseRule, AREA_KEYWORDS, CHALLENGE_RULES, DEFAULT_CHALLENGE, DEFAULT_OBJECTIVE,
    OBJECTIVE_RULES,
};
use super::types::{BusinessArea, ClassificationGuess, RawGuess};
use super::Classifier;
use crate::error::ClassifyError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `text` into area, objective and challenge.
    ///
    /// Matching is substring-based on the lower-cased text, so a keyword
    /// can hit inside a longer word.
    pub fn classify_text(&self, text: &str) -> ClassificationGuess {
        let lower = text.to_lowercase();

        let guess = ClassificationGuess {
            area_negocio: best_area(&lower),
            objetivo: first_phrase(&lower, &OBJECTIVE_RULES)
                .unwrap_or(DEFAULT_OBJECTIVE)
                .to_string(),
            reto: first_phrase(&lower, &CHALLENGE_RULES)
                .unwrap_or(DEFAULT_CHALLENGE)
                .to_string(),
        };
        log::debug!(
            "[CLASSIFY] keyword guess: area={} objetivo={:?} reto={:?}",
            guess.area_negocio,
            guess.objetivo,
            guess.reto
        );
        guess
    }

    /// Number of distinct keywords matched per area, in declaration order.
    pub fn score_areas(&self, text: &str) -> Vec<(BusinessArea, usize)> {
        let lower = text.to_lowercase();
        AREA_KEYWORDS
            .iter()
            .map(|(area, keywords)| (*area, count_matches(&lower, keywords)))
            .collect()
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "keywords"
    }

    async fn classify(&self, text: &str) -> Result<RawGuess, ClassifyError> {
        Ok(self.classify_text(text).into())
    }
}

fn count_matches(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| lower.contains(*kw)).count()
}

/// Strictly highest score wins; earlier areas win ties; all-zero → default.
fn best_area(lower: &str) -> BusinessArea {
    let mut best = BusinessArea::DEFAULT;
    let mut best_count = 0;
    for (area, keywords) in AREA_KEYWORDS.iter() {
        let count = count_matches(lower, keywords);
        if count > best_count {
            best = *area;
            best_count = count;
        }
    }
    best
}

fn first_phrase(lower: &str, rules: &[PhraseRule]) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|rule| rule.phrase)
}
