//! Sentiment classifiers: text in, ordered class probabilities out.
//!
//! Scoring is generic over the class set. A 5-class model is treated as a
//! star rating (1..5) and collapsed with a weighted sum; anything else is
//! scored as `p(positive) - p(negative)` by label name.

pub mod lexicon;
pub mod modernbert;

pub use lexicon::LexiconClassifier;
pub use modernbert::{ModernBertClassifier, ModernBertSize};

use crate::error::Result;

/// One output class with its probability. Order follows the model's class ids.
#[derive(Debug, Clone)]
pub struct ClassScore {
    pub label: String,
    pub probability: f32,
}

/// Raw classifier output for a single text.
#[derive(Debug, Clone)]
pub struct Classification {
    pub classes: Vec<ClassScore>,
}

impl Classification {
    /// Maximum class probability.
    pub fn confidence(&self) -> f32 {
        self.classes
            .iter()
            .map(|c| c.probability)
            .fold(0.0, f32::max)
            .clamp(0.0, 1.0)
    }

    /// Polarity in [-1, 1].
    ///
    /// 5-class: `(sum(p_i * i) - 3) / 2` over star indices 1..5.
    /// Otherwise: `p(positive) - p(negative)`.
    pub fn sentiment_score(&self) -> f32 {
        let score = if self.is_five_class() {
            let weighted: f32 = self
                .classes
                .iter()
                .enumerate()
                .map(|(i, c)| c.probability * (i as f32 + 1.0))
                .sum();
            (weighted - 3.0) / 2.0
        } else {
            self.probability_of("positive") - self.probability_of("negative")
        };
        score.clamp(-1.0, 1.0)
    }

    pub fn is_five_class(&self) -> bool {
        self.classes.len() == 5
    }

    fn probability_of(&self, label: &str) -> f32 {
        self.classes
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
            .map(|c| c.probability)
            .unwrap_or(0.0)
    }
}

/// A sentiment backend. Must be deterministic for identical text, since
/// results are cached and served verbatim.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification>;
}
