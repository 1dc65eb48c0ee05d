//! Word-list classifier. Deterministic and dependency-free: counts positive
//! and negative word occurrences and turns the counts into a 3-class
//! distribution. The default backend, and the one the test suite runs on.

use super::{ClassScore, Classification, SentimentClassifier};
use crate::config::Settings;
use crate::error::Result;

pub struct LexiconClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl LexiconClassifier {
    pub fn new(settings: &Settings) -> Self {
        Self {
            positive: lowercased(&settings.positive_words),
            negative: lowercased(&settings.negative_words),
        }
    }
}

fn lowercased(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn count_matches(words: &[String], text: &str) -> usize {
    words.iter().filter(|w| text.contains(w.as_str())).count()
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let text = text.to_lowercase();
        let pos = count_matches(&self.positive, &text);
        let neg = count_matches(&self.negative, &text);
        let total = pos + neg;

        // No matched words reads as fully neutral. Otherwise the neutral mass
        // shrinks as more sentiment words match, and the rest is split by the
        // positive fraction.
        let (p_neg, p_neu, p_pos) = if total == 0 {
            (0.0, 1.0, 0.0)
        } else {
            let neutral = 1.0 / (total as f32 + 1.0);
            let pos_frac = pos as f32 / total as f32;
            (
                (1.0 - neutral) * (1.0 - pos_frac),
                neutral,
                (1.0 - neutral) * pos_frac,
            )
        };

        Ok(Classification {
            classes: vec![
                ClassScore {
                    label: "negative".to_string(),
                    probability: p_neg,
                },
                ClassScore {
                    label: "neutral".to_string(),
                    probability: p_neu,
                },
                ClassScore {
                    label: "positive".to_string(),
                    probability: p_pos,
                },
            ],
        })
    }
}
