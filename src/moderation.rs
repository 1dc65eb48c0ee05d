//! Toxicity scoring over a configured word list. The score is the fraction of
//! list words found in the text, capped at 1.0.

use crate::config::Settings;

pub struct ToxicityScorer {
    words: Vec<String>,
    threshold: f32,
}

impl ToxicityScorer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            words: settings
                .toxic_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            threshold: settings.toxicity_threshold,
        }
    }

    pub fn score(&self, text: &str) -> f32 {
        if self.words.is_empty() {
            return 0.0;
        }
        let text = text.to_lowercase();
        let matched = self.words.iter().filter(|w| text.contains(w.as_str())).count();
        (matched as f32 / self.words.len() as f32).min(1.0)
    }

    pub fn is_toxic(&self, score: f32) -> bool {
        score > self.threshold
    }
}
