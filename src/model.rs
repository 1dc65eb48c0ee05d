use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Discrete sentiment bucket derived from the scalar score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLabel {
    /// Thresholds partition [-1, 1] at -0.5, -0.2, 0.2 and 0.5.
    pub fn from_score(score: f32) -> Self {
        if score < -0.5 {
            SentimentLabel::VeryNegative
        } else if score < -0.2 {
            SentimentLabel::Negative
        } else if score < 0.2 {
            SentimentLabel::Neutral
        } else if score < 0.5 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::VeryPositive
        }
    }
}

/// Coarse emotion tag, only produced for models without the 5-star class set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disappointment,
    Neutral,
    Joy,
}

impl Emotion {
    pub fn from_score(score: f32) -> Self {
        if score < -0.5 {
            Emotion::Anger
        } else if score < 0.0 {
            Emotion::Disappointment
        } else if score < 0.5 {
            Emotion::Neutral
        } else {
            Emotion::Joy
        }
    }
}

/// Complete analysis of one text. Cached and returned to clients verbatim,
/// so a cache hit reproduces the original response including `analyzed_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Polarity in [-1, 1].
    pub sentiment_score: f32,
    pub sentiment: SentimentLabel,
    /// Maximum class probability, in [0, 1].
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_emotion: Option<Emotion>,
    /// Class name -> probability, summing to ~1.
    pub raw_scores: BTreeMap<String, f32>,
    pub toxicity_score: f32,
    pub is_toxic: bool,
    pub analyzed_at: DateTime<Utc>,
}
