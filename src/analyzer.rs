//! Cache-or-compute orchestration around the sentiment classifier.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::cache::AnalysisCache;
use crate::classifier::SentimentClassifier;
use crate::error::{ModeratorError, Result};
use crate::model::{AnalysisResult, Emotion, SentimentLabel};
use crate::moderation::ToxicityScorer;

pub struct Analyzer {
    classifier: Arc<dyn SentimentClassifier>,
    toxicity: ToxicityScorer,
    cache: AnalysisCache,
    // At most one inference runs per process. Concurrent requests queue here.
    inference: Mutex<()>,
}

impl Analyzer {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        toxicity: ToxicityScorer,
        cache: AnalysisCache,
    ) -> Self {
        Self {
            classifier,
            toxicity,
            cache,
            inference: Mutex::new(()),
        }
    }

    /// Returns the cached result for `text` if present, otherwise runs the
    /// classifier, caches the result and returns it. Classifier failures
    /// propagate unchanged; nothing is cached on failure.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        if let Some(hit) = self.cache.get(text).await {
            info!("cache hit");
            return Ok(hit);
        }

        let _guard = self.inference.lock().await;
        // A concurrent request for the same text may have filled the cache
        // while we waited for the guard.
        if let Some(hit) = self.cache.get(text).await {
            return Ok(hit);
        }

        let classifier = Arc::clone(&self.classifier);
        let owned = text.to_string();
        let classification = tokio::task::spawn_blocking(move || classifier.classify(&owned))
            .await
            .map_err(|e| ModeratorError::Inference(format!("inference task failed: {e}")))??;

        let score = classification.sentiment_score();
        let toxicity_score = self.toxicity.score(text);
        let result = AnalysisResult {
            sentiment_score: score,
            sentiment: SentimentLabel::from_score(score),
            confidence: classification.confidence(),
            dominant_emotion: (!classification.is_five_class())
                .then(|| Emotion::from_score(score)),
            raw_scores: classification
                .classes
                .iter()
                .map(|c| (c.label.clone(), c.probability))
                .collect(),
            toxicity_score,
            is_toxic: self.toxicity.is_toxic(toxicity_score),
            analyzed_at: chrono::Utc::now(),
        };

        self.cache.put(text, result.clone()).await;
        Ok(result)
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }
}
