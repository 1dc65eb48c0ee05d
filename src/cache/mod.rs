use crate::model::AnalysisResult;
use moka::future::Cache;
use std::time::Duration;

/// In-process TTL cache for analysis results, keyed by a deterministic hash
/// of the input text.
#[derive(Clone)]
pub struct AnalysisCache {
    inner: Cache<String, AnalysisResult>,
}

impl AnalysisCache {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { inner }
    }

    pub async fn get(&self, text: &str) -> Option<AnalysisResult> {
        self.inner.get(&cache_key(text)).await
    }

    pub async fn put(&self, text: &str, result: AnalysisResult) {
        self.inner.insert(cache_key(text), result).await;
    }

    pub async fn remove(&self, text: &str) {
        self.inner.invalidate(&cache_key(text)).await;
    }

    pub async fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }
}

/// Deterministic key: blake3 over the trimmed, lowercased text. Requests that
/// differ only in surrounding whitespace or case share an entry.
pub fn cache_key(text: &str) -> String {
    let normalized = text.trim().to_lowercase();
    format!("analysis:{}", blake3::hash(normalized.as_bytes()).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisResult, SentimentLabel};
    use std::collections::BTreeMap;

    fn result(score: f32) -> AnalysisResult {
        AnalysisResult {
            sentiment_score: score,
            sentiment: SentimentLabel::from_score(score),
            confidence: 0.9,
            dominant_emotion: None,
            raw_scores: BTreeMap::new(),
            toxicity_score: 0.0,
            is_toxic: false,
            analyzed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn key_is_deterministic_and_normalized() {
        assert_eq!(cache_key("Hello"), cache_key("  hello "));
        assert_ne!(cache_key("hello"), cache_key("goodbye"));
        assert!(cache_key("hello").starts_with("analysis:"));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = AnalysisCache::new(16, 60);
        let v = result(0.4);
        cache.put("k", v.clone()).await;
        assert_eq!(cache.get("k").await, Some(v));
    }

    #[tokio::test]
    async fn remove_evicts_one_key() {
        let cache = AnalysisCache::new(16, 60);
        cache.put("k", result(0.1)).await;
        cache.remove("k").await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn clear_evicts_everything() {
        let cache = AnalysisCache::new(16, 60);
        cache.put("a", result(0.1)).await;
        cache.put("b", result(-0.3)).await;
        cache.clear().await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
    }
}
