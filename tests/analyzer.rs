use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use content_moderator::analyzer::Analyzer;
use content_moderator::cache::AnalysisCache;
use content_moderator::classifier::{
    Classification, LexiconClassifier, SentimentClassifier,
};
use content_moderator::config::Settings;
use content_moderator::error::{ModeratorError, Result};
use content_moderator::model::{Emotion, SentimentLabel};
use content_moderator::moderation::ToxicityScorer;

/// Wraps the lexicon classifier and counts invocations, to observe whether
/// the analyzer hit the cache or ran inference.
struct CountingClassifier {
    inner: LexiconClassifier,
    calls: AtomicUsize,
}

impl CountingClassifier {
    fn new() -> Self {
        Self {
            inner: LexiconClassifier::new(&Settings::default()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl SentimentClassifier for CountingClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.classify(text)
    }
}

struct FailingClassifier;

impl SentimentClassifier for FailingClassifier {
    fn classify(&self, _text: &str) -> Result<Classification> {
        Err(ModeratorError::Inference("model exploded".to_string()))
    }
}

fn analyzer_with(classifier: Arc<dyn SentimentClassifier>) -> Analyzer {
    let settings = Settings::default();
    Analyzer::new(
        classifier,
        ToxicityScorer::new(&settings),
        AnalysisCache::new(64, 3600),
    )
}

#[tokio::test]
async fn repeated_analysis_hits_cache() {
    let counting = Arc::new(CountingClassifier::new());
    let analyzer = analyzer_with(counting.clone());

    let first = analyzer.analyze("This is a test message").await.unwrap();
    let second = analyzer.analyze("This is a test message").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn removal_forces_recompute() {
    let counting = Arc::new(CountingClassifier::new());
    let analyzer = analyzer_with(counting.clone());

    analyzer.analyze("some text").await.unwrap();
    analyzer.cache().remove("some text").await;
    analyzer.analyze("some text").await.unwrap();

    assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_text_is_neutral_with_confidence() {
    let analyzer = analyzer_with(Arc::new(CountingClassifier::new()));
    let result = analyzer.analyze("").await.unwrap();

    assert_eq!(result.sentiment, SentimentLabel::Neutral);
    assert!(result.confidence > 0.0);
    assert_eq!(result.dominant_emotion, Some(Emotion::Neutral));
}

#[tokio::test]
async fn positive_text_analysis() {
    let analyzer = analyzer_with(Arc::new(CountingClassifier::new()));
    let result = analyzer
        .analyze("I love this product! It's amazing!")
        .await
        .unwrap();

    assert!(result.sentiment_score > 0.0);
    assert!(matches!(
        result.sentiment,
        SentimentLabel::Positive | SentimentLabel::VeryPositive
    ));
    assert!(result.confidence > 0.5);
    assert_eq!(result.dominant_emotion, Some(Emotion::Joy));

    let sum: f32 = result.raw_scores.values().sum();
    assert!((sum - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn negative_text_analysis() {
    let analyzer = analyzer_with(Arc::new(CountingClassifier::new()));
    let result = analyzer
        .analyze("I hate this product! It's terrible!")
        .await
        .unwrap();

    assert!(result.sentiment_score < 0.0);
    assert!(matches!(
        result.sentiment,
        SentimentLabel::Negative | SentimentLabel::VeryNegative
    ));
    // "hate" and "terrible" are both on the default toxic word list.
    assert!(result.toxicity_score > 0.0);
}

#[tokio::test]
async fn scores_stay_in_range() {
    let analyzer = analyzer_with(Arc::new(CountingClassifier::new()));
    for text in [
        "",
        "Today is Sunday",
        "amazing wonderful perfect best fantastic",
        "terrible awful horrible worst hate",
        "Hello! @#$%^&*()",
    ] {
        let result = analyzer.analyze(text).await.unwrap();
        assert!((-1.0..=1.0).contains(&result.sentiment_score), "{text:?}");
        assert!((0.0..=1.0).contains(&result.confidence), "{text:?}");
        assert!((0.0..=1.0).contains(&result.toxicity_score), "{text:?}");
    }
}

#[tokio::test]
async fn classifier_failure_propagates_and_is_not_cached() {
    let analyzer = analyzer_with(Arc::new(FailingClassifier));

    assert!(analyzer.analyze("anything").await.is_err());
    // A second call fails again: the error was never cached.
    assert!(analyzer.analyze("anything").await.is_err());
}

#[tokio::test]
async fn clear_empties_the_cache() {
    let counting = Arc::new(CountingClassifier::new());
    let analyzer = analyzer_with(counting.clone());

    analyzer.analyze("first").await.unwrap();
    analyzer.analyze("second").await.unwrap();
    analyzer.cache().clear().await;
    analyzer.analyze("first").await.unwrap();
    analyzer.analyze("second").await.unwrap();

    assert_eq!(counting.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn concurrent_identical_requests_compute_once() {
    let counting = Arc::new(CountingClassifier::new());
    let analyzer = Arc::new(analyzer_with(counting.clone()));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let analyzer = analyzer.clone();
        tasks.push(tokio::spawn(async move {
            analyzer.analyze("same text every time").await.unwrap()
        }));
    }
    let mut results = Vec::new();
    for t in tasks {
        results.push(t.await.unwrap());
    }

    // The single-flight guard re-checks the cache, so only one inference ran
    // and every caller saw the identical result.
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
