use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use content_moderator::analyzer::Analyzer;
use content_moderator::cache::AnalysisCache;
use content_moderator::classifier::{
    LexiconClassifier, ModernBertClassifier, ModernBertSize, SentimentClassifier,
};
use content_moderator::config::{ModelKind, Settings};
use content_moderator::gateway::{api_router, AppState};
use content_moderator::moderation::ToxicityScorer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env().context("loading settings")?;

    // Model weights load synchronously, before the listener comes up.
    let classifier: Arc<dyn SentimentClassifier> = match settings.model {
        ModelKind::Lexicon => Arc::new(LexiconClassifier::new(&settings)),
        ModelKind::ModernBertBase => Arc::new(
            ModernBertClassifier::load(ModernBertSize::Base)
                .context("loading modernbert-base")?,
        ),
        ModelKind::ModernBertLarge => Arc::new(
            ModernBertClassifier::load(ModernBertSize::Large)
                .context("loading modernbert-large")?,
        ),
    };

    let cache = AnalysisCache::new(settings.cache_capacity, settings.cache_ttl_secs);
    let analyzer = Analyzer::new(classifier, ToxicityScorer::new(&settings), cache);

    let state = Arc::new(AppState {
        analyzer,
        api_key: settings.api_key.clone(),
    });
    let app = api_router(state);

    let addr = SocketAddr::new(settings.host, settings.port);
    tracing::info!("content moderator listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
