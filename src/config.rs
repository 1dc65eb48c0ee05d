//! Service configuration, read once from the environment at startup and
//! passed explicitly to the components that need it.

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::{ModeratorError, Result};

const DEFAULT_POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "love",
    "happy",
    "wonderful",
    "amazing",
    "fantastic",
    "best",
    "perfect",
];

const DEFAULT_NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "sad",
    "worst",
    "horrible",
    "disappointing",
    "poor",
    "negative",
];

const DEFAULT_TOXIC_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "stupid",
    "idiot",
    "dumb",
    "worthless",
    "useless",
    "trash",
];

/// Which sentiment backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Word-list scorer, no weights to download. Default.
    Lexicon,
    ModernBertBase,
    ModernBertLarge,
}

impl FromStr for ModelKind {
    type Err = ModeratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lexicon" => Ok(ModelKind::Lexicon),
            "modernbert-base" => Ok(ModelKind::ModernBertBase),
            "modernbert-large" => Ok(ModelKind::ModernBertLarge),
            other => Err(ModeratorError::Config(format!(
                "unknown model kind '{other}' (expected lexicon, modernbert-base or modernbert-large)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Expected value of the `X-API-Key` header. `None` disables auth.
    pub api_key: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub model: ModelKind,
    /// Toxicity score above which a text is flagged as toxic.
    pub toxicity_threshold: f32,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub toxic_words: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            cache_capacity: 10_000,
            cache_ttl_secs: 3600,
            model: ModelKind::Lexicon,
            toxicity_threshold: 0.5,
            positive_words: owned(DEFAULT_POSITIVE_WORDS),
            negative_words: owned(DEFAULT_NEGATIVE_WORDS),
            toxic_words: owned(DEFAULT_TOXIC_WORDS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Settings::default();
        Ok(Self {
            api_key: read_non_empty("MODERATOR_API_KEY"),
            host: read_parsed("MODERATOR_HOST", defaults.host)?,
            port: read_parsed("MODERATOR_PORT", defaults.port)?,
            cache_capacity: read_parsed("MODERATOR_CACHE_CAPACITY", defaults.cache_capacity)?,
            cache_ttl_secs: read_parsed("MODERATOR_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            model: read_parsed("MODERATOR_MODEL", defaults.model)?,
            toxicity_threshold: read_parsed(
                "MODERATOR_TOXICITY_THRESHOLD",
                defaults.toxicity_threshold,
            )?,
            positive_words: read_words("MODERATOR_POSITIVE_WORDS", defaults.positive_words),
            negative_words: read_words("MODERATOR_NEGATIVE_WORDS", defaults.negative_words),
            toxic_words: read_words("MODERATOR_TOXIC_WORDS", defaults.toxic_words),
        })
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn read_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|e| ModeratorError::Config(format!("{name}: {e}"))),
    }
}

fn read_words(name: &str, default: Vec<String>) -> Vec<String> {
    match read_non_empty(name) {
        None => default,
        Some(raw) => raw
            .split(',')
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect(),
    }
}
