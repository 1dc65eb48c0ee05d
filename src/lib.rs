//! Content moderation service: sentiment and toxicity analysis over HTTP,
//! backed by a pretrained classifier with cached inference results.

pub mod analyzer;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod moderation;
