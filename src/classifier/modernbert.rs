//! ModernBERT sequence-classification backend, run locally on CPU via candle.
//! Weights and tokenizer are fetched from the Hugging Face hub once, at load
//! time; inference itself is fully offline.

use std::collections::HashMap;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::VarBuilder;
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config, ModernBertForSequenceClassification,
};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::info;

use super::{ClassScore, Classification, SentimentClassifier};
use crate::error::{ModeratorError, Result};

#[derive(Debug, Clone, Copy)]
pub enum ModernBertSize {
    Base,
    Large,
}

impl ModernBertSize {
    fn repo_id(self) -> &'static str {
        match self {
            ModernBertSize::Base => "clapAI/modernBERT-base-multilingual-sentiment",
            ModernBertSize::Large => "clapAI/modernBERT-large-multilingual-sentiment",
        }
    }
}

pub struct ModernBertClassifier {
    model: ModernBertForSequenceClassification,
    tokenizer: Tokenizer,
    /// Class names ordered by class id, as declared in the hub config.
    labels: Vec<String>,
    device: Device,
}

impl ModernBertClassifier {
    pub fn load(size: ModernBertSize) -> Result<Self> {
        let device = Device::Cpu;
        let repo_id = size.repo_id();

        let api = Api::new().map_err(|e| ModeratorError::Download(e.to_string()))?;
        let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

        let fetch = |filename: &str| {
            repo.get(filename).map_err(|e| {
                ModeratorError::Download(format!(
                    "failed to fetch '{filename}' from '{repo_id}': {e}"
                ))
            })
        };
        let config_path = fetch("config.json")?;
        let weights_path = repo
            .get("model.safetensors")
            .or_else(|_| fetch("pytorch_model.bin"))?;
        let tokenizer_path = fetch("tokenizer.json")?;

        let config_str = std::fs::read_to_string(&config_path)?;
        let mut config: Config = serde_json::from_str(&config_str)?;
        let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;
        let labels = ordered_labels(&class_cfg)?;
        patch_num_labels(&mut config, labels.len());

        let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, &device)?
        };
        let model = ModernBertForSequenceClassification::load(vb, &config)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            ModeratorError::Tokenization(format!(
                "failed to load tokenizer from '{}': {e}",
                tokenizer_path.display()
            ))
        })?;

        info!(model = repo_id, classes = labels.len(), "sentiment model loaded");

        Ok(Self {
            model,
            tokenizer,
            labels,
            device,
        })
    }
}

impl SentimentClassifier for ModernBertClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let encoding = self.tokenizer.encode(text, true).map_err(|e| {
            ModeratorError::Tokenization(format!(
                "tokenization failed on '{}': {e}",
                &text.chars().take(50).collect::<String>()
            ))
        })?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;

        if probs.len() != self.labels.len() {
            return Err(ModeratorError::Inference(format!(
                "model returned {} probabilities for {} classes",
                probs.len(),
                self.labels.len()
            )));
        }

        Ok(Classification {
            classes: self
                .labels
                .iter()
                .zip(probs)
                .map(|(label, probability)| ClassScore {
                    label: label.clone(),
                    probability,
                })
                .collect(),
        })
    }
}

#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    label2id: HashMap<String, u32>,
}

fn ordered_labels(cfg: &ClassifierConfigJson) -> Result<Vec<String>> {
    let num_labels = cfg.id2label.len().max(cfg.label2id.len());
    if num_labels == 0 {
        return Err(ModeratorError::ModelLoad(
            "config.json declares no id2label/label2id classes".to_string(),
        ));
    }
    Ok((0..num_labels)
        .map(|i| {
            cfg.id2label
                .get(&i.to_string())
                .cloned()
                .unwrap_or_else(|| format!("label_{i}"))
        })
        .collect())
}

// Some hub configs omit the classifier block; candle needs it to size the head.
fn patch_num_labels(config: &mut Config, num_labels: usize) {
    let declared = config
        .classifier_config
        .as_ref()
        .map(|c| c.id2label.len())
        .unwrap_or(0);
    if declared != num_labels {
        let id2label: HashMap<String, String> = (0..num_labels)
            .map(|i| (i.to_string(), format!("label_{i}")))
            .collect();
        let label2id = id2label.iter().map(|(k, v)| (v.clone(), k.clone())).collect();
        config.classifier_config = Some(ClassifierConfig {
            id2label,
            label2id,
            classifier_pooling: ClassifierPooling::default(),
        });
    }
}
