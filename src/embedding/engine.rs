//! Embedding engine: local sentence embeddings via MiniLM
use anyhow::{Context, Result as AnyhowResult};
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::time::Instant;
use tokenizers::Tokenizer;

use crate::embedding::TextEmbedder;
use crate::errors::{RagError, Result};

const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";
const EMBEDDING_DIM: usize = 384;

/// Embedding engine using the all-MiniLM-L6-v2 model via Candle.
///
/// The model is downloaded from the HuggingFace Hub on first use and
/// loaded exactly once; all embedding calls reuse the loaded weights.
pub struct EmbeddingEngine {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl EmbeddingEngine {
    /// Load the default sentence-transformer model.
    ///
    /// A load failure is fatal: callers must not serve queries without a
    /// working embedder.
    pub fn load() -> Result<Self> {
        Self::load_model(DEFAULT_MODEL_ID)
    }

    /// Load a specific BERT-family sentence-transformer model by Hub id
    pub fn load_model(model_id: &str) -> Result<Self> {
        let start = Instant::now();
        tracing::info!(model = model_id, "loading embedding model");

        let engine =
            Self::load_inner(model_id).map_err(|e| RagError::ModelLoad(e.to_string()))?;

        tracing::info!(
            dimension = EMBEDDING_DIM,
            load_ms = start.elapsed().as_millis() as u64,
            "embedding model loaded"
        );

        Ok(engine)
    }

    fn load_inner(model_id: &str) -> AnyhowResult<Self> {
        // CPU inference; the knowledge base is small enough that GPU
        // offload is not worth the device management.
        let device = Device::Cpu;

        let api = Api::new().context("Failed to create HuggingFace API client")?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .context("Failed to download model config")?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .context("Failed to download tokenizer")?;
        let weights_path = repo
            .get("model.safetensors")
            .context("Failed to download model weights")?;

        let config_contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&config_contents).context("Failed to parse model config")?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], candle_core::DType::F32, &device)
                .context("Failed to load model weights")?
        };

        let model = BertModel::load(vb, &config).context("Failed to create BERT model")?;

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn encode_batch(&self, texts: &[&str]) -> AnyhowResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // Tokenization with special tokens enabled: an empty string still
        // yields [CLS] and [SEP], so every input maps to a valid vector.
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let mut token_ids_vec = Vec::new();
        let mut attention_mask_vec = Vec::new();

        for encoding in &encodings {
            token_ids_vec.push(encoding.get_ids().to_vec());
            attention_mask_vec.push(encoding.get_attention_mask().to_vec());
        }

        let max_len = token_ids_vec.iter().map(|ids| ids.len()).max().unwrap_or(0);
        let batch_size = texts.len();

        // Pad sequences to a rectangular batch
        let mut padded_ids = vec![vec![0u32; max_len]; batch_size];
        let mut padded_mask = vec![vec![0u32; max_len]; batch_size];

        for (i, (ids, mask)) in token_ids_vec.iter().zip(attention_mask_vec.iter()).enumerate() {
            padded_ids[i][..ids.len()].copy_from_slice(ids);
            padded_mask[i][..mask.len()].copy_from_slice(mask);
        }

        let flat_ids: Vec<u32> = padded_ids.into_iter().flatten().collect();
        let flat_mask: Vec<u32> = padded_mask.into_iter().flatten().collect();

        let token_ids = Tensor::from_vec(flat_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(flat_mask, (batch_size, max_len), &self.device)?;
        let token_type_ids = token_ids.zeros_like()?;

        let embeddings = self
            .model
            .forward(&token_ids, &token_type_ids, Some(&attention_mask))?;

        // Mean pooling over the sequence dimension, masked to real tokens
        let pooled = Self::mean_pool(&embeddings, &attention_mask)?;

        let embedding_data = pooled.to_vec2::<f32>()?;

        Ok(embedding_data)
    }

    /// Mean pooling with attention mask
    fn mean_pool(embeddings: &Tensor, attention_mask: &Tensor) -> AnyhowResult<Tensor> {
        let mask_expanded = attention_mask
            .unsqueeze(2)?
            .expand(embeddings.shape())?
            .to_dtype(embeddings.dtype())?;

        let sum_embeddings = (embeddings * &mask_expanded)?.sum(1)?;
        let sum_mask = mask_expanded.sum(1)?.clamp(1e-9, f64::MAX)?;

        let pooled = sum_embeddings.broadcast_div(&sum_mask)?;

        Ok(pooled)
    }
}

impl TextEmbedder for EmbeddingEngine {
    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[text])?;
        batch
            .pop()
            .ok_or_else(|| RagError::Embedding("empty batch result".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let vectors = self.encode_batch(texts)?;
        debug_assert_eq!(vectors.len(), texts.len());
        Ok(vectors)
    }
}
