//! Shared test helpers: a deterministic embedder so integration tests
//! run without a model download

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ragmate::embedding::TextEmbedder;
use ragmate::Result;

/// Hashed bag-of-words embedder; word overlap drives cosine similarity
#[derive(Debug, Default)]
pub struct BagOfWordsEmbedder;

impl BagOfWordsEmbedder {
    pub const DIM: usize = 64;
}

impl TextEmbedder for BagOfWordsEmbedder {
    fn dimension(&self) -> usize {
        Self::DIM
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; Self::DIM];
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let bucket = (hasher.finish() as usize) % Self::DIM;
            vector[bucket] += 1.0;
        }
        Ok(vector)
    }
}
