//! Deterministic embedder for tests that must not download a model

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::embedding::TextEmbedder;
use crate::errors::Result;

/// Hashed bag-of-words embedder.
///
/// Lowercases, splits on non-alphanumeric characters, and hashes each
/// word into one of `DIM` buckets; the vector holds term counts. Shared
/// words between two texts land in the same buckets, so overlap drives
/// cosine similarity up, which is enough to exercise ranking and
/// confidence behavior deterministically.
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
