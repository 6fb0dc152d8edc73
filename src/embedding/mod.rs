//! Text embedding: deterministic text -> fixed-length vector mapping

pub mod engine;
#[cfg(test)]
pub mod test_support;

pub use engine::EmbeddingEngine;

use crate::errors::Result;

/// Seam between the retrieval pipeline and whatever produces vectors.
///
/// The production implementation is [`EmbeddingEngine`]; tests substitute
/// a deterministic embedder so the pipeline can run without a model
/// download.
pub trait TextEmbedder: Send + Sync {
    /// Fixed output dimensionality of this embedder
    fn dimension(&self) -> usize;

    /// Embed a single text. Must return a vector of exactly
    /// `self.dimension()` floats, including for empty input.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts, preserving input order (output[i]
    /// corresponds to texts[i]).
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}
