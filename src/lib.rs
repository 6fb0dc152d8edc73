//! ragmate - Semantic search and extractive RAG answers
//!
//! Embeds a small static knowledge base with a local sentence-transformer
//! model, serves approximate nearest-neighbor lookups from an in-memory
//! flat index, and assembles confidence-qualified answers from the
//! retrieved text.
//!
//! # Architecture
//!
//! - **embedding**: candle-based MiniLM encoder behind the [`embedding::TextEmbedder`] trait
//! - **index**: exact flat cosine-similarity index, read-only after build
//! - **rag**: answer assembly + the pipeline context object tying it together

pub mod cli;
pub mod config;
pub mod embedding;
pub mod errors;
pub mod index;
pub mod knowledge;
pub mod rag;

// Re-export commonly used types
pub use errors::{RagError, Result};
pub use knowledge::{Document, KnowledgeBase};
pub use rag::pipeline::{QueryOutcome, RagPipeline};
