//! RAG pipeline: the process-wide context object
//!
//! Owns the embedder, the knowledge base, and the vector index. Built
//! once at startup, immutable afterward; safe to share behind `Arc`
//! across concurrent queries without locking. Each query runs the whole
//! embed -> search -> assemble unit and measures its latency.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::embedding::TextEmbedder;
use crate::errors::{RagError, Result};
use crate::index::FlatIndex;
use crate::knowledge::KnowledgeBase;
use crate::rag::answer::{self, Confidence};

/// Default number of documents to retrieve per query
pub const DEFAULT_TOP_K: usize = 3;

/// Everything a query produces, serializable for the CLI's JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Original query, echoed for reference
    pub query: String,
    /// Templated answer text
    pub answer: String,
    /// Retrieved document texts in rank order
    pub retrieved_documents: Vec<String>,
    /// Similarity scores in rank order
    pub similarity_scores: Vec<f32>,
    pub confidence: Confidence,
    /// Wall-clock time for the whole embed -> search -> assemble unit
    pub latency_ms: f64,
}

/// Shared retrieval context: embedder + knowledge base + index
pub struct RagPipeline {
    embedder: Box<dyn TextEmbedder>,
    knowledge: KnowledgeBase,
    index: FlatIndex,
    queries_served: AtomicU64,
}

impl RagPipeline {
    /// Embed the whole knowledge base and build the index.
    ///
    /// Fails with [`RagError::EmptyKnowledgeBase`] when there is nothing
    /// to index; a service must not start serving against an empty base.
    pub fn build(embedder: Box<dyn TextEmbedder>, knowledge: KnowledgeBase) -> Result<Self> {
        if knowledge.is_empty() {
            return Err(RagError::EmptyKnowledgeBase);
        }

        let start = Instant::now();

        let texts = knowledge.texts();
        let vectors = embedder.embed_batch(&texts)?;
        let index = FlatIndex::build(embedder.dimension(), vectors)?;

        // Index slot i must hold the vector of document i
        debug_assert_eq!(index.len(), knowledge.len());

        tracing::info!(
            documents = knowledge.len(),
            dimension = index.dimension(),
            build_ms = start.elapsed().as_millis() as u64,
            "pipeline built"
        );

        Ok(Self {
            embedder,
            knowledge,
            index,
            queries_served: AtomicU64::new(0),
        })
    }

    /// Run one query end to end: embed, search top-k, assemble the
    /// answer, and measure latency around the whole unit.
    pub fn query(&self, query: &str, k: usize) -> Result<QueryOutcome> {
        let start = Instant::now();

        let query_vector = self.embedder.embed(query)?;
        let results = self.index.search(&query_vector, k)?;
        let answer = answer::compose(&self.knowledge, &results);

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.queries_served.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            k,
            hits = results.len(),
            confidence = answer.confidence.as_str(),
            latency_ms,
            "query served"
        );

        Ok(QueryOutcome {
            query: query.to_string(),
            answer: answer.text,
            retrieved_documents: answer.documents,
            similarity_scores: answer.scores,
            confidence: answer.confidence,
            latency_ms,
        })
    }

    /// Readiness without re-running inference: the embedder loaded (the
    /// pipeline could not exist otherwise) and the index is non-empty.
    pub fn is_ready(&self) -> bool {
        !self.index.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// Observability counter; not part of query correctness
    pub fn queries_served(&self) -> u64 {
        self.queries_served.load(Ordering::Relaxed)
    }
}
