//! Extractive answer assembly
//!
//! Pure function of (search results, document texts) -> Answer. No model
//! call, no timing, no I/O: the answer is a template over the retrieved
//! text plus a confidence tier derived from the top similarity score.

use serde::{Deserialize, Serialize};

use crate::index::SearchResult;
use crate::knowledge::KnowledgeBase;

/// Top score at or above this is high confidence
pub const HIGH_CONFIDENCE_THRESHOLD: f32 = 0.7;
/// Top score at or above this (and below high) is medium confidence
pub const MEDIUM_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Maximum characters quoted from the second-best document
const RELATED_SNIPPET_CHARS: usize = 200;

const NO_RESULTS_TEXT: &str = "No relevant information found.";

/// Coarse trust tier derived from the top similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Tier for a top similarity score. Total and deterministic: every
    /// float maps to exactly one tier (NaN compares false everywhere and
    /// lands in Low).
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            Confidence::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assembled answer: transient, recomputed per query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Templated answer text, prefixed with a confidence qualifier
    pub text: String,
    /// Retrieved document texts in rank order
    pub documents: Vec<String>,
    /// Similarity scores in rank order
    pub scores: Vec<f32>,
    pub confidence: Confidence,
}

/// Compose an answer from search results and the knowledge base they
/// refer into.
///
/// Empty results produce the lowest tier and an explanatory text rather
/// than an error. Hits whose ordinal is out of range are skipped; that
/// would indicate an index/knowledge mismatch upstream.
pub fn compose(knowledge: &KnowledgeBase, results: &SearchResult) -> Answer {
    let documents: Vec<String> = results
        .hits
        .iter()
        .filter_map(|hit| knowledge.get(hit.ordinal))
        .map(|doc| doc.text.clone())
        .collect();
    let scores: Vec<f32> = results.hits.iter().map(|hit| hit.score).collect();

    if documents.is_empty() {
        return Answer {
            text: NO_RESULTS_TEXT.to_string(),
            documents,
            scores,
            confidence: Confidence::Low,
        };
    }

    let confidence = Confidence::from_score(scores[0]);

    let mut text = format!(
        "Based on retrieved data ({} confidence):\n{}",
        confidence, documents[0]
    );

    if let Some(second) = documents.get(1) {
        let snippet: String = second.chars().take(RELATED_SNIPPET_CHARS).collect();
        text.push_str("\n\nRelated info:\n");
        text.push_str(&snippet);
    }

    Answer {
        text,
        documents,
        scores,
        confidence,
    }
}
