//! Knowledge base: the static, ordered document collection
//!
//! Documents are created once at startup and never mutated; the index
//! refers back to them by ordinal position.

use std::path::Path;

use crate::errors::{RagError, Result};

/// An immutable unit of text plus its ordinal position in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub ordinal: usize,
    pub text: String,
}

/// Ordered, immutable collection of documents
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
}

impl KnowledgeBase {
    /// Build a knowledge base from in-memory texts, preserving order
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents = texts
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| Document {
                ordinal,
                text: text.into(),
            })
            .collect();
        Self { documents }
    }

    /// Load a knowledge base from a UTF-8 text file, one document per
    /// non-blank line (leading/trailing whitespace trimmed).
    ///
    /// Errors with [`RagError::EmptyKnowledgeBase`] when the file yields
    /// no documents.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;

        let kb = Self::from_texts(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );

        if kb.is_empty() {
            return Err(RagError::EmptyKnowledgeBase);
        }

        tracing::info!(
            count = kb.len(),
            path = %path.as_ref().display(),
            "loaded knowledge base"
        );

        Ok(kb)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document at the given ordinal, if any
    pub fn get(&self, ordinal: usize) -> Option<&Document> {
        self.documents.get(ordinal)
    }

    /// All document texts in ordinal order, for batch embedding
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.text.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }
}
