//! Flat cosine-similarity index
//!
//! Exact inner-product search over L2-normalized vectors. Every stored
//! vector is normalized at build time and every query vector is normalized
//! with the same routine at search time, so scores are cosine similarities
//! in [-1, 1] and "higher = more similar" holds everywhere downstream.

use serde::{Deserialize, Serialize};

use crate::errors::{RagError, Result};

/// One search hit: document ordinal plus cosine similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub ordinal: usize,
    pub score: f32,
}

/// Hits ordered by descending similarity; ties keep knowledge-base order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Highest-scoring hit, if any
    pub fn top(&self) -> Option<&SearchHit> {
        self.hits.first()
    }
}

/// In-memory flat index over the embedded knowledge base.
///
/// Position i holds the vector of document i; the mapping is immutable
/// after [`FlatIndex::build`]. There is no mutation API: the knowledge
/// base is static for the life of the process.
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build the index from document vectors, in document order.
    ///
    /// Each vector is L2-normalized on insertion. Zero vectors are kept
    /// as zeros and score 0.0 against every query.
    pub fn build(dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(RagError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        let vectors: Vec<Vec<f32>> = vectors
            .into_iter()
            .map(|mut v| {
                normalize(&mut v);
                v
            })
            .collect();

        tracing::info!(count = vectors.len(), dimension, "built flat index");

        Ok(Self { dimension, vectors })
    }

    /// Return up to `min(k, len)` hits ordered by descending similarity.
    ///
    /// `k == 0` is a precondition violation and errors rather than
    /// silently clamping. An empty index yields an empty result, not an
    /// error.
    pub fn search(&self, query: &[f32], k: usize) -> Result<SearchResult> {
        if k == 0 {
            return Err(RagError::InvalidTopK { k });
        }
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        if self.vectors.is_empty() {
            return Ok(SearchResult::default());
        }

        let mut normalized_query = query.to_vec();
        normalize(&mut normalized_query);

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(ordinal, vector)| SearchHit {
                ordinal,
                score: dot(&normalized_query, vector),
            })
            .collect();

        // Stable sort over document-ordered input: equal scores keep
        // knowledge-base order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);

        Ok(SearchResult { hits })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// L2-normalize in place; zero vectors are left untouched
fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn sample_index() -> FlatIndex {
        FlatIndex::build(
            3,
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_rejects_dimension_mismatch() {
        let result = FlatIndex::build(3, vec![vec![1.0, 0.0]]);
        assert!(matches!(
            result,
            Err(RagError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_self_retrieval_scores_one() {
        // Also guards build-time vs query-time normalization consistency:
        // an unnormalized copy of a stored vector must still score ~1.0.
        let index = FlatIndex::build(
            3,
            vec![vec![2.0, 0.0, 0.0], vec![0.0, 5.0, 5.0]],
        )
        .unwrap();

        let result = index.search(&[0.0, 3.0, 3.0], 1).unwrap();
        assert_eq!(result.top().unwrap().ordinal, 1);
        assert!((result.top().unwrap().score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_search_rejects_k_zero() {
        let index = sample_index();
        assert!(matches!(
            index.search(&[1.0, 0.0, 0.0], 0),
            Err(RagError::InvalidTopK { k: 0 })
        ));
    }

    #[test]
    fn test_search_rejects_wrong_query_dimension() {
        let index = sample_index();
        assert!(matches!(
            index.search(&[1.0, 0.0], 1),
            Err(RagError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_index_returns_empty_result() {
        let index = FlatIndex::build(3, Vec::new()).unwrap();
        let result = index.search(&[1.0, 0.0, 0.0], 5).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_k_larger_than_index_returns_all() {
        let index = sample_index();
        let result = index.search(&[1.0, 1.0, 0.0], 100).unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_scores_descending() {
        let index = sample_index();
        let result = index.search(&[0.9, 0.4, 0.1], 3).unwrap();
        for pair in result.hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(result.top().unwrap().ordinal, 0);
    }

    #[test]
    fn test_tie_break_keeps_document_order() {
        // Duplicate vectors score identically; the earlier document must
        // rank first.
        let index = FlatIndex::build(
            2,
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]],
        )
        .unwrap();

        let result = index.search(&[1.0, 0.0], 3).unwrap();
        assert_eq!(result.hits[0].ordinal, 0);
        assert_eq!(result.hits[1].ordinal, 2);
        assert_eq!(result.hits[2].ordinal, 1);
    }

    #[test]
    fn test_search_is_idempotent() {
        let index = sample_index();
        let first = index.search(&[0.3, 0.2, 0.9], 2).unwrap();
        let second = index.search(&[0.3, 0.2, 0.9], 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let index = FlatIndex::build(2, vec![vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap();
        let result = index.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(result.hits[0].ordinal, 1);
        assert_eq!(result.hits[1].score, 0.0);
        assert!(result.hits.iter().all(|h| h.score.is_finite()));
    }

    const PROP_DIM: usize = 8;

    fn vectors_from(data: &[f32]) -> Vec<Vec<f32>> {
        data.chunks_exact(PROP_DIM).map(<[f32]>::to_vec).collect()
    }

    #[quickcheck]
    fn prop_result_len_is_min_k_count(data: Vec<f32>, k: u8) -> TestResult {
        if k == 0 || data.iter().any(|x| !x.is_finite()) {
            return TestResult::discard();
        }
        let vectors = vectors_from(&data);
        let count = vectors.len();
        let index = FlatIndex::build(PROP_DIM, vectors).unwrap();
        let result = index.search(&[1.0; PROP_DIM], k as usize).unwrap();
        TestResult::from_bool(result.len() == (k as usize).min(count))
    }

    #[quickcheck]
    fn prop_scores_monotone_non_increasing(data: Vec<f32>, k: u8) -> TestResult {
        if k == 0 || data.iter().any(|x| !x.is_finite()) {
            return TestResult::discard();
        }
        let index = FlatIndex::build(PROP_DIM, vectors_from(&data)).unwrap();
        let result = index.search(&[1.0; PROP_DIM], k as usize).unwrap();
        TestResult::from_bool(
            result
                .hits
                .windows(2)
                .all(|pair| pair[0].score >= pair[1].score),
        )
    }
}
