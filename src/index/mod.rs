//! Vector index: nearest-neighbor search over document embeddings

pub mod flat;

pub use flat::{FlatIndex, SearchHit, SearchResult};
