//! Retrieval-augmented answering: answer assembly + pipeline context

pub mod answer;
pub mod pipeline;

pub use answer::{Answer, Confidence};
pub use pipeline::{QueryOutcome, RagPipeline};
