//! Command-line argument parsing for ragmate

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ragmate - semantic search and RAG answers over a local knowledge base
#[derive(Parser, Debug)]
#[command(name = "ragmate")]
#[command(version)]
#[command(about = "Semantic search and retrieval-augmented answers", long_about = None)]
pub struct Args {
    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Knowledge file, one document per non-blank line
    #[arg(long)]
    pub knowledge: Option<PathBuf>,

    /// Sentence-transformer model id on the HuggingFace Hub
    #[arg(short, long)]
    pub model: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single query and exit
    Query {
        /// The question or search query
        #[arg(value_name = "TEXT")]
        query: String,

        /// Number of documents to retrieve (defaults to config)
        #[arg(short)]
        k: Option<usize>,

        /// Emit the full outcome as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Interactive query loop
    Repl,

    /// Report readiness and index statistics
    Health,
}
