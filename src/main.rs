//! ragmate - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Duration;

use ragmate::cli::{Args, Commands};
use ragmate::config::Config;
use ragmate::embedding::EmbeddingEngine;
use ragmate::knowledge::KnowledgeBase;
use ragmate::rag::pipeline::{QueryOutcome, RagPipeline};
use ragmate::rag::Confidence;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = &args.knowledge {
        config.knowledge.path = path.clone();
    }
    if let Some(model) = &args.model {
        config.model.name = model.clone();
    }

    match args.command {
        Commands::Query { query, k, json } => {
            let pipeline = build_pipeline(&config)?;
            let k = k.unwrap_or(config.retrieval.default_top_k);
            let outcome = pipeline.query(&query, k)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }

        Commands::Repl => {
            let pipeline = build_pipeline(&config)?;
            run_repl(&pipeline, config.retrieval.default_top_k)?;
        }

        Commands::Health => match build_pipeline(&config) {
            Ok(pipeline) => {
                println!("{}", "status: healthy".green());
                println!("documents indexed: {}", pipeline.document_count());
                println!("embedding dimension: {}", pipeline.dimension());
            }
            Err(e) => {
                eprintln!("{} {e}", "status: unhealthy".red());
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Load the model, read the knowledge file, and build the shared
/// pipeline context. Any failure here is fatal: no queries are served
/// against a half-initialized pipeline.
fn build_pipeline(config: &Config) -> Result<RagPipeline> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Loading {}...", config.model.name));

    let engine = EmbeddingEngine::load_model(&config.model.name)?;

    spinner.set_message("Indexing knowledge base...");
    let knowledge = KnowledgeBase::from_file(&config.knowledge.path)?;
    let pipeline = RagPipeline::build(Box::new(engine), knowledge)?;

    spinner.finish_and_clear();
    Ok(pipeline)
}

fn print_outcome(outcome: &QueryOutcome) {
    let tier = match outcome.confidence {
        Confidence::High => "high".green(),
        Confidence::Medium => "medium".yellow(),
        Confidence::Low => "low".red(),
    };

    println!("{}", outcome.answer);
    println!();
    println!(
        "{} confidence: {tier} | top score: {:.3} | {:.1}ms",
        "→".dimmed(),
        outcome.similarity_scores.first().copied().unwrap_or(0.0),
        outcome.latency_ms
    );
}

fn run_repl(pipeline: &RagPipeline, k: usize) -> Result<()> {
    println!(
        "{} {} documents indexed. Ctrl-D to exit.",
        "ragmate".bold(),
        pipeline.document_count()
    );

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("rag> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                match pipeline.query(line, k) {
                    Ok(outcome) => print_outcome(&outcome),
                    Err(e) => eprintln!("{} {e}", "error:".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
