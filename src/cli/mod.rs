//! CLI module for ragmate
//!
//! Handles command-line argument parsing; the CLI is the external
//! collaborator that owns startup, query dispatch, and health reporting.

pub mod args;

pub use args::{Args, Commands};
