// src/error.rs
//! Typed errors for every stage of the pipeline.
//!
//! Library code returns these; the binary wraps them with `anyhow` context.

use thiserror::Error;

/// Problems found while validating a user profile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all the fields before submitting (missing: {})", .missing.join(", "))]
pub struct ProfileError {
    pub missing: Vec<&'static str>,
}

/// The model output did not contain a usable numbered list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionParseError {
    #[error("Career suggestion text is empty")]
    Blank,

    #[error("No numbered career titles found in the suggestion text")]
    NoNumberedItems,
}

/// Chat completion failures
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Chat API returned no content")]
    EmptyContent,
}

/// Summarization service failures
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Summarization API returned an empty summary")]
    EmptySummary,

    #[error("Nothing to summarize")]
    EmptyInput,
}

/// A single job-search request that did not produce listings
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// PDF export failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to execute typst: {0}")]
    TypstUnavailable(std::io::Error),

    #[error("Typst compilation failed: {0}")]
    Typst(String),
}

/// Errors surfaced by session actions
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No career suggestions found. Please return to the main page and generate suggestions first.")]
    NoSuggestions,

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Suggestions(#[from] SuggestionParseError),

    #[error("Could not get career suggestions: {0}")]
    Chat(#[from] ChatError),

    #[error("Could not export the report: {0}")]
    Export(#[from] ExportError),
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
