// src/llm/mod.rs
//! Clients for the generative services: career suggestions and summaries.

pub mod chat_client;
pub mod summarizer;

pub use chat_client::{CareerAdvisor, ChatClient};
pub use summarizer::{InferenceSummarizer, Summarizer};
