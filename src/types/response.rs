// src/types/response.rs
//! Request and response bodies of the remote services

use serde::{Deserialize, Serialize};

use crate::jobs::JobListing;

// ===== Chat completion =====

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// OpenAI-style error envelope
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

// ===== Job search =====

#[derive(Debug, Deserialize)]
pub struct JobSearchResponse {
    #[serde(default)]
    pub data: Option<Vec<JobListing>>,
}

impl JobSearchResponse {
    pub fn into_listings(self) -> Vec<JobListing> {
        self.data.unwrap_or_default()
    }
}

// ===== Summarization =====

#[derive(Debug, Serialize)]
pub struct SummaryRequest<'a> {
    pub inputs: &'a str,
    pub parameters: SummaryParameters,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryParameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

#[derive(Debug, Deserialize)]
pub struct SummaryItem {
    pub summary_text: String,
}
