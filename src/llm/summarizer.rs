// src/llm/summarizer.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::config::SummarySettings;
use crate::error::SummaryError;
use crate::types::response::{SummaryItem, SummaryParameters, SummaryRequest};

/// Abstractive summarization of free text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError>;
}

/// Hugging Face style inference endpoint.
///
/// Decoding is deterministic: `do_sample` is always false.
pub struct InferenceSummarizer {
    client: Client,
    url: String,
    token: Option<String>,
    parameters: SummaryParameters,
}

impl InferenceSummarizer {
    pub fn new(token: Option<String>, settings: &SummarySettings) -> Result<Self, SummaryError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            token,
            parameters: SummaryParameters {
                max_length: settings.max_length,
                min_length: settings.min_length,
                do_sample: false,
            },
        })
    }
}

#[async_trait]
impl Summarizer for InferenceSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let request = SummaryRequest {
            inputs: text,
            parameters: self.parameters,
        };

        info!("Requesting summary of {} chars from {}", text.len(), self.url);

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Summarization API error {}: {}", status, body);
            return Err(SummaryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: Vec<SummaryItem> = serde_json::from_str(&body)?;
        items
            .into_iter()
            .next()
            .map(|item| item.summary_text.trim().to_string())
            .filter(|summary| !summary.is_empty())
            .ok_or(SummaryError::EmptySummary)
    }
}
