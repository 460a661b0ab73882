// src/llm/chat_client.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::config::ChatSettings;
use crate::error::ChatError;
use crate::types::response::{
    ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};

const COMPLETIONS_ENDPOINT: &str = "/chat/completions";

/// Anything that can turn a prompt into career suggestions
#[async_trait]
pub trait CareerAdvisor: Send + Sync {
    async fn suggest(&self, prompt: &str) -> Result<String, ChatError>;
}

/// OpenAI-compatible chat completion client (OpenRouter by default)
pub struct ChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(api_key: String, settings: &ChatSettings) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        })
    }

    pub async fn send_completion(&self, content: &str) -> Result<String, ChatError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        };

        let url = format!("{}{}", self.base_url, COMPLETIONS_ENDPOINT);
        info!("Sending chat completion request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!("Chat API error {}: {}", status, message);
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        let content = completion
            .first_content()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ChatError::EmptyContent)?;

        info!("Received chat completion ({} chars)", content.len());
        Ok(content.to_string())
    }
}

#[async_trait]
impl CareerAdvisor for ChatClient {
    async fn suggest(&self, prompt: &str) -> Result<String, ChatError> {
        self.send_completion(prompt).await
    }
}
