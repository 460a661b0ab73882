// src/jobs/jsearch.rs
//! JSearch (RapidAPI) job board

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, trace};

use super::search::JobBoard;
use super::JobListing;
use crate::config::JobSearchSettings;
use crate::error::SearchError;
use crate::types::response::JobSearchResponse;

const SEARCH_ENDPOINT: &str = "/search";

pub struct JSearchBoard {
    client: Client,
    api_key: String,
    base_url: String,
    host: String,
}

impl JSearchBoard {
    pub fn new(api_key: String, settings: &JobSearchSettings) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            host: settings.host.clone(),
        })
    }
}

#[async_trait]
impl JobBoard for JSearchBoard {
    async fn fetch(&self, query: &str, country: &str) -> Result<Vec<JobListing>, SearchError> {
        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);
        trace!("Calling job search API: {} query='{}' country={}", url, query, country);

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&[
                ("query", query),
                ("page", "1"),
                ("num_pages", "1"),
                ("country", country),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Job search API error {}: {}", status, body);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: JobSearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_listings())
    }
}
