// src/jobs/search.rs
//! Job search with a fallback cascade.
//!
//! For a cleaned title the client tries, stopping at the first attempt that
//! returns listings:
//! 1. the full title in the primary region,
//! 2. the keyword query in the primary region,
//! 3. the keyword query in the secondary region.
//!
//! A failed request counts as "no results" for the cascade but is kept in the
//! attempt log so callers can tell an empty market from a broken request.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{JobListing, MAX_LISTINGS};
use crate::error::SearchError;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

const MAX_KEYWORDS: usize = 3;

/// A remote source of job postings
#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn fetch(&self, query: &str, country: &str) -> Result<Vec<JobListing>, SearchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    Found(usize),
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchAttempt {
    pub query: String,
    pub country: String,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobSearchResult {
    pub listings: Vec<JobListing>,
    pub attempts: Vec<SearchAttempt>,
}

impl JobSearchResult {
    /// No request was made
    pub fn skipped(&self) -> bool {
        self.attempts.is_empty()
    }

    /// At least one request failed instead of returning data
    pub fn had_failures(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
    }

    /// Every request failed, so the empty result says nothing about the market
    pub fn all_failed(&self) -> bool {
        !self.attempts.is_empty()
            && self
                .attempts
                .iter()
                .all(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
    }
}

/// Keyword query used by the second and third attempts.
///
/// Titles with two or more word tokens become the first three tokens joined
/// by `" OR "`; shorter titles are used unchanged.
pub fn fallback_query(title: &str) -> String {
    let words: Vec<&str> = WORD.find_iter(title).map(|m| m.as_str()).collect();
    if words.len() >= 2 {
        words
            .into_iter()
            .take(MAX_KEYWORDS)
            .collect::<Vec<_>>()
            .join(" OR ")
    } else {
        title.to_string()
    }
}

pub struct JobSearchClient<B> {
    board: B,
    primary_country: String,
    secondary_country: String,
}

impl<B: JobBoard> JobSearchClient<B> {
    pub fn new(board: B, primary_country: impl Into<String>, secondary_country: impl Into<String>) -> Self {
        Self {
            board,
            primary_country: primary_country.into(),
            secondary_country: secondary_country.into(),
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// Run the cascade for one cleaned title. Never fails.
    pub async fn search(&self, title: &str) -> JobSearchResult {
        let mut result = JobSearchResult::default();

        if title.trim().is_empty() {
            warn!("Empty search query, skipping job search");
            return result;
        }

        let keywords = fallback_query(title);
        let plan = [
            (title, self.primary_country.as_str()),
            (keywords.as_str(), self.primary_country.as_str()),
            (keywords.as_str(), self.secondary_country.as_str()),
        ];

        for (query, country) in plan {
            let listings = self.attempt(query, country, &mut result.attempts).await;
            if !listings.is_empty() {
                result.listings = listings;
                break;
            }
        }

        info!(
            "Job search for '{}' finished with {} listings after {} attempts",
            title,
            result.listings.len(),
            result.attempts.len()
        );
        result
    }

    async fn attempt(
        &self,
        query: &str,
        country: &str,
        log: &mut Vec<SearchAttempt>,
    ) -> Vec<JobListing> {
        debug!("Searching jobs: query='{}' country={}", query, country);

        let (listings, outcome) = match self.board.fetch(query, country).await {
            Ok(mut listings) if !listings.is_empty() => {
                listings.truncate(MAX_LISTINGS);
                let found = listings.len();
                (listings, AttemptOutcome::Found(found))
            }
            Ok(_) => (Vec::new(), AttemptOutcome::Empty),
            Err(e) => {
                warn!("Job search failed for '{}' in {}: {}", query, country, e);
                (Vec::new(), AttemptOutcome::Failed(e.to_string()))
            }
        };

        log.push(SearchAttempt {
            query: query.to_string(),
            country: country.to_string(),
            outcome,
        });
        listings
    }
}


#[cfg(test)]
mod tests {
    use super::fake::ScriptedBoard;
    use super::*;
    use crate::jobs::listing;

    fn client(responses: Vec<Result<Vec<JobListing>, SearchError>>) -> JobSearchClient<ScriptedBoard> {
        JobSearchClient::new(ScriptedBoard::new(responses), "IN", "US")
    }

    fn failure() -> SearchError {
        SearchError::Api {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    #[test]
    fn test_fallback_query() {
        assert_eq!(fallback_query("Software Engineer"), "Software OR Engineer");
        assert_eq!(
            fallback_query("Senior Data Platform Engineer"),
            "Senior OR Data OR Platform"
        );
        assert_eq!(fallback_query("Data"), "Data");
        assert_eq!(fallback_query("UX/UI Designer"), "UX OR UI OR Designer");
        assert_eq!(fallback_query("C++"), "C++");
    }

    #[tokio::test]
    async fn test_first_attempt_hit() {
        let search = client(vec![Ok(vec![listing("Chef", "Hotel", "Goa", "IN")])]);
        let result = search.search("Chef").await;

        assert_eq!(result.listings.len(), 1);
        assert_eq!(search.board().calls(), vec![("Chef".to_string(), "IN".to_string())]);
    }

    #[tokio::test]
    async fn test_keyword_fallback_on_primary_region() {
        let jobs = vec![
            listing("Data Analyst", "Acme", "Delhi", "IN"),
            listing("Data Engineer", "Beta", "Pune", "IN"),
        ];
        let search = client(vec![Ok(vec![]), Ok(jobs.clone())]);
        let result = search.search("Data").await;

        assert_eq!(result.listings, jobs);
        assert_eq!(
            search.board().calls(),
            vec![
                ("Data".to_string(), "IN".to_string()),
                ("Data".to_string(), "IN".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_secondary_region_uses_keyword_query() {
        let search = client(vec![
            Ok(vec![]),
            Ok(vec![]),
            Ok(vec![listing("Software Engineer", "Initech", "Austin", "US")]),
        ]);
        let result = search.search("Software Engineer").await;

        assert_eq!(result.listings.len(), 1);
        assert_eq!(
            search.board().calls(),
            vec![
                ("Software Engineer".to_string(), "IN".to_string()),
                ("Software OR Engineer".to_string(), "IN".to_string()),
                ("Software OR Engineer".to_string(), "US".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_never_escape_and_cap_at_three_calls() {
        let search = client(vec![Err(failure()), Err(failure()), Err(failure()), Err(failure())]);
        let result = search.search("Software Engineer").await;

        assert!(result.listings.is_empty());
        assert_eq!(search.board().calls().len(), 3);
        assert!(result.all_failed());
    }

    #[tokio::test]
    async fn test_failure_then_empty_is_distinguishable() {
        let search = client(vec![Err(failure()), Ok(vec![]), Ok(vec![])]);
        let result = search.search("Pilot").await;

        assert!(result.listings.is_empty());
        assert!(result.had_failures());
        assert!(!result.all_failed());
        assert_eq!(result.attempts[1].outcome, AttemptOutcome::Empty);
    }

    #[tokio::test]
    async fn test_truncates_to_five() {
        let many: Vec<JobListing> = (0..12)
            .map(|i| listing(&format!("Nurse {}", i), "Clinic", "Chennai", "IN"))
            .collect();
        let search = client(vec![Ok(many)]);
        let result = search.search("Nurse").await;

        assert_eq!(result.listings.len(), MAX_LISTINGS);
        assert_eq!(result.listings[0].job_title, "Nurse 0");
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::Found(5));
    }

    #[tokio::test]
    async fn test_empty_title_skips_search() {
        let search = client(vec![Ok(vec![listing("X", "Y", "Z", "IN")])]);
        let result = search.search("").await;

        assert!(result.listings.is_empty());
        assert!(result.skipped());
        assert!(search.board().calls().is_empty());
    }
}
