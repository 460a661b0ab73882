// src/jobs/mod.rs
use serde::{Deserialize, Deserializer, Serialize};

pub mod jsearch;
pub mod search;

pub use jsearch::JSearchBoard;
pub use search::{AttemptOutcome, JobBoard, JobSearchClient, JobSearchResult, SearchAttempt};

/// Listings kept per career title
pub const MAX_LISTINGS: usize = 5;

/// One posting as returned by the job-search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub employer_name: String,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(default)]
    pub job_apply_link: Option<String>,
}

impl JobListing {
    pub fn city(&self) -> &str {
        self.job_city.as_deref().unwrap_or("Unknown")
    }

    pub fn country(&self) -> &str {
        self.job_country.as_deref().unwrap_or("Unknown")
    }

    /// `"City, Country"` with placeholders for missing parts
    pub fn location(&self) -> String {
        format!("{}, {}", self.city(), self.country())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Insertion-ordered mapping from cleaned title to its listings.
///
/// Inserting a title that is already present replaces its listings but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsByTitle {
    entries: Vec<(String, Vec<JobListing>)>,
}

impl JobsByTitle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: impl Into<String>, jobs: Vec<JobListing>) {
        let title = title.into();
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => *existing = jobs,
            None => self.entries.push((title, jobs)),
        }
    }

    pub fn get(&self, title: &str) -> Option<&[JobListing]> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, jobs)| jobs.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[JobListing])> {
        self.entries
            .iter()
            .map(|(title, jobs)| (title.as_str(), jobs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_listings(&self) -> usize {
        self.entries.iter().map(|(_, jobs)| jobs.len()).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<JobListing>)> for JobsByTitle {
    fn from_iter<I: IntoIterator<Item = (S, Vec<JobListing>)>>(iter: I) -> Self {
        let mut jobs = Self::new();
        for (title, listings) in iter {
            jobs.insert(title, listings);
        }
        jobs
    }
}

#[cfg(test)]
pub(crate) fn listing(title: &str, employer: &str, city: &str, country: &str) -> JobListing {
    JobListing {
        job_title: title.to_string(),
        employer_name: employer.to_string(),
        job_city: Some(city.to_string()),
        job_country: Some(country.to_string()),
        job_apply_link: Some(format!("https://jobs.example/{}", title.replace(' ', "-"))),
    }
}
