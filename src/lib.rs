//! JobGenie: career path suggestions, matching job listings and a PDF summary.
//!
//! Pipeline: [`profile::UserProfile`] → chat model → numbered suggestion text
//! → [`careers`] (extract and clean titles) → [`jobs`] (search cascade)
//! → [`report`] (summary and PDF).

pub mod careers;
pub mod cli;
pub mod config;
pub mod error;
pub mod jobs;
pub mod llm;
pub mod profile;
pub mod report;
pub mod session;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use careers::{clean_title, extract_titles, parse_suggestions};
pub use config::AppConfig;
pub use jobs::{JobListing, JobSearchClient, JobsByTitle};
pub use profile::{EducationLevel, UserProfile};
pub use session::{Page, Session};
