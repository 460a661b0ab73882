// src/session.rs
//! Session context and the actions that drive the page flow.
//!
//! The session is owned by the caller and handed to every action; the only
//! state it keeps across actions is the last career suggestion.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::careers::{clean_title, suggestion_titles};
use crate::error::{ExportError, SessionError};
use crate::jobs::{JobBoard, JobSearchClient, JobSearchResult, JobsByTitle};
use crate::llm::{CareerAdvisor, Summarizer};
use crate::profile::UserProfile;
use crate::report::{PdfExporter, Report, ReportBuilder};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Page {
    #[default]
    Landing,
    Main,
    Jobs,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    page: Page,
    career_result: Option<String>,
}

/// Search performed for one suggested title
#[derive(Debug, Clone, Serialize)]
pub struct TitleSearch {
    pub title: String,
    pub cleaned: String,
    pub result: JobSearchResult,
}

/// Everything the jobs page shows
#[derive(Debug, Clone, Default)]
pub struct JobsPage {
    pub searches: Vec<TitleSearch>,
    pub jobs: JobsByTitle,
}

/// What ended up on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    Pdf,
    /// The typst CLI was missing; only the `.typ` source was written
    TypstSource,
}

#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub report: Report,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn go_to(&mut self, page: Page) {
        info!("Navigating from {:?} to {:?}", self.page, page);
        self.page = page;
    }

    pub fn career_result(&self) -> Option<&str> {
        self.career_result.as_deref()
    }

    /// Replace the stored suggestion, e.g. with text loaded from a file
    pub fn set_career_result(&mut self, text: impl Into<String>) {
        self.career_result = Some(text.into());
    }

    /// Validate the profile, ask the advisor, remember the answer.
    ///
    /// An invalid profile makes no remote call. A failed call leaves the
    /// previous suggestion untouched.
    pub async fn submit_profile<A>(
        &mut self,
        advisor: &A,
        profile: &UserProfile,
    ) -> Result<&str, SessionError>
    where
        A: CareerAdvisor + ?Sized,
    {
        let prompt = profile.career_prompt().map_err(|e| {
            warn!("Profile submission rejected: {}", e);
            e
        })?;

        info!("Requesting career suggestions");
        let suggestion = advisor.suggest(&prompt).await?;

        Ok(self.career_result.insert(suggestion).as_str())
    }

    /// Search jobs for every title of the stored suggestion.
    ///
    /// Titles whose cleaned form is empty are reported but not searched and
    /// do not appear in the returned mapping.
    pub async fn show_jobs<B: JobBoard>(
        &self,
        search: &JobSearchClient<B>,
    ) -> Result<JobsPage, SessionError> {
        let text = self
            .career_result
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(SessionError::NoSuggestions)?;

        let titles = suggestion_titles(text)?;
        let mut page = JobsPage::default();

        for title in titles {
            let cleaned = clean_title(&title);
            let result = search.search(&cleaned).await;

            if cleaned.is_empty() {
                warn!("Title '{}' has no usable search query", title);
            } else {
                page.jobs.insert(cleaned.clone(), result.listings.clone());
            }

            page.searches.push(TitleSearch {
                title,
                cleaned,
                result,
            });
        }

        Ok(page)
    }
}

/// Summarize the listings and write the PDF into `output_dir`.
///
/// Without a typst binary the Typst source is written there instead.
pub async fn export_report<S>(
    jobs: &JobsByTitle,
    summarizer: &S,
    excerpt_chars: usize,
    exporter: &PdfExporter,
    output_dir: &Path,
) -> Result<ExportedReport, SessionError>
where
    S: Summarizer + ?Sized,
{
    let report = ReportBuilder::new(summarizer, excerpt_chars)
        .build(jobs)
        .await;
    let (path, format) = match exporter.export(&report, output_dir) {
        Ok(path) => (path, ExportFormat::Pdf),
        Err(ExportError::TypstUnavailable(e)) => {
            warn!("typst is not available ({}), writing the report source", e);
            let path = exporter.write_source(&report, output_dir)?;
            (path, ExportFormat::TypstSource)
        }
        Err(e) => return Err(e.into()),
    };

    Ok(ExportedReport {
        path,
        format,
        report,
    })
}
