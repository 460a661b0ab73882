// src/report/mod.rs
//! Job recommendation report: summary plus one section per career title.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::jobs::{JobListing, JobsByTitle};
use crate::llm::Summarizer;
use crate::utils::{escape_typst, truncate_chars};

pub mod pdf;

pub use pdf::PdfExporter;

pub const REPORT_HEADING: &str = "AI Summary of Job Recommendations";
pub const NO_JOBS_PLACEHOLDER: &str = "No jobs found for this role.";
pub const NO_LISTINGS_SUMMARY: &str = "No job listings were found for the suggested careers.";
pub const REPORT_FILE_NAME: &str = "job_recommendations.pdf";
pub const REPORT_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SummarySource {
    Model,
    /// No listings to summarize; the summary is a fixed sentence
    Fixed,
    /// Summarization failed; the summary is a verbatim excerpt
    Excerpt { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SectionBody {
    Listings(Vec<String>),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub body: SectionBody,
}

impl ReportSection {
    pub fn from_jobs(title: &str, jobs: &[JobListing]) -> Self {
        let body = if jobs.is_empty() {
            SectionBody::Placeholder
        } else {
            SectionBody::Listings(jobs.iter().map(job_line).collect())
        };
        Self {
            title: title.to_string(),
            body,
        }
    }

    pub fn heading(&self) -> String {
        format!("Jobs for {}:", self.title)
    }

    /// Lines shown under the heading
    pub fn lines(&self) -> Vec<&str> {
        match &self.body {
            SectionBody::Listings(lines) => lines.iter().map(String::as_str).collect(),
            SectionBody::Placeholder => vec![NO_JOBS_PLACEHOLDER],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub summary: String,
    pub summary_source: SummarySource,
    pub sections: Vec<ReportSection>,
}

/// Bullet line for one listing in the report
pub fn job_line(job: &JobListing) -> String {
    format!(
        "• {} at {} ({})",
        job.job_title,
        job.employer_name,
        job.location()
    )
}

/// Plain-text rendering of all listings, the input of the summarizer
pub fn summary_input(jobs: &JobsByTitle) -> String {
    let mut text = String::new();
    for (title, listings) in jobs.iter() {
        text.push_str(&format!("{}:\n", title));
        for job in listings {
            text.push_str(&format!(
                "- {} at {} in {}\n",
                job.job_title,
                job.employer_name,
                job.location()
            ));
        }
    }
    text
}

pub struct ReportBuilder<'a, S: ?Sized> {
    summarizer: &'a S,
    excerpt_chars: usize,
}

impl<'a, S: Summarizer + ?Sized> ReportBuilder<'a, S> {
    pub fn new(summarizer: &'a S, excerpt_chars: usize) -> Self {
        Self {
            summarizer,
            excerpt_chars,
        }
    }

    /// Build the report. A summarization failure falls back to an excerpt.
    pub async fn build(&self, jobs: &JobsByTitle) -> Report {
        let input = summary_input(jobs);
        let (summary, summary_source) = if jobs.total_listings() == 0 {
            (NO_LISTINGS_SUMMARY.to_string(), SummarySource::Fixed)
        } else {
            match self.summarizer.summarize(&input).await {
                Ok(summary) => (summary, SummarySource::Model),
                Err(e) => {
                    warn!("Summarization failed, using excerpt instead: {}", e);
                    let flattened = input.replace('\n', " ");
                    (
                        truncate_chars(flattened.trim(), self.excerpt_chars),
                        SummarySource::Excerpt {
                            reason: e.to_string(),
                        },
                    )
                }
            }
        };

        let sections = jobs
            .iter()
            .map(|(title, listings)| ReportSection::from_jobs(title, listings))
            .collect::<Vec<_>>();

        info!(
            "Built report with {} sections ({} listings)",
            sections.len(),
            jobs.total_listings()
        );

        Report {
            generated_at: Utc::now(),
            summary,
            summary_source,
            sections,
        }
    }
}

/// Typst markup for the report
pub fn render_typst(report: &Report) -> String {
    let mut doc = String::new();
    doc.push_str("#set page(paper: \"a4\", margin: 2cm)\n");
    doc.push_str("#set text(size: 11pt)\n\n");
    doc.push_str(&format!("= {}\n\n", escape_typst(REPORT_HEADING)));
    doc.push_str(&format!(
        "#text(size: 9pt, fill: gray)[Generated {}]\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    doc.push_str(&escape_typst(&report.summary));
    doc.push_str("\n\n");

    if let SummarySource::Excerpt { .. } = report.summary_source {
        doc.push_str("#text(size: 9pt, fill: gray)[Automatic summary unavailable; showing an excerpt of the listings.]\n\n");
    }

    for section in &report.sections {
        doc.push_str(&format!("== {}\n\n", escape_typst(&section.heading())));
        for line in section.lines() {
            doc.push_str(&escape_typst(line));
            doc.push_str(" \\\n");
        }
        doc.push('\n');
    }

    doc
}
