// src/cli.rs
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::careers::{clean_title, suggestion_titles};
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::jobs::{AttemptOutcome, JSearchBoard, JobBoard, JobSearchClient, JobsByTitle};
use crate::llm::{CareerAdvisor, ChatClient, InferenceSummarizer, Summarizer};
use crate::profile::{EducationLevel, UserProfile};
use crate::report::{PdfExporter, REPORT_MIME_TYPE};
use crate::session::{export_report, ExportFormat, JobsPage, Page, Session};
use crate::utils::{ensure_directory, read_file_content};

#[derive(Parser)]
#[command(name = "jobgenie")]
#[command(about = "AI career coach: career suggestions, matching job listings and a PDF summary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory receiving job_recommendations.pdf
    #[arg(long, global = true, default_value = "out")]
    pub output_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Guided session: profile, suggestions, jobs, export (default)
    Interactive,
    /// Ask for three career suggestions and print them
    Suggest {
        #[arg(long, value_enum)]
        education: EducationLevel,
        #[arg(long)]
        interests: String,
        #[arg(long)]
        skills: String,
        #[arg(long)]
        goals: String,
    },
    /// Search jobs for the careers listed in a saved suggestion text
    Jobs {
        #[arg(long)]
        suggestions: PathBuf,
        /// Also export the PDF report
        #[arg(long)]
        export: bool,
    },
    /// Show the titles and search queries found in a suggestion text
    Titles {
        #[arg(long)]
        suggestions: PathBuf,
    },
}

/// Clients and settings used by the session actions
pub struct Services<A, B, S> {
    pub advisor: A,
    pub search: JobSearchClient<B>,
    pub summarizer: S,
    pub exporter: PdfExporter,
    pub excerpt_chars: usize,
    pub output_dir: PathBuf,
}

pub type RemoteServices = Services<ChatClient, JSearchBoard, InferenceSummarizer>;

impl RemoteServices {
    pub fn from_config(config: &AppConfig, output_dir: PathBuf) -> Result<Self> {
        let settings = &config.settings;
        let credentials = &config.credentials;

        let advisor = ChatClient::new(credentials.openrouter_key.clone(), &settings.chat)
            .context("Failed to create chat client")?;
        let board = JSearchBoard::new(credentials.rapidapi_key.clone(), &settings.job_search)
            .context("Failed to create job search client")?;
        let summarizer = InferenceSummarizer::new(credentials.hf_token.clone(), &settings.summary)
            .context("Failed to create summarization client")?;

        Ok(Self {
            advisor,
            search: JobSearchClient::new(
                board,
                settings.job_search.primary_country.clone(),
                settings.job_search.secondary_country.clone(),
            ),
            summarizer,
            exporter: PdfExporter::new(),
            excerpt_chars: settings.summary.excerpt_chars,
            output_dir,
        })
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Interactive);

    if let Command::Titles { suggestions } = &command {
        let text = read_file_content(suggestions).await?;
        print!("{}", render_titles(&text));
        return Ok(());
    }

    let config = AppConfig::load().context("Failed to load configuration")?;
    let services = RemoteServices::from_config(&config, cli.output_dir)?;
    let stdout = std::io::stdout();

    match command {
        Command::Interactive => {
            let stdin = std::io::stdin();
            run_interactive(&services, stdin.lock(), stdout.lock()).await
        }
        Command::Suggest {
            education,
            interests,
            skills,
            goals,
        } => {
            let profile = UserProfile {
                education: Some(education),
                interests,
                skills,
                career_goals: goals,
            };
            let mut session = Session::new();
            let text = session
                .submit_profile(&services.advisor, &profile)
                .await
                .context("Career suggestion failed")?;
            println!("{}", text);
            Ok(())
        }
        Command::Jobs {
            suggestions,
            export,
        } => {
            let mut session = Session::new();
            session.set_career_result(read_file_content(&suggestions).await?);

            let page = session
                .show_jobs(&services.search)
                .await
                .context("Job search failed")?;
            print!("{}", render_jobs_page(&page));

            if export {
                let mut out = stdout.lock();
                export_to(&services, &page.jobs, &mut out).await?;
            }
            Ok(())
        }
        Command::Titles { .. } => Ok(()),
    }
}

/// Titles and cleaned queries of a suggestion text, one per line
pub fn render_titles(text: &str) -> String {
    let titles = match suggestion_titles(text) {
        Ok(titles) => titles,
        Err(e) => {
            info!("No titles in suggestion text: {}", e);
            return "No career titles found.\n".to_string();
        }
    };

    titles
        .iter()
        .map(|title| {
            let cleaned = clean_title(title);
            if cleaned.is_empty() {
                format!("{} -> (no usable search query)\n", title)
            } else {
                format!("{} -> {}\n", title, cleaned)
            }
        })
        .collect()
}

/// Text rendering of the jobs page
pub fn render_jobs_page(page: &JobsPage) -> String {
    let mut out = String::from("💼 Job Recommendations\n\n");

    for search in &page.searches {
        if search.cleaned.is_empty() {
            out.push_str(&format!(
                "⚠️  Skipping \"{}\": no usable search query\n\n",
                search.title
            ));
            continue;
        }

        out.push_str(&format!("📌 Jobs for: {}\n", search.cleaned));
        out.push_str(&format!("   Searching with: `{}`\n", search.cleaned));

        if search.result.listings.is_empty() {
            if search.result.all_failed() {
                out.push_str("   ❌ Job search is unavailable right now.\n");
            } else {
                out.push_str("   🔍 No jobs found for this role.\n");
            }
        }

        for job in &search.result.listings {
            out.push_str(&format!(
                "   • {} at {} - {}\n",
                job.job_title,
                job.employer_name,
                job.location()
            ));
            if let Some(link) = &job.job_apply_link {
                out.push_str(&format!("     View Job Posting: {}\n", link));
            }
        }

        let failures = search
            .result
            .attempts
            .iter()
            .filter(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
            .count();
        if failures > 0 && !search.result.all_failed() {
            out.push_str(&format!("   ({} search request(s) failed)\n", failures));
        }
        out.push('\n');
    }

    out
}

async fn export_to<A, B, S, W>(
    services: &Services<A, B, S>,
    jobs: &JobsByTitle,
    out: &mut W,
) -> Result<()>
where
    S: Summarizer,
    W: Write,
{
    ensure_directory(&services.output_dir).await?;
    writeln!(out, "Generating summary and formatting PDF...")?;

    let exported = export_report(
        jobs,
        &services.summarizer,
        services.excerpt_chars,
        &services.exporter,
        &services.output_dir,
    )
    .await
    .context("PDF export failed")?;

    match exported.format {
        ExportFormat::Pdf => writeln!(
            out,
            "✅ PDF ready: {} ({})",
            exported.path.display(),
            REPORT_MIME_TYPE
        )?,
        ExportFormat::TypstSource => writeln!(
            out,
            "⚠️  typst is not installed; report source written to {} (run `typst compile` on it to get the PDF)",
            exported.path.display()
        )?,
    }
    Ok(())
}

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// One trimmed line, `None` at end of input
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn read_profile(&mut self) -> Result<Option<UserProfile>> {
        self.say("\n🎓 Your Background")?;
        for (i, level) in EducationLevel::ALL.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, level))?;
        }

        let Some(education) = self.ask("What is your highest education level? (1-5): ")? else {
            return Ok(None);
        };
        let Some(interests) = self.ask("What are your interests? (e.g., technology, design): ")? else {
            return Ok(None);
        };
        let Some(skills) = self.ask("What are your strongest skills? (e.g., coding, writing): ")? else {
            return Ok(None);
        };
        let Some(career_goals) = self.ask("What are your career goals?: ")? else {
            return Ok(None);
        };

        Ok(Some(UserProfile {
            education: EducationLevel::from_choice(&education),
            interests,
            skills,
            career_goals,
        }))
    }
}

/// Guided landing → main → jobs flow over any line-based console
pub async fn run_interactive<A, B, S, R, W>(
    services: &Services<A, B, S>,
    input: R,
    output: W,
) -> Result<()>
where
    A: CareerAdvisor,
    B: JobBoard,
    S: Summarizer,
    R: BufRead,
    W: Write,
{
    let mut console = Console { input, output };
    let mut session = Session::new();
    // set when the user asked to replace the suggestion shown on the main page
    let mut reenter_profile = false;

    loop {
        match session.page() {
            Page::Landing => {
                console.say("\nJobGenie | AI Career Coach")?;
                console.say("Unlock the future you: discover career paths and job opportunities tailored to you.")?;
                console.say("  [s] Get started   [l] Learn more   [q] Quit")?;

                match console.ask("> ")?.as_deref() {
                    None | Some("q") => break,
                    Some("l") => {
                        console.say("JobGenie suggests career paths from your background, finds job listings for them and exports a PDF summary.")?;
                    }
                    Some(_) => session.go_to(Page::Main),
                }
            }
            Page::Main => {
                if !reenter_profile {
                    if let Some(text) = session.career_result() {
                        let text = text.to_string();
                        console.say("\n💡 AI-Generated Career Suggestions")?;
                        console.say(&text)?;

                        match console
                            .ask("[j] Show job recommendations   [r] Re-enter profile   [q] Quit\n> ")?
                            .as_deref()
                        {
                            None | Some("q") => break,
                            Some("j") => session.go_to(Page::Jobs),
                            Some(_) => reenter_profile = true,
                        }
                        continue;
                    }
                }

                let Some(profile) = console.read_profile()? else {
                    break;
                };

                console.say("🧠 Thinking...")?;
                match session.submit_profile(&services.advisor, &profile).await {
                    Ok(_) => reenter_profile = false,
                    Err(e @ SessionError::Profile(_)) => {
                        console.say(&format!("⚠️  {}", e))?;
                        reenter_profile = true;
                    }
                    Err(e) => {
                        error!("Career suggestion failed: {}", e);
                        console.say(&format!("❌ {}", e))?;
                        reenter_profile = false;
                    }
                }
            }
            Page::Jobs => {
                match session.show_jobs(&services.search).await {
                    Ok(page) => {
                        console.say(&render_jobs_page(&page))?;
                        match console
                            .ask("[e] Export as PDF with AI summary   [b] Back   [q] Quit\n> ")?
                            .as_deref()
                        {
                            None | Some("q") => break,
                            Some("e") => {
                                if let Err(e) = export_to(services, &page.jobs, &mut console.output).await {
                                    error!("Export failed: {:#}", e);
                                    console.say(&format!("❌ {:#}", e))?;
                                }
                                session.go_to(Page::Main);
                            }
                            Some(_) => session.go_to(Page::Main),
                        }
                    }
                    Err(e) => {
                        console.say(&format!("⚠️  {}", e))?;
                        session.go_to(Page::Main);
                    }
                }
            }
        }
    }

    console.say("Goodbye!")?;
    Ok(())
}
