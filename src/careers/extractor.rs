// src/careers/extractor.rs
//! Pulls career titles out of the numbered list returned by the model.
//!
//! Two entry points exist. [`extract_titles`] is the lenient matcher: any
//! `"<n>. <text>"` run ending at a newline (or at the end of the text) is a
//! title, wherever it starts. [`parse_suggestions`] is the strict parser used
//! by the session: items must start a line (markdown heading or emphasis
//! markers in front of the number are ignored), following lines are attached
//! to the item as details, items without a title are dropped, and a text
//! without any titled item is an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SuggestionParseError;

static NUMBERED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\.\s(.+?)(?:\n|\z)").expect("numbered run pattern is valid")
});

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(?:\s+(.*))?$").expect("numbered line pattern is valid")
});

/// One numbered item of the model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub number: u32,
    pub title: String,
    pub details: Vec<String>,
}

/// Lenient extraction, in source order, duplicates kept.
///
/// A numbered item on the last line is captured even without a trailing
/// newline.
pub fn extract_titles(text: &str) -> Vec<String> {
    NUMBERED_RUN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('\r').to_string())
        .collect()
}

/// Strict parse of the suggestion list.
pub fn parse_suggestions(text: &str) -> Result<Vec<CareerSuggestion>, SuggestionParseError> {
    if text.trim().is_empty() {
        return Err(SuggestionParseError::Blank);
    }

    let mut suggestions: Vec<CareerSuggestion> = Vec::new();
    // details attach only while the last numbered item had a title
    let mut in_item = false;

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((number, rest)) = numbered_line(strip_markup(line)) {
            let (title, trailing) = split_title(rest);
            if title.is_empty() {
                warn!("Skipping numbered item without a title on line {}", index + 1);
                in_item = false;
                continue;
            }

            suggestions.push(CareerSuggestion {
                number,
                title,
                details: trailing.into_iter().collect(),
            });
            in_item = true;
            continue;
        }

        match suggestions.last_mut() {
            Some(current) if in_item => current.details.push(strip_bullet(line).to_string()),
            Some(_) => debug!("Skipping detail of an untitled item: {}", line),
            None => debug!("Skipping preamble line: {}", line),
        }
    }

    if suggestions.is_empty() {
        warn!("Suggestion text contained no numbered items");
        return Err(SuggestionParseError::NoNumberedItems);
    }

    Ok(suggestions)
}

/// Titles of the strictly parsed suggestions, in order
pub fn parse_titles(text: &str) -> Result<Vec<String>, SuggestionParseError> {
    Ok(parse_suggestions(text)?
        .into_iter()
        .map(|s| s.title)
        .collect())
}

/// Strict titles, or the lenient extraction when the strict parse finds
/// nothing. Errors only when neither finds a title.
pub fn suggestion_titles(text: &str) -> Result<Vec<String>, SuggestionParseError> {
    match parse_titles(text) {
        Ok(titles) => Ok(titles),
        Err(e) => {
            let titles = extract_titles(text);
            if titles.is_empty() {
                return Err(e);
            }
            debug!("Strict parse failed ({}), using lenient extraction", e);
            Ok(titles)
        }
    }
}

fn numbered_line(line: &str) -> Option<(u32, &str)> {
    let caps = NUMBERED_LINE.captures(line)?;
    let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((number, rest))
}

/// Drops heading or emphasis markers in front of a list number, as in
/// `### 1. Title` or `**1. Title**`.
fn strip_markup(line: &str) -> &str {
    line.trim_start_matches(['#', '*', '_']).trim_start()
}

/// Splits `**Title** - blurb` or `Title: blurb` into the bare title and the
/// trailing blurb.
fn split_title(rest: &str) -> (String, Option<String>) {
    let rest = rest.trim();

    for marker in ["**", "__"] {
        if let Some(inner) = rest.strip_prefix(marker) {
            if let Some(end) = inner.find(marker) {
                let title = inner[..end].trim().to_string();
                let trailing = inner[end + marker.len()..]
                    .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
                    .trim();
                return (title, non_empty(trailing));
            }
        }
    }

    let rest = rest.replace("**", "").replace("__", "");
    for separator in [" - ", ": "] {
        if let Some((title, trailing)) = rest.split_once(separator) {
            return (title.trim().to_string(), non_empty(trailing.trim()));
        }
    }

    (rest.trim().to_string(), None)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .unwrap_or(line)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_well_formed_list() {
        assert_eq!(extract_titles("1. X\n2. Y\n3. Z\n"), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_extract_keeps_order_and_duplicates() {
        let text = "2. Nurse\n1. Nurse\n3. Pilot\n";
        assert_eq!(extract_titles(text), vec!["Nurse", "Nurse", "Pilot"]);
    }

    #[test]
    fn test_extract_no_matches() {
        assert!(extract_titles("no list here").is_empty());
        assert!(extract_titles("").is_empty());
    }

    #[test]
    fn test_extract_final_line_without_newline() {
        assert_eq!(
            extract_titles("1. Data Analyst\n2. UX Designer"),
            vec!["Data Analyst", "UX Designer"]
        );
    }

    #[test]
    fn test_extract_ignores_description_bullets() {
        let text = "1. Software Engineer in Robotics\n   - Build robots\n   - First Step: take a course\n2. Data Specialist\n";
        assert_eq!(
            extract_titles(text),
            vec!["Software Engineer in Robotics", "Data Specialist"]
        );
    }

    #[test]
    fn test_extract_strips_carriage_return() {
        assert_eq!(extract_titles("1. Chef\r\n"), vec!["Chef"]);
    }

    #[test]
    fn test_parse_attaches_details() {
        let text = "Here are some ideas:\n\n1. Data Scientist\n   - Analyse data\n   - First Step: learn Python\n2. **UX Designer** - Design products\n";
        let parsed = parse_suggestions(text).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].number, 1);
        assert_eq!(parsed[0].title, "Data Scientist");
        assert_eq!(
            parsed[0].details,
            vec!["Analyse data", "First Step: learn Python"]
        );
        assert_eq!(parsed[1].title, "UX Designer");
        assert_eq!(parsed[1].details, vec!["Design products"]);
    }

    #[test]
    fn test_parse_rejects_blank_text() {
        assert_eq!(parse_suggestions("   \n"), Err(SuggestionParseError::Blank));
    }

    #[test]
    fn test_parse_rejects_text_without_items() {
        assert_eq!(
            parse_suggestions("I cannot help with that."),
            Err(SuggestionParseError::NoNumberedItems)
        );
    }

    #[test]
    fn test_parse_skips_untitled_items() {
        let parsed = parse_suggestions("1. Chef\n   - cook\n2.\n   - orphan\n3. Pilot\n").unwrap();

        let titles: Vec<&str> = parsed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Chef", "Pilot"]);
        assert_eq!(parsed[0].details, vec!["cook"]);
        assert!(parsed[1].details.is_empty());
    }

    #[test]
    fn test_parse_only_untitled_items_is_an_error() {
        assert_eq!(
            parse_suggestions("1.\n2. **\n"),
            Err(SuggestionParseError::NoNumberedItems)
        );
    }

    #[test]
    fn test_parse_markdown_headings() {
        let text = "### 1. Data Scientist\n- Analyse data\n### 2. UX Designer\n- Design\n";
        assert_eq!(
            parse_titles(text).unwrap(),
            vec!["Data Scientist", "UX Designer"]
        );
    }

    #[test]
    fn test_parse_bold_numbered_items() {
        let text = "**1. Data Scientist**\n**2. Cloud Architect:** runs infrastructure\n";
        let parsed = parse_suggestions(text).unwrap();

        assert_eq!(parsed[0].title, "Data Scientist");
        assert_eq!(parsed[1].title, "Cloud Architect");
        assert_eq!(parsed[1].details, vec!["runs infrastructure"]);
    }

    #[test]
    fn test_parse_splits_plain_blurb() {
        let parsed = parse_suggestions("1. Data Scientist - Analyse data\n2. Full-Stack Developer\n").unwrap();

        assert_eq!(parsed[0].title, "Data Scientist");
        assert_eq!(parsed[0].details, vec!["Analyse data"]);
        assert_eq!(parsed[1].title, "Full-Stack Developer");
    }

    #[test]
    fn test_suggestion_titles_falls_back_to_lenient() {
        // numbers in the middle of a line only match leniently
        let text = "Options: 1. Chef\nalso 2. Pilot\n";
        assert_eq!(parse_titles(text), Err(SuggestionParseError::NoNumberedItems));
        assert_eq!(suggestion_titles(text).unwrap(), vec!["Chef", "Pilot"]);
    }

    #[test]
    fn test_suggestion_titles_without_any_item() {
        assert_eq!(
            suggestion_titles("Sorry, I can't help."),
            Err(SuggestionParseError::NoNumberedItems)
        );
        assert_eq!(suggestion_titles(""), Err(SuggestionParseError::Blank));
    }

    #[test]
    fn test_parse_titles_matches_lenient_for_well_formed_text() {
        let text = "1. Software Engineer in Robotics\n2. Data Specialist\n";
        assert_eq!(parse_titles(text).unwrap(), extract_titles(text));
    }
}
