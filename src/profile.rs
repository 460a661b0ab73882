// src/profile.rs
//! User background and the career-suggestion prompt built from it.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum EducationLevel {
    HighSchool,
    Diploma,
    Bachelors,
    Masters,
    Phd,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 5] = [
        EducationLevel::HighSchool,
        EducationLevel::Diploma,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::Phd,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Diploma => "Diploma",
            EducationLevel::Bachelors => "Bachelor's",
            EducationLevel::Masters => "Master's",
            EducationLevel::Phd => "PhD",
        }
    }

    /// Accepts a 1-based menu number or a label, case-insensitively
    pub fn from_choice(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied();
        }
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(input))
            .or_else(|| <Self as ValueEnum>::from_str(input, true).ok())
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub education: Option<EducationLevel>,
    pub interests: String,
    pub skills: String,
    pub career_goals: String,
}

impl UserProfile {
    /// Every field must be filled; all gaps are reported at once
    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut missing = Vec::new();
        if self.education.is_none() {
            missing.push("education");
        }
        if self.interests.trim().is_empty() {
            missing.push("interests");
        }
        if self.skills.trim().is_empty() {
            missing.push("skills");
        }
        if self.career_goals.trim().is_empty() {
            missing.push("career goals");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProfileError { missing })
        }
    }

    /// Prompt asking for three numbered career paths
    pub fn career_prompt(&self) -> Result<String, ProfileError> {
        self.validate()?;
        let education = self.education.map(|e| e.label()).unwrap_or_default();

        Ok(format!(
            "Suggest 3 career paths for someone with the following background:
Education: {}
Interests: {}
Skills: {}
Career Goals: {}

Use this format:
1. Career Title
   - Description
   - First Step to Explore It
",
            education,
            self.interests.trim(),
            self.skills.trim(),
            self.career_goals.trim()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> UserProfile {
        UserProfile {
            education: Some(EducationLevel::Bachelors),
            interests: "technology, design".to_string(),
            skills: "coding".to_string(),
            career_goals: "A creative job".to_string(),
        }
    }

    #[test]
    fn test_complete_profile_is_valid() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_reports_every_missing_field() {
        let profile = UserProfile {
            interests: "  ".to_string(),
            ..Default::default()
        };
        let err = profile.validate().unwrap_err();
        assert_eq!(
            err.missing,
            vec!["education", "interests", "skills", "career goals"]
        );
    }

    #[test]
    fn test_prompt_format() {
        let prompt = complete().career_prompt().unwrap();
        assert!(prompt.starts_with(
            "Suggest 3 career paths for someone with the following background:\nEducation: Bachelor's\n"
        ));
        assert!(prompt.contains("Career Goals: A creative job\n\nUse this format:\n1. Career Title\n   - Description\n"));
        assert!(prompt.ends_with("   - First Step to Explore It\n"));
    }

    #[test]
    fn test_prompt_requires_valid_profile() {
        let profile = UserProfile {
            education: None,
            ..complete()
        };
        assert!(profile.career_prompt().is_err());
    }

    #[test]
    fn test_education_from_choice() {
        assert_eq!(EducationLevel::from_choice("1"), Some(EducationLevel::HighSchool));
        assert_eq!(EducationLevel::from_choice("5"), Some(EducationLevel::Phd));
        assert_eq!(EducationLevel::from_choice("0"), None);
        assert_eq!(EducationLevel::from_choice("6"), None);
        assert_eq!(EducationLevel::from_choice("master's"), Some(EducationLevel::Masters));
        assert_eq!(EducationLevel::from_choice("high-school"), Some(EducationLevel::HighSchool));
        assert_eq!(EducationLevel::from_choice("Select"), None);
    }
}
