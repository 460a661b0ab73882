// src/careers/cleaner.rs
//! Turns a career title into a job-search query.

const QUALIFIER: &str = "in ";
const DROPPED_WORD: &str = "Specialist";

/// Clean a career title for searching.
///
/// Cuts the title at the first standalone `"in "` (start of title or after
/// whitespace), removes every `"Specialist"`, then trims. The steps repeat
/// until the value is stable, so cleaning a cleaned title is a no-op.
/// The result can be empty.
pub fn clean_title(title: &str) -> String {
    let mut current = clean_once(title);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Clean every title, keeping order
pub fn clean_titles<I, S>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    titles
        .into_iter()
        .map(|t| clean_title(t.as_ref()))
        .collect()
}

fn clean_once(title: &str) -> String {
    let head = match find_standalone_qualifier(title) {
        Some(idx) => &title[..idx],
        None => title,
    };
    head.replace(DROPPED_WORD, "").trim().to_string()
}

fn find_standalone_qualifier(title: &str) -> Option<usize> {
    title.match_indices(QUALIFIER).map(|(idx, _)| idx).find(|&idx| {
        title[..idx]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuts_trailing_in_clause() {
        assert_eq!(clean_title("Software Engineer in Robotics"), "Software Engineer");
    }

    #[test]
    fn test_removes_specialist() {
        assert_eq!(clean_title("Data Specialist"), "Data");
        assert_eq!(clean_title("Specialist"), "");
    }

    #[test]
    fn test_qualifier_cut_runs_before_specialist_removal() {
        assert_eq!(clean_title("Marketing Analyst in Specialist Teams"), "Marketing Analyst");
        assert_eq!(clean_title("Specialist Nurse in Pediatrics"), "Nurse");
    }

    #[test]
    fn test_whole_title_qualifier_becomes_empty() {
        assert_eq!(clean_title("in Sales"), "");
    }

    #[test]
    fn test_in_inside_a_word_is_not_a_qualifier() {
        assert_eq!(clean_title("Cabin Crew"), "Cabin Crew");
        assert_eq!(clean_title("Machine Learning Engineer"), "Machine Learning Engineer");
    }

    #[test]
    fn test_case_sensitive_qualifier() {
        assert_eq!(clean_title("Working In Finance"), "Working In Finance");
    }

    #[test]
    fn test_plain_title_only_trimmed() {
        assert_eq!(clean_title("  UX Designer  "), "UX Designer");
    }

    #[test]
    fn test_idempotent() {
        let titles = [
            "Software Engineer in Robotics",
            "Data Specialist",
            "Specialistin Sales",
            "SpecSpecialistialist Advisor",
            "Cabin Crew in Airlines",
            "",
        ];
        for title in titles {
            let once = clean_title(title);
            assert_eq!(clean_title(&once), once, "not idempotent for {:?}", title);
        }
    }

    #[test]
    fn test_clean_titles_keeps_order() {
        assert_eq!(
            clean_titles(["Software Engineer in Robotics", "Data Specialist"]),
            vec!["Software Engineer", "Data"]
        );
    }
}
