// src/careers/mod.rs
pub mod cleaner;
pub mod extractor;

pub use cleaner::{clean_title, clean_titles};
pub use extractor::{
    extract_titles, parse_suggestions, parse_titles, suggestion_titles, CareerSuggestion,
};
