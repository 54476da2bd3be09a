//! Extracted field record and the knobs shared by every extractor.

use serde::{Deserialize, Serialize};

use crate::resume::{email, name, phone, skills};

/// Section headings that end a skills block and never count as a name.
pub(crate) const SECTION_HEADINGS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "education",
    "projects",
    "profile",
    "summary",
];

/// Country rule set used to validate and format phone numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingPlan {
    /// +61 followed by 9 digits, or a 10-digit number with trunk prefix 0.
    #[default]
    Australia,
}

/// Options controlling the heuristics for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Text came from a binary document: filter noise lines, no unlabeled phone scan.
    pub binary_document: bool,
    pub numbering_plan: NumberingPlan,
}

/// Fields detected in a resume. Absence is a valid outcome for every member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl ExtractedFields {
    pub fn detected_count(&self) -> usize {
        [&self.name, &self.email, &self.phone, &self.skills]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}

/// Runs every extractor once over `text`.
pub fn extract_fields(text: &str, options: &ExtractionOptions) -> ExtractedFields {
    ExtractedFields {
        name: name::extract_name(text, options),
        email: email::extract_email(text),
        phone: phone::extract_phone(text, options),
        skills: skills::extract_skills(text),
    }
}

/// Splits on line breaks and trims each line. Empty lines are kept.
pub(crate) fn trimmed_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim)
}

/// Share of ASCII letters among all characters of `line`.
pub(crate) fn alpha_ratio(line: &str) -> f64 {
    let total = line.chars().count();
    if total == 0 {
        return 0.0;
    }
    let letters = line.chars().filter(|c| c.is_ascii_alphabetic()).count();
    letters as f64 / total as f64
}
