//! Phone extraction, biased toward one national numbering plan.
//!
//! Labeled lines ("Phone:", "Mobile", "Tel", "Contact") are tried first. Only
//! plain-text sources get a single unlabeled fallback scan; converted binary
//! documents are full of timestamps and object ids that would pass as numbers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::fields::{trimmed_lines, ExtractionOptions, NumberingPlan};

static LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:phone|mobile|tel|contact)\b[^+\d]*(\+?[0-9()\[\]\s-]{6,20})")
        .expect("valid labeled phone regex")
});

// Starts on a digit or '+' and never crosses a line break.
static FALLBACK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d[0-9()\[\] \t-]{5,19}").expect("valid fallback phone regex")
});

/// Returns the first phone number satisfying the numbering plan, formatted
/// for display, or `None`.
pub fn extract_phone(text: &str, options: &ExtractionOptions) -> Option<String> {
    let plan = options.numbering_plan;

    for line in trimmed_lines(text).filter(|l| !l.is_empty()) {
        let Some(candidate) = LABELED_RE.captures(line).and_then(|c| c.get(1)) else {
            continue;
        };
        let cleaned = clean_candidate(candidate.as_str());
        if plan.is_valid(&cleaned) {
            return Some(plan.format(&cleaned));
        }
    }

    if options.binary_document {
        return None;
    }

    let cleaned = clean_candidate(FALLBACK_RE.find(text)?.as_str());
    plan.is_valid(&cleaned).then(|| plan.format(&cleaned))
}

/// Keeps digits and '+' only.
fn clean_candidate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn digits_of(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

impl NumberingPlan {
    /// Whether a cleaned candidate (digits and '+') is a number under this plan.
    pub fn is_valid(&self, cleaned: &str) -> bool {
        match self {
            NumberingPlan::Australia => {
                let digits = digits_of(cleaned);
                if cleaned.starts_with("+61") {
                    return digits.len() == 11;
                }
                digits.len() == 10 && digits.starts_with('0')
            }
        }
    }

    /// Groups a valid number into its conventional written form.
    /// Invalid input comes back as bare digits.
    pub fn format(&self, cleaned: &str) -> String {
        if !self.is_valid(cleaned) {
            return digits_of(cleaned);
        }
        match self {
            NumberingPlan::Australia => {
                let digits = digits_of(cleaned);
                if cleaned.starts_with("+61") {
                    let national = &digits[2..];
                    return if national.starts_with('4') {
                        format!(
                            "+61 {} {} {}",
                            &national[..3],
                            &national[3..6],
                            &national[6..]
                        )
                    } else {
                        format!(
                            "+61 {} {} {}",
                            &national[..1],
                            &national[1..5],
                            &national[5..]
                        )
                    };
                }
                let area = digits.as_bytes().get(1).copied();
                match area {
                    Some(b'4') => format!("{} {} {}", &digits[..4], &digits[4..7], &digits[7..]),
                    Some(b'2' | b'3' | b'7' | b'8') => {
                        format!("{} {} {}", &digits[..2], &digits[2..6], &digits[6..])
                    }
                    _ => digits,
                }
            }
        }
    }
}
