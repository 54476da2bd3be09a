use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::fields::{alpha_ratio, trimmed_lines, ExtractionOptions, SECTION_HEADINGS};

const MAX_NAME_LEN: usize = 40;
const MAX_BINARY_LINE_LEN: usize = 60;
const MIN_NAME_ALPHA_RATIO: f64 = 0.6;
const MIN_BINARY_ALPHA_RATIO: f64 = 0.5;

static LABELED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^name\s*[:-]\s*(.*)$").expect("valid name label regex"));

// 1-4 words of ASCII letters separated by whitespace.
static NAME_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+(?:\s+[A-Za-z]+){0,3}$").expect("valid name shape regex")
});

/// Returns a labeled name ("Name: ...") or else the first line shaped like a
/// personal name.
pub fn extract_name(text: &str, options: &ExtractionOptions) -> Option<String> {
    let lines: Vec<&str> = trimmed_lines(text).filter(|l| !l.is_empty()).collect();

    let labeled = lines.iter().find_map(|line| {
        LABELED_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|rest| !rest.is_empty())
    });
    if let Some(name) = labeled {
        return Some(name.to_string());
    }

    lines
        .into_iter()
        .filter(|line| !options.binary_document || !is_binary_noise(line))
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

/// Lines a converted binary document produces that are never names.
fn is_binary_noise(line: &str) -> bool {
    line.get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("%pdf"))
        || line.chars().all(|c| c.is_ascii_digit())
        || line.chars().count() > MAX_BINARY_LINE_LEN
        || line.contains('@')
        || alpha_ratio(line) < MIN_BINARY_ALPHA_RATIO
}

fn looks_like_name(line: &str) -> bool {
    if line.chars().count() > MAX_NAME_LEN {
        return false;
    }
    if line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if !NAME_SHAPE_RE.is_match(line) || alpha_ratio(line) < MIN_NAME_ALPHA_RATIO {
        return false;
    }
    let lower = line.to_lowercase();
    !(lower.contains("skill") || SECTION_HEADINGS.contains(&lower.as_str()))
}
