use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::fields::SECTION_HEADINGS;

/// Lines collected after a bare skills heading.
const MAX_SKILL_LINES: usize = 3;
const SKILL_LINE_SEPARATOR: &str = ", ";

static INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    // A dash only separates when spaced, so "Skill-set" stays a heading
    Regex::new(r"(?i)skills?(?:\s*:|\s+[-\x{2013}\x{2014}](?:\s|$))\s*(.*)$")
        .expect("valid inline skills regex")
});

static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-\x{2022}\x{00b7}*\x{25aa}\x{25e6}]+").expect("valid bullet regex")
});

static NON_PRINTABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x20-\x7E]+").expect("valid non-printable regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Returns the skills snippet following the first line mentioning "skill".
///
/// `Skills: Rust, Go` yields the inline remainder. A bare heading yields up to
/// three following non-empty lines, bullets stripped, cut short by the next
/// competing section heading. The result is printable ASCII only.
pub fn extract_skills(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let heading_idx = lines
        .iter()
        .position(|l| !l.is_empty() && l.to_lowercase().contains("skill"))?;

    let inline = INLINE_RE
        .captures(lines[heading_idx])
        .and_then(|c| c.get(1))
        .map(|m| normalise(m.as_str()))
        .filter(|s| !s.is_empty());
    if inline.is_some() {
        return inline;
    }

    let mut collected = Vec::with_capacity(MAX_SKILL_LINES);
    for line in lines[heading_idx + 1..].iter().filter(|l| !l.is_empty()) {
        if collected.len() == MAX_SKILL_LINES {
            break;
        }
        let lower = line.to_lowercase();
        if SECTION_HEADINGS.iter().any(|h| lower.contains(h)) {
            break;
        }
        let item = normalise(&BULLET_RE.replace(line, ""));
        if !item.is_empty() {
            collected.push(item);
        }
    }

    if collected.is_empty() {
        return None;
    }
    Some(normalise(&collected.join(SKILL_LINE_SEPARATOR)))
}

/// Replaces non-printable runs with a space and collapses whitespace.
fn normalise(raw: &str) -> String {
    let printable = NON_PRINTABLE_RE.replace_all(raw, " ");
    WHITESPACE_RE.replace_all(&printable, " ").trim().to_string()
}
