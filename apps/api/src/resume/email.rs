use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Returns the first email-shaped substring of `text`, verbatim.
/// Shape only: no deliverability check, first match wins.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_plain_address() {
        assert_eq!(
            extract_email("Contact me at jordan.lee@example.com today"),
            Some("jordan.lee@example.com".to_string())
        );
    }

    #[test]
    fn test_first_match_wins() {
        let text = "work: j.lee@corp.com.au\npersonal: jordan+cv@gmail.com";
        assert_eq!(extract_email(text), Some("j.lee@corp.com.au".to_string()));
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        assert_eq!(
            extract_email("Email: sam_o%k@mail-host.io."),
            Some("sam_o%k@mail-host.io".to_string())
        );
    }

    #[test]
    fn test_single_letter_tld_rejected() {
        assert_eq!(extract_email("someone@host.c"), None);
    }

    #[test]
    fn test_no_address() {
        assert_eq!(extract_email("Jordan Lee\nSydney NSW"), None);
        assert_eq!(extract_email("@handle on twitter"), None);
    }
}
