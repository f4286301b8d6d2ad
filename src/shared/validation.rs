use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidateUrl;

lazy_static! {
    /// Regex for external photo references
    /// Must use the http or https scheme and contain no whitespace
    /// - Valid: "http://x.com/a.jpg", "HTTPS://cdn.example.org/bici.png"
    /// - Invalid: "not-a-url", "ftp://x.com/a.jpg", "data:image/png;base64,...", "http://x.com/a b.jpg"
    pub static ref EXTERNAL_URL_REGEX: Regex = Regex::new(r"(?i)^https?://\S+$").unwrap();
}

/// Whether `candidate` is a syntactically valid external (http/https) URL.
pub fn is_external_url(candidate: &str) -> bool {
    EXTERNAL_URL_REGEX.is_match(candidate) && candidate.validate_url()
}
