//! Text cleanup shared by the scraper boundary and the name normalizer.

/// Replace non-breaking spaces, tabs and newlines with ordinary spaces,
/// collapse whitespace runs and trim both ends.
#[must_use]
pub fn clean_text(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical spelling of an offering-frequency string.
///
/// `"Fall/Spring/Summer"` becomes `"Fall, Spring, and Summer"`; any other
/// `/` separator becomes `" and "`.
#[must_use]
pub fn normalize_frequency(raw: &str) -> String {
    let cleaned = clean_text(raw);
    if cleaned == "Fall/Spring/Summer" {
        return String::from("Fall, Spring, and Summer");
    }
    clean_text(&cleaned.replace('/', " and "))
}
