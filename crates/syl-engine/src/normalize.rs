//! Name normalization for matching.
//!
//! Normalized forms are only ever compared, never displayed or stored: the
//! directory keeps the raw strings as aliases. Normalization cleans
//! whitespace, turns `"Last, First"` into `"First Last"`, transliterates to
//! ASCII, lowercases and strips punctuation hugging each token.

use std::collections::HashSet;

use deunicode::deunicode;
use syl_core::text::clean_text;

use crate::error::MalformedName;

/// A person name split into comparable tokens.
///
/// The first token is the lead (given-name-like) token; the rest are the
/// trailing (surname) tokens. Always holds at least two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    tokens: Vec<String>,
}

impl NormalizedName {
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn lead(&self) -> &str {
        &self.tokens[0]
    }

    #[must_use]
    pub fn trailing(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// Whether one of the two names abbreviates the other.
    ///
    /// Holds when either lead token is a prefix of the other (`tim`/`timothy`)
    /// and either trailing-token set contains the other (a dropped middle
    /// name is tolerated). Symmetric.
    #[must_use]
    pub fn is_short_form_of(&self, other: &Self) -> bool {
        let leads_agree =
            self.lead().starts_with(other.lead()) || other.lead().starts_with(self.lead());
        if !leads_agree {
            return false;
        }

        let mine: HashSet<&str> = self.trailing().iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = other.trailing().iter().map(String::as_str).collect();
        mine.is_subset(&theirs) || theirs.is_subset(&mine)
    }
}

/// Normalize a raw person name.
///
/// # Errors
///
/// Returns [`MalformedName`] when fewer than two tokens remain after cleanup.
pub fn normalize(raw: &str) -> Result<NormalizedName, MalformedName> {
    let tokens = comparison_tokens(raw);
    if tokens.len() < 2 {
        return Err(MalformedName {
            raw: raw.to_string(),
            tokens: tokens.len(),
        });
    }
    Ok(NormalizedName { tokens })
}

/// String-level [`NormalizedName::is_short_form_of`]. Malformed names never match.
#[must_use]
pub fn is_short_form_of(a: &str, b: &str) -> bool {
    match (normalize(a), normalize(b)) {
        (Ok(a), Ok(b)) => a.is_short_form_of(&b),
        _ => false,
    }
}

/// Comparison tokens of any text, without the two-token requirement.
///
/// Used as search terms by the directory's relevance scoring.
#[must_use]
pub fn comparison_tokens(raw: &str) -> Vec<String> {
    let cleaned = reorder_surname_first(&clean_text(raw));
    deunicode(&cleaned)
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .to_ascii_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// `"Richards, Timothy"` -> `"Timothy Richards"`. Other text is returned as is.
fn reorder_surname_first(cleaned: &str) -> String {
    let mut parts = cleaned.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(last), Some(first), None) if !last.trim().is_empty() && !first.trim().is_empty() => {
            format!("{} {}", first.trim(), last.trim())
        }
        _ => cleaned.to_string(),
    }
}
