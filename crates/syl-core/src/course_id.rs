use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::text::clean_text;

/// Subject codes that different sites spell differently.
const SUBJECT_ALIASES: &[(&str, &str)] = &[("STAT", "STATISTIC")];

/// Natural key of a course: an uppercase subject code plus a course number.
///
/// Unique across the whole corpus; never changes once assigned.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "CourseIdParts")]
pub struct CourseId {
    subject: String,
    number: String,
}

#[derive(Deserialize, JsonSchema)]
struct CourseIdParts {
    subject: String,
    number: String,
}

impl TryFrom<CourseIdParts> for CourseId {
    type Error = CoreError;

    fn try_from(parts: CourseIdParts) -> Result<Self, Self::Error> {
        Self::new(&parts.subject, &parts.number)
    }
}

impl CourseId {
    /// Build a course id, uppercasing both parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCourseId`] unless the subject is 2-10 ASCII
    /// letters and the number is ASCII alphanumeric starting with a digit.
    pub fn new(subject: &str, number: &str) -> Result<Self, CoreError> {
        let subject = clean_text(subject).to_ascii_uppercase();
        let number = clean_text(number).to_ascii_uppercase();

        let subject_ok =
            (2..=10).contains(&subject.len()) && subject.bytes().all(|b| b.is_ascii_uppercase());
        let number_ok = number.bytes().next().is_some_and(|b| b.is_ascii_digit())
            && number.bytes().all(|b| b.is_ascii_alphanumeric());
        if !subject_ok || !number_ok {
            return Err(CoreError::InvalidCourseId(format!("{subject} {number}")));
        }

        let subject = SUBJECT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == subject)
            .map_or(subject, |(_, canonical)| (*canonical).to_string());

        Ok(Self { subject, number })
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)
    }
}

impl FromStr for CourseId {
    type Err = CoreError;

    /// Parses `"COMPSCI 220"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = clean_text(s);
        let (subject, number) = cleaned
            .split_once(' ')
            .ok_or_else(|| CoreError::InvalidCourseId(s.to_string()))?;
        Self::new(subject, number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("COMPSCI 220", "COMPSCI", "220")]
    #[case("compsci 590n", "COMPSCI", "590N")]
    #[case(" MATH\u{a0}131 ", "MATH", "131")]
    #[case("STAT 515", "STATISTIC", "515")]
    fn parses_and_canonicalizes(#[case] text: &str, #[case] subject: &str, #[case] number: &str) {
        let id: CourseId = text.parse().expect("valid course id");
        assert_eq!(id.subject(), subject);
        assert_eq!(id.number(), number);
    }

    #[rstest]
    #[case("COMPSCI")]
    #[case("C 220")]
    #[case("COMPSCI N590")]
    #[case("COMP SCI 220")]
    #[case("12 220")]
    fn rejects_malformed(#[case] text: &str) {
        assert!(text.parse::<CourseId>().is_err(), "{text:?} should not parse");
    }

    #[test]
    fn displays_subject_then_number() {
        let id = CourseId::new("info", "248").unwrap();
        assert_eq!(id.to_string(), "INFO 248");
    }

    #[test]
    fn deserialization_validates() {
        let id: CourseId =
            serde_json::from_str(r#"{"subject":"compsci","number":"220"}"#).unwrap();
        assert_eq!(id, CourseId::new("COMPSCI", "220").unwrap());
        assert!(serde_json::from_str::<CourseId>(r#"{"subject":"","number":"220"}"#).is_err());
    }
}
