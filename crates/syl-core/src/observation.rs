use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::course_id::CourseId;
use crate::semester::Semester;
use crate::source::SourceSystem;

/// One scrape of one course in one semester from one source.
///
/// Produced by a source-specific scraper and consumed exactly once by the
/// course merge engine. The course key is validated on deserialization, so a
/// malformed subject or number never reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseObservation {
    #[serde(flatten)]
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schemars(with = "String")]
    pub semester: Semester,
    pub source: SourceSystem,
    /// Raw instructor names in listing order. Empty when the listing names no one.
    #[serde(default)]
    pub instructors: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub prerequisites: Option<String>,
}

impl CourseObservation {
    /// Minimal observation with only the required fields set.
    #[must_use]
    pub fn new(id: CourseId, title: &str, semester: Semester, source: SourceSystem) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: String::new(),
            semester,
            source,
            instructors: Vec::new(),
            website: None,
            frequency: None,
            prerequisites: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn with_instructors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructors = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_website(mut self, url: &str) -> Self {
        self.website = Some(url.to_string());
        self
    }

    #[must_use]
    pub fn with_frequency(mut self, frequency: &str) -> Self {
        self.frequency = Some(frequency.to_string());
        self
    }

    #[must_use]
    pub fn with_prerequisites(mut self, prerequisites: &str) -> Self {
        self.prerequisites = Some(prerequisites.to_string());
        self
    }
}
