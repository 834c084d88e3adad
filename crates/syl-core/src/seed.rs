use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of the raw staff directory, as scraped from a department listing.
///
/// `names` holds every name form the directory shows for the person, the
/// `"First Last"` form first. Seeds carry no courses; those are attached
/// during resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StaffSeed {
    pub names: Vec<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl StaffSeed {
    /// Seed with the given names and no contact details.
    #[must_use]
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
