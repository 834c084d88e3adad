use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Department site a course observation was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceSystem {
    /// Computer science department's generated description pages.
    Cics,
    /// Mathematics department's content-managed site.
    Math,
}

impl SourceSystem {
    pub const ALL: [Self; 2] = [Self::Cics, Self::Math];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cics => "CICS",
            Self::Math => "MATH",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceSystem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown source system {s:?}")))
    }
}
