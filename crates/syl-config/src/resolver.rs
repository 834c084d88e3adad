//! Staff resolution configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_threshold() -> f64 {
    1.0
}

fn default_placeholders() -> Vec<String> {
    ["Staff", "TBA", "TBD"].map(String::from).to_vec()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Fuzzy score at or above which a candidate is accepted outright.
    #[serde(default = "default_threshold")]
    pub strong_match_threshold: f64,

    /// Instructor strings that stand for "nobody yet" and are never resolved.
    #[serde(default = "default_placeholders")]
    pub placeholder_names: Vec<String>,

    /// Resolve names from every semester instead of only the most recent one.
    #[serde(default)]
    pub resolve_all_semesters: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strong_match_threshold: default_threshold(),
            placeholder_names: default_placeholders(),
            resolve_all_semesters: false,
        }
    }
}

impl ResolverConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.strong_match_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::invalid(
                "resolver.strong_match_threshold",
                format!("must be a positive number, got {threshold}"),
            ));
        }
        if self.placeholder_names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "resolver.placeholder_names",
                "entries must not be blank",
            ));
        }
        Ok(())
    }
}
