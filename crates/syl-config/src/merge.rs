//! Course merge configuration.

use serde::{Deserialize, Serialize};
use syl_core::SourceSystem;

use crate::ConfigError;

const fn default_sort_observations() -> bool {
    true
}

fn default_source_order() -> Vec<SourceSystem> {
    SourceSystem::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergeConfig {
    /// Sort observations oldest semester first before merging.
    #[serde(default = "default_sort_observations")]
    pub sort_observations: bool,

    /// Interleaving order of sources within one semester.
    #[serde(default = "default_source_order")]
    pub source_order: Vec<SourceSystem>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            sort_observations: default_sort_observations(),
            source_order: default_source_order(),
        }
    }
}

impl MergeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for source in SourceSystem::ALL {
            let count = self.source_order.iter().filter(|s| **s == source).count();
            if count != 1 {
                return Err(ConfigError::invalid(
                    "merge.source_order",
                    format!("{source} must appear exactly once, found {count}"),
                ));
            }
        }
        Ok(())
    }
}
