//! Staff directory configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Hand-maintained aliases: directory name -> extra names the same
    /// person appears under on course listings.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl DirectoryConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (name, extra) in &self.aliases {
            if extra.iter().any(|alias| alias.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    "directory.aliases",
                    format!("blank alias listed for {name:?}"),
                ));
            }
        }
        Ok(())
    }
}
