use std::path::PathBuf;

use anyhow::Context;
use syl_config::SyllabusConfig;
use syl_core::StaffSeed;
use syl_engine::{PassOptions, StaffDirectory};

use crate::input;

pub fn load_config() -> anyhow::Result<SyllabusConfig> {
    SyllabusConfig::load_with_dotenv().context("failed to load syllabus configuration")
}

pub fn pass_options(config: &SyllabusConfig) -> PassOptions {
    PassOptions {
        sort_observations: config.merge.sort_observations,
        source_order: config.merge.source_order.clone(),
        strong_match_threshold: config.resolver.strong_match_threshold,
        placeholder_names: config.resolver.placeholder_names.clone(),
        resolve_all_semesters: config.resolver.resolve_all_semesters,
    }
}

/// Read the staff directory files and build the index, applying the
/// configured alias table.
pub fn build_directory(
    paths: &[PathBuf],
    config: &SyllabusConfig,
) -> anyhow::Result<StaffDirectory> {
    let seeds: Vec<StaffSeed> = input::read_all(paths)?;
    let directory = StaffDirectory::build_with_aliases(seeds, &config.directory.aliases)
        .context("staff directory is inconsistent")?;
    tracing::info!(staff = directory.len(), "built staff directory");
    Ok(directory)
}
