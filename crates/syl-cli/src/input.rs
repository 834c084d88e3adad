//! JSONL input readers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read every record of every file, in argument order then line order.
pub fn read_all<T: DeserializeOwned>(paths: &[PathBuf]) -> anyhow::Result<Vec<T>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(read_file::<T>(path)?);
    }
    Ok(records)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let lines = serde_jsonlines::json_lines::<T, _>(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let records = lines
        .enumerate()
        .map(|(index, record)| {
            record.with_context(|| format!("{}:{}: invalid record", path.display(), index + 1))
        })
        .collect::<anyhow::Result<Vec<T>>>()?;

    tracing::debug!(path = %path.display(), records = records.len(), "read input file");
    Ok(records)
}
