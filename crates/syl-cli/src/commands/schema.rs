use schemars::schema_for;
use syl_core::{CourseObservation, StaffSeed};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::output::output;

/// Handle `syl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.kind)?, flags.format)
}

pub fn schema(kind: SchemaKind) -> anyhow::Result<serde_json::Value> {
    let schema = match kind {
        SchemaKind::Observation => schema_for!(CourseObservation),
        SchemaKind::StaffSeed => schema_for!(StaffSeed),
    };
    Ok(serde_json::to_value(schema)?)
}
