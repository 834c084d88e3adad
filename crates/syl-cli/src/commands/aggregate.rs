use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use syl_config::SyllabusConfig;
use syl_core::CourseObservation;
use syl_engine::{AggregationOutput, AggregationReport, Aggregator};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AggregateArgs;
use crate::input;
use crate::output::output;

pub const COURSES_FILE: &str = "courses.jsonl";
pub const STAFF_FILE: &str = "staff.jsonl";
pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub out_dir: PathBuf,
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub courses: usize,
    pub staff: usize,
    pub needs_review: bool,
    pub report: AggregationReport,
}

/// Contents of `report.json`.
#[derive(Serialize)]
struct ReportFile<'a> {
    version: u32,
    generated_at: DateTime<Utc>,
    report: &'a AggregationReport,
}

/// Handle `syl aggregate`.
pub fn handle(
    args: &AggregateArgs,
    config: &SyllabusConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = run(args, config)?;
    output(&response, flags.format)
}

pub fn run(args: &AggregateArgs, config: &SyllabusConfig) -> anyhow::Result<AggregateResponse> {
    let observations: Vec<CourseObservation> = input::read_all(&args.observations)?;
    let directory = bootstrap::build_directory(&args.directory, config)?;

    let aggregator = Aggregator::new(bootstrap::pass_options(config))
        .with_span(tracing::info_span!("aggregate"));
    let result = aggregator.run(observations, directory);

    let out_dir = args.out.clone().unwrap_or_else(|| config.output.dir.clone());
    write_outputs(&out_dir, &result)?;

    Ok(AggregateResponse {
        out_dir,
        version: result.version,
        generated_at: result.generated_at,
        courses: result.courses.len(),
        staff: result.staff.len(),
        needs_review: result.report.needs_review(),
        report: result.report,
    })
}

/// Write the run's records as JSONL and the envelope plus report as JSON.
fn write_outputs(out_dir: &Path, result: &AggregationOutput) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let courses_path = out_dir.join(COURSES_FILE);
    serde_jsonlines::write_json_lines(&courses_path, &result.courses)
        .with_context(|| format!("failed to write {}", courses_path.display()))?;

    let staff_path = out_dir.join(STAFF_FILE);
    serde_jsonlines::write_json_lines(&staff_path, &result.staff)
        .with_context(|| format!("failed to write {}", staff_path.display()))?;

    let report_path = out_dir.join(REPORT_FILE);
    let report = ReportFile {
        version: result.version,
        generated_at: result.generated_at,
        report: &result.report,
    };
    fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("failed to write {}", report_path.display()))?;

    tracing::info!(out_dir = %out_dir.display(), "wrote aggregation output");
    Ok(())
}
