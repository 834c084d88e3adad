use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level commands for the `syl` binary.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Merge course observations and resolve instructors against the staff directory.
    Aggregate(AggregateArgs),
    /// Show how one instructor name would resolve.
    Resolve(ResolveArgs),
    /// Dump the JSON schema of an input record.
    Schema(SchemaArgs),
}

/// Arguments for `syl aggregate`.
#[derive(Clone, Debug, Args)]
pub struct AggregateArgs {
    /// JSONL files of course observations, one record per line.
    #[arg(long = "observations", required = true, num_args = 1..)]
    pub observations: Vec<PathBuf>,

    /// JSONL files of staff directory entries.
    #[arg(long = "directory", required = true, num_args = 1..)]
    pub directory: Vec<PathBuf>,

    /// Output directory (defaults to `output.dir` from config).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `syl resolve`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    /// Raw instructor name as it appears on a course listing.
    pub name: String,

    /// JSONL files of staff directory entries.
    #[arg(long = "directory", required = true, num_args = 1..)]
    pub directory: Vec<PathBuf>,

    /// Course the name was listed on, e.g. "COMPSCI 220". Runs a full
    /// resolution against a scratch copy of the directory.
    #[arg(long)]
    pub course: Option<String>,
}

/// Input records with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    Observation,
    StaffSeed,
}

/// Arguments for `syl schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub kind: SchemaKind,
}
