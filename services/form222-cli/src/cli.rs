//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pharmreturn_utils::ExportFormat;

#[derive(Parser)]
#[command(
    name = "form222",
    version,
    about = "Controlled-substance compliance tools: NDC scan normalization and DEA Form 222 generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level filter (overrides configuration; RUST_LOG still wins).
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Machine-readable JSON output.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse scanned or typed identifiers into NDC, lot and expiration.
    Scan(ScanArgs),

    /// Normalize a raw NDC and check its format.
    Ndc(NdcArgs),

    /// Generate Form 222s from a registrant and controlled line items.
    Generate(GenerateArgs),

    /// Validate previously generated forms.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct ScanArgs {
    /// Raw scanner output, one value per argument.
    #[arg(value_name = "RAW", required = true)]
    pub raw: Vec<String>,
}

#[derive(Parser)]
pub struct NdcArgs {
    #[arg(value_name = "NDC")]
    pub ndc: String,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// JSON document `{ "registrant": {..}, "items": [..] }`. The registrant
    /// falls back to the configured one.
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Export format (defaults to the configured format). With `--json` and
    /// no `--out`, stdout carries `{ "forms": [..], "validation": [..] }`.
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Write one file per form into this directory instead of stdout.
    #[arg(long = "out", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// JSON array of forms.
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,
}
