//! CLI command definitions

use atoss_domain::ReportFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the end-of-run report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportArg {
    /// Human-readable summary
    Text,
    /// JSON object on stdout
    Json,
}

impl From<ReportArg> for ReportFormat {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Text => ReportFormat::Text,
            ReportArg::Json => ReportFormat::Json,
        }
    }
}

/// CLI arguments for atoss-distill
#[derive(Parser, Debug)]
#[command(name = "atoss-distill")]
#[command(author, version, about = "Distill aspect-term-oriented sentence splits from an LLM")]
#[command(long_about = r#"
atoss-distill builds a sentence-splitting dataset from a large language model.

For every record in the requested slice:
1. Generate: the model proposes several candidate splits of the sentence
2. Raw log: every candidate is appended to the raw output file
3. Filter: the model selects the best K candidates
4. Final log: the selections are appended to the final output file

Each output line is `<sentence>####<split>`. At most --cap records are
processed per run; the cap wins over a larger --start/--end slice.

The API key is read from the variable named by inference.api_key_env
(TOGETHER_API_KEY by default); a .env file in the working directory is loaded.

Configuration files are loaded from (in priority order):
1. ATOSS_* environment variables (e.g. ATOSS_SPLIT__CANDIDATES=5)
2. --config <path>     Explicit config file
3. ./atoss.toml        Project-level config
4. ~/.config/atoss-distill/config.toml   Global config

Example:
  atoss-distill --input train.jsonl --start 0 --end 200
  atoss-distill --input train.jsonl --start 200 --end 400 --concurrency 5 -v
"#)]
pub struct Cli {
    /// Input dataset (JSON Lines or JSON array)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// First record index (inclusive)
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Last record index (exclusive); defaults to the end of the dataset
    #[arg(long)]
    pub end: Option<usize>,

    /// File receiving every generated candidate (appended)
    #[arg(long, value_name = "PATH")]
    pub raw_output: Option<PathBuf>,

    /// File receiving the selected candidates (appended)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Model identifier
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum records processed in this run
    #[arg(long, value_name = "N")]
    pub cap: Option<usize>,

    /// Candidates generated per record
    #[arg(long, value_name = "N")]
    pub candidates: Option<usize>,

    /// Candidates kept per record (K)
    #[arg(long, value_name = "K")]
    pub select: Option<usize>,

    /// Generation calls in flight at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub report: ReportArg,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
