use clap::Parser;
use std::path::PathBuf;

/// One-shot directory integrity audit against a SQLite baseline.
#[derive(Clone, Debug, Parser)]
#[command(name = "hashwarden")]
#[command(
    about = "Hash every file in DIR, compare against the baseline, and report new files and mismatches."
)]
pub struct Cli {
    /// Path to the baseline database. Created on first run.
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// Directory to audit (immediate children only).
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Send the verdict and full log to this address when the run finishes.
    #[arg(value_name = "RECIPIENT")]
    pub recipient: Option<String>,

    /// Number of hashing workers. Default: 8, or `workers` from the config file.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Config file. Default: `.hashwarden.toml` in DIR.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
