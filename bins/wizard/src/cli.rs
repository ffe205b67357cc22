//! Command-line arguments.

use clap::Parser;

/// Endpoint used when neither `--endpoint` nor `--smtp` is given.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/submit-report";

#[derive(Debug, Parser)]
#[command(
    name = "msb-wizard",
    version,
    about = "File an MSB quarterly report with ComplyCheck."
)]
pub struct Cli {
    /// Submission endpoint of the report server
    #[arg(long, default_value = DEFAULT_ENDPOINT, conflicts_with = "smtp")]
    pub endpoint: String,

    /// Email the reviewers directly through the configured SMTP relay
    #[arg(long)]
    pub smtp: bool,

    /// Directory for backup files, overriding the configured backup store
    #[arg(long = "backup-dir")]
    pub backup_dir: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
