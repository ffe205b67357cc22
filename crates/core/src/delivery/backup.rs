//! Local backup of submitted reports.

use async_trait::async_trait;

use crate::reports::SubmittedReport;

/// A serialized report ready to be written somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    /// File name, see [`backup_filename`].
    pub filename: String,
    /// Pretty-printed JSON.
    pub contents: String,
}

impl BackupFile {
    /// Serializes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    pub fn for_report(report: &SubmittedReport) -> Result<Self, serde_json::Error> {
        Ok(Self {
            filename: backup_filename(report),
            contents: serde_json::to_string_pretty(report)?,
        })
    }
}

/// `MSB_Report_{quarter}_{year}_{legal name}[_AMENDMENT].json`.
///
/// Each run of whitespace or path separators in the legal name becomes a
/// single underscore, so the backup always lands directly in the store root.
#[must_use]
pub fn backup_filename(report: &SubmittedReport) -> String {
    let details = &report.report_details;
    let name = underscore_separators(&report.company_info.legal_name);
    let suffix = if details.is_amendment {
        "_AMENDMENT"
    } else {
        ""
    };
    format!(
        "MSB_Report_{}_{}_{name}{suffix}.json",
        details.quarter, details.year
    )
}

fn underscore_separators(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars() {
        if c.is_whitespace() || matches!(c, '/' | '\\') {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Saves a backup copy of a submitted report.
///
/// Exporting is best-effort: implementations log their own failures and
/// never report them to the caller.
#[async_trait]
pub trait BackupExporter: Send + Sync {
    /// Exports the report and returns the file name used.
    async fn export(&self, report: &SubmittedReport) -> String;
}
