//! Notification sink contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::reports::{ReportService, SubmittedReport};

/// Reviewers who receive every filing.
pub const REVIEWER_ADDRESSES: [&str; 2] = ["phil@complycheck.co", "luis@complycheck.co"];

/// Delivery failures.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The sink did not acknowledge the notification.
    #[error("Failed to deliver report: {0}")]
    SinkDeliveryFailed(String),
}

/// A message for the reviewers.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Recipient addresses.
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// The report the body was rendered from.
    pub report: SubmittedReport,
}

impl Notification {
    /// Builds the reviewer notification for a report.
    #[must_use]
    pub fn for_report(report: &SubmittedReport) -> Self {
        Self {
            recipients: REVIEWER_ADDRESSES.iter().map(ToString::to_string).collect(),
            subject: notification_subject(report),
            body: ReportService::render_summary(report),
            report: report.clone(),
        }
    }
}

/// `MSB Quarterly Report - {legal name} - {quarter} {year}`, flagged for amendments.
#[must_use]
pub fn notification_subject(report: &SubmittedReport) -> String {
    let details = &report.report_details;
    let mut subject = format!(
        "MSB Quarterly Report - {} - {} {}",
        report.company_info.legal_name, details.quarter, details.year
    );
    if details.is_amendment {
        subject.push_str(" (AMENDMENT)");
    }
    subject
}

/// What the operator should do when delivery failed.
#[must_use]
pub fn manual_fallback_instructions(backup_filename: &str) -> String {
    format!(
        "Your report could not be sent automatically. A backup file ({backup_filename}) has \
         been saved. Please email it to {} and {} with \"MSB Quarterly Report\" in the \
         subject line.",
        REVIEWER_ADDRESSES[0], REVIEWER_ADDRESSES[1]
    )
}

/// Something that can deliver a notification to the reviewers.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers the notification.
    ///
    /// # Errors
    ///
    /// Returns `SinkDeliveryFailed` when delivery is not acknowledged.
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}
