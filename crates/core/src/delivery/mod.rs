//! Outbound effects of a submission.
//!
//! A submitted report leaves the wizard two ways:
//! - a notification to the reviewers (email, or an HTTP endpoint that emails)
//! - a JSON backup file the operator keeps regardless of delivery
//!
//! Both are traits so the controller can be driven with test doubles.

pub mod backup;
pub mod email;
pub mod sink;


pub use backup::{BackupExporter, BackupFile, backup_filename};
pub use sink::{
    DeliveryError, Notification, NotificationSink, REVIEWER_ADDRESSES,
    manual_fallback_instructions, notification_subject,
};
