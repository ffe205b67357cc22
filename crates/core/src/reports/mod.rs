//! MSB quarterly report model, aggregation and rendering.
//!
//! This module provides pure business logic for:
//! - The in-progress draft and the immutable submitted snapshot
//! - Per-service monthly activity and its metrics
//! - Quarterly totals
//! - The plain-text summary handed to reviewers

pub mod service;
pub mod types;


pub use service::{REPORT_FOOTER, ReportService};
pub use types::*;
