//! Shared types, errors, and configuration for MSB quarterly filing.
//!
//! This crate provides common types used across all other crates:
//! - Dollar amounts with decimal precision and lenient input parsing
//! - Application-wide error types
//! - Configuration management
//! - SMTP email delivery

pub mod config;
pub mod email;
pub mod error;
pub mod types;

pub use config::{AppConfig, BackupConfig, EmailConfig, ServerConfig};
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
