//! Backup store for submitted reports using Apache OpenDAL.
//!
//! Backends:
//! - Local filesystem (the default, a directory next to the operator)
//! - S3-compatible buckets: Cloudflare R2, AWS S3, DigitalOcean Spaces
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Apache OpenDAL                 │
//! ├──────────────────────────────────────────────┤
//! │ op.write("MSB_Report_Q1_2024_....json", ..)  │
//! │ op.read("MSB_Report_Q1_2024_....json")       │
//! └──────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::BackupStore;
