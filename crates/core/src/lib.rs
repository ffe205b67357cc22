//! Core business logic for MSB quarterly filings.
//!
//! This crate contains the wizard, the report model and its rendering, and
//! the delivery contracts. It has no web dependencies; the HTTP surface
//! lives in `msb-api`.
//!
//! # Modules
//!
//! - `fiscal` - Quarters, filing deadlines, and the year window
//! - `reports` - Draft and submitted report, aggregation, plain-text summary
//! - `wizard` - Step navigation, completion gates, and submission
//! - `delivery` - Notification sink and backup export contracts
//! - `storage` - OpenDAL-backed backup store

pub mod delivery;
pub mod fiscal;
pub mod reports;
pub mod storage;
pub mod wizard;
