//! Common types used across the application.

pub mod lenient;
pub mod money;

pub use money::Money;
