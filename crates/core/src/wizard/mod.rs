//! Guided filing wizard.
//!
//! # Modules
//!
//! - `types` - Steps, field updates, and submission outcomes
//! - `error` - Wizard misuse errors
//! - `clock` - Time source for quarter status and timestamps
//! - `controller` - Navigation, gates, and the submit path

pub mod clock;
pub mod controller;
pub mod error;
pub mod types;


pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::WizardController;
pub use error::WizardError;
pub use types::{
    AdvanceOutcome, FieldUpdate, STEPS, Step, StepDescriptor, SubmissionReceipt,
    SubmissionState,
};
