//! Wizard error types.

use thiserror::Error;

use super::types::Step;
use crate::reports::ServiceType;

/// Ways the wizard can be misused.
///
/// An incomplete step is not an error; see `AdvanceOutcome::Blocked`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// The draft is locked while a submission is in flight.
    #[error("A submission is in progress")]
    SubmissionInProgress,

    /// The report was delivered; start a new one to continue.
    #[error("Report already submitted")]
    AlreadySubmitted,

    /// Data was entered for a service that is not selected.
    #[error("Service not selected: {0}")]
    ServiceNotSelected(ServiceType),

    /// The year is outside the filing window.
    #[error("Year {year} is outside the filing window {earliest}-{latest}")]
    YearOutOfRange {
        /// Requested year.
        year: i32,
        /// Oldest selectable year.
        earliest: i32,
        /// Current year.
        latest: i32,
    },

    /// The step is not an earlier visited step of this draft.
    #[error("Step not reachable: {0}")]
    StepNotReachable(Step),

    /// Quarter or year missing at submission time.
    #[error("Report is missing its quarter or year")]
    IncompleteDraft,

    /// Submit was called away from the review step.
    #[error("Reports can only be submitted from the review step")]
    NotReadyToSubmit,

    /// Retry was called without a failed submission.
    #[error("No failed submission to retry")]
    NoFailedSubmission,
}
