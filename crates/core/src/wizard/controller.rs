//! Step navigation, completion gates, and submission.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::clock::Clock;
use super::error::WizardError;
use super::types::{
    AdvanceOutcome, FieldUpdate, STEPS, Step, SubmissionReceipt, SubmissionState,
};
use crate::delivery::{BackupExporter, Notification, NotificationSink};
use crate::fiscal::{QuarterStatus, available_years, is_year_available, quarter_status};
use crate::reports::{MonthlyActivity, ReportDraft, ServiceType};

/// Drives one operator through a single filing.
///
/// Owns the draft and the position in [`STEPS`]. Every mutation goes
/// through this type so the step gates and the submission lock hold.
pub struct WizardController {
    clock: Arc<dyn Clock>,
    position: usize,
    draft: ReportDraft,
    submission_state: SubmissionState,
    last_receipt: Option<SubmissionReceipt>,
}

impl WizardController {
    /// Starts an empty filing on the welcome step.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            position: 0,
            draft: ReportDraft::default(),
            submission_state: SubmissionState::Idle,
            last_receipt: None,
        }
    }

    /// The step being shown.
    #[must_use]
    pub fn current_step(&self) -> Step {
        STEPS[self.position].step
    }

    /// 1-based position of the current step.
    #[must_use]
    pub const fn step_number(&self) -> usize {
        self.position + 1
    }

    /// Number of steps, skipped ones included.
    #[must_use]
    pub const fn total_steps(&self) -> usize {
        STEPS.len()
    }

    /// "Step X of N".
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.step_number(), self.total_steps())
    }

    /// The filing so far.
    #[must_use]
    pub const fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    /// Where the submission stands.
    #[must_use]
    pub const fn submission_state(&self) -> SubmissionState {
        self.submission_state
    }

    /// Outcome of the most recent submission.
    #[must_use]
    pub const fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    /// Status of the selected quarter, once quarter and year are set.
    #[must_use]
    pub fn quarter_status(&self) -> Option<QuarterStatus> {
        let quarter = self.draft.quarter?;
        let year = self.draft.year?;
        Some(quarter_status(quarter, year, self.clock.today()))
    }

    /// Years the operator may choose, most recent first.
    #[must_use]
    pub fn available_years(&self) -> Vec<i32> {
        available_years(self.clock.today())
    }

    /// Whether `step` is complete enough to move past.
    ///
    /// Review only ever moves forward through [`Self::submit`].
    #[must_use]
    pub fn can_advance(&self, step: Step) -> bool {
        let draft = &self.draft;
        match step {
            Step::CompanyInfo => !draft.legal_name.trim().is_empty(),
            Step::ContactPerson => !draft.contact_person.trim().is_empty(),
            Step::ReportingPeriod => match (draft.quarter, draft.year) {
                (Some(quarter), Some(year)) => {
                    let today = self.clock.today();
                    is_year_available(year, today)
                        && quarter_status(quarter, year, today).is_fileable()
                }
                _ => false,
            },
            Step::ServiceSelection => draft.services().next().is_some(),
            Step::Review | Step::Result => false,
            Step::Welcome | Step::CheckCashing(_) | Step::DeferredPresentment(_) => true,
        }
    }

    /// Moves to the next step that applies to the draft.
    ///
    /// # Errors
    ///
    /// Returns an error while a submission is in flight or after success.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, WizardError> {
        self.ensure_unlocked()?;

        let step = self.current_step();
        if step == Step::Result {
            return Ok(AdvanceOutcome::AtEnd);
        }
        if !self.can_advance(step) {
            debug!(step = %step, "Advance blocked");
            return Ok(AdvanceOutcome::Blocked);
        }

        match self.next_applicable(self.position) {
            Some(next) => {
                self.position = next;
                let step = self.current_step();
                debug!(step = %step, number = self.step_number(), "Advanced");
                Ok(AdvanceOutcome::Moved(step))
            }
            None => Ok(AdvanceOutcome::AtEnd),
        }
    }

    /// Moves to the previous step that applies to the draft.
    ///
    /// Leaving the result screen after a failure is the same as [`Self::retry`].
    ///
    /// # Errors
    ///
    /// Returns an error while a submission is in flight or after success.
    pub fn retreat(&mut self) -> Result<Option<Step>, WizardError> {
        self.ensure_unlocked()?;

        if self.submission_state == SubmissionState::Error {
            self.retry()?;
            return Ok(Some(self.current_step()));
        }

        let previous = (0..self.position)
            .rev()
            .find(|&i| (STEPS[i].applies)(&self.draft));
        Ok(previous.map(|i| {
            self.position = i;
            self.current_step()
        }))
    }

    /// Jumps back to an earlier applicable step, keeping all entered data.
    ///
    /// # Errors
    ///
    /// Returns `StepNotReachable` unless `step` applies to the draft and
    /// comes before the current step.
    pub fn jump_to(&mut self, step: Step) -> Result<(), WizardError> {
        self.ensure_unlocked()?;

        let target = STEPS[..self.position]
            .iter()
            .position(|d| d.step == step && (d.applies)(&self.draft))
            .ok_or(WizardError::StepNotReachable(step))?;

        if self.submission_state == SubmissionState::Error {
            self.submission_state = SubmissionState::Idle;
        }
        self.position = target;
        debug!(step = %step, "Jumped back");
        Ok(())
    }

    /// Applies one change to the draft.
    ///
    /// # Errors
    ///
    /// Returns an error while locked, for a year outside the filing window,
    /// or for monthly data of an unselected service.
    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), WizardError> {
        self.ensure_unlocked()?;

        let draft = &mut self.draft;
        match update {
            FieldUpdate::LegalName(value) => draft.legal_name = value,
            FieldUpdate::Dba(value) => draft.dba = value,
            FieldUpdate::ContactPerson(value) => draft.contact_person = value,
            FieldUpdate::Quarter(quarter) => draft.quarter = Some(quarter),
            FieldUpdate::Year(year) => {
                let today = self.clock.today();
                if !is_year_available(year, today) {
                    let years = available_years(today);
                    return Err(WizardError::YearOutOfRange {
                        year,
                        earliest: years.last().copied().unwrap_or(year),
                        latest: years.first().copied().unwrap_or(year),
                    });
                }
                draft.year = Some(year);
            }
            FieldUpdate::Amendment(flag) => draft.is_amendment = flag,
            FieldUpdate::Service { service, selected } => draft.set_service(service, selected),
            FieldUpdate::CheckCashing {
                month,
                metric,
                value,
            } => {
                let months = draft
                    .check_cashing_mut()
                    .ok_or(WizardError::ServiceNotSelected(ServiceType::CheckCashing))?;
                *months.get_mut(month).raw_mut(metric) = value;
            }
            FieldUpdate::DeferredPresentment {
                month,
                metric,
                value,
            } => {
                let months = draft.deferred_presentment_mut().ok_or(
                    WizardError::ServiceNotSelected(ServiceType::DeferredPresentment),
                )?;
                *months.get_mut(month).raw_mut(metric) = value;
            }
        }
        Ok(())
    }

    /// Sends the report to the reviewers and saves the backup.
    ///
    /// The backup is exported whether or not delivery succeeds. Either way
    /// the wizard ends on the result step.
    ///
    /// # Errors
    ///
    /// Returns an error when called away from review, while locked, or with
    /// no quarter or year. Delivery failure is not an error here; it is
    /// reported in the receipt.
    pub async fn submit(
        &mut self,
        sink: &dyn NotificationSink,
        exporter: &dyn BackupExporter,
    ) -> Result<SubmissionReceipt, WizardError> {
        self.ensure_unlocked()?;
        if self.current_step() != Step::Review {
            return Err(WizardError::NotReadyToSubmit);
        }

        let report = self
            .draft
            .snapshot(self.clock.now())
            .ok_or(WizardError::IncompleteDraft)?;

        self.submission_state = SubmissionState::Loading;
        let notification = Notification::for_report(&report);
        info!(subject = %notification.subject, "Submitting report");

        let delivery = sink.deliver(&notification).await;
        let backup_filename = exporter.export(&report).await;

        let (state, failure) = match delivery {
            Ok(()) => {
                info!(subject = %notification.subject, backup = %backup_filename, "Report submitted");
                (SubmissionState::Success, None)
            }
            Err(e) => {
                warn!(
                    subject = %notification.subject,
                    backup = %backup_filename,
                    error = %e,
                    "Report delivery failed"
                );
                (SubmissionState::Error, Some(e.to_string()))
            }
        };

        let receipt = SubmissionReceipt {
            state,
            report,
            backup_filename,
            failure,
        };
        self.submission_state = state;
        self.position = Self::index_of(Step::Result);
        self.last_receipt = Some(receipt.clone());
        Ok(receipt)
    }

    /// Returns to review after a failed submission, keeping the draft.
    ///
    /// # Errors
    ///
    /// Returns `NoFailedSubmission` unless the last submission failed.
    pub fn retry(&mut self) -> Result<(), WizardError> {
        if self.submission_state != SubmissionState::Error {
            return Err(WizardError::NoFailedSubmission);
        }
        self.submission_state = SubmissionState::Idle;
        self.position = Self::index_of(Step::Review);
        Ok(())
    }

    /// Discards everything and starts a new report.
    pub fn reset(&mut self) {
        self.draft = ReportDraft::default();
        self.position = 0;
        self.submission_state = SubmissionState::Idle;
        self.last_receipt = None;
    }

    const fn ensure_unlocked(&self) -> Result<(), WizardError> {
        match self.submission_state {
            SubmissionState::Loading => Err(WizardError::SubmissionInProgress),
            SubmissionState::Success => Err(WizardError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Error => Ok(()),
        }
    }

    fn next_applicable(&self, from: usize) -> Option<usize> {
        (from + 1..STEPS.len()).find(|&i| (STEPS[i].applies)(&self.draft))
    }

    fn index_of(step: Step) -> usize {
        STEPS
            .iter()
            .position(|d| d.step == step)
            .unwrap_or(STEPS.len() - 1)
    }
}
