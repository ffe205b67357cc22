//! Wizard step, update, and outcome types.

use std::fmt;

use serde::Serialize;

use crate::delivery::manual_fallback_instructions;
use crate::fiscal::{Quarter, QuarterMonth};
use crate::reports::{
    CheckCashingMetric, DeferredPresentmentMetric, ReportDraft, ServiceType, SubmittedReport,
};

/// A screen of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Introduction.
    Welcome,
    /// Legal name and DBA.
    CompanyInfo,
    /// Contact person.
    ContactPerson,
    /// Quarter, year and amendment flag.
    ReportingPeriod,
    /// Which services the business offers.
    ServiceSelection,
    /// Check cashing figures for one month.
    CheckCashing(QuarterMonth),
    /// Deferred presentment figures for one month.
    DeferredPresentment(QuarterMonth),
    /// Summary and submit.
    Review,
    /// Submission outcome.
    Result,
}

impl Step {
    /// Screen title.
    #[must_use]
    pub fn title(self) -> String {
        match self {
            Self::Welcome => "Welcome".to_string(),
            Self::CompanyInfo => "Company Information".to_string(),
            Self::ContactPerson => "Contact Person".to_string(),
            Self::ReportingPeriod => "Reporting Period".to_string(),
            Self::ServiceSelection => "Services Offered".to_string(),
            Self::CheckCashing(month) => format!(
                "{} - Month {}",
                ServiceType::CheckCashing.heading(),
                month.number()
            ),
            Self::DeferredPresentment(month) => format!(
                "{} - Month {}",
                ServiceType::DeferredPresentment.heading(),
                month.number()
            ),
            Self::Review => "Review & Submit".to_string(),
            Self::Result => "Submission Result".to_string(),
        }
    }

    /// The service a data-entry step collects, if any.
    #[must_use]
    pub const fn service(self) -> Option<ServiceType> {
        match self {
            Self::CheckCashing(_) => Some(ServiceType::CheckCashing),
            Self::DeferredPresentment(_) => Some(ServiceType::DeferredPresentment),
            _ => None,
        }
    }

    /// Title with the calendar month filled in once the quarter is known.
    #[must_use]
    pub fn title_for(self, quarter: Option<Quarter>) -> String {
        match (self, quarter) {
            (Self::CheckCashing(month) | Self::DeferredPresentment(month), Some(q)) => {
                let heading = self.service().map_or("", ServiceType::heading);
                format!("{heading} - {}", q.month_name(month))
            }
            _ => self.title(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// A step plus the rule deciding whether it applies to a draft.
#[derive(Clone, Copy)]
pub struct StepDescriptor {
    /// The step.
    pub step: Step,
    /// Whether the step is visited for the draft.
    pub applies: fn(&ReportDraft) -> bool,
}

fn always(_: &ReportDraft) -> bool {
    true
}

fn offers_check_cashing(draft: &ReportDraft) -> bool {
    draft.has_service(ServiceType::CheckCashing)
}

fn offers_deferred_presentment(draft: &ReportDraft) -> bool {
    draft.has_service(ServiceType::DeferredPresentment)
}

/// Every step in order.
pub const STEPS: [StepDescriptor; 13] = [
    StepDescriptor { step: Step::Welcome, applies: always },
    StepDescriptor { step: Step::CompanyInfo, applies: always },
    StepDescriptor { step: Step::ContactPerson, applies: always },
    StepDescriptor { step: Step::ReportingPeriod, applies: always },
    StepDescriptor { step: Step::ServiceSelection, applies: always },
    StepDescriptor {
        step: Step::CheckCashing(QuarterMonth::First),
        applies: offers_check_cashing,
    },
    StepDescriptor {
        step: Step::CheckCashing(QuarterMonth::Second),
        applies: offers_check_cashing,
    },
    StepDescriptor {
        step: Step::CheckCashing(QuarterMonth::Third),
        applies: offers_check_cashing,
    },
    StepDescriptor {
        step: Step::DeferredPresentment(QuarterMonth::First),
        applies: offers_deferred_presentment,
    },
    StepDescriptor {
        step: Step::DeferredPresentment(QuarterMonth::Second),
        applies: offers_deferred_presentment,
    },
    StepDescriptor {
        step: Step::DeferredPresentment(QuarterMonth::Third),
        applies: offers_deferred_presentment,
    },
    StepDescriptor { step: Step::Review, applies: always },
    StepDescriptor { step: Step::Result, applies: always },
];

/// Where a submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    /// Nothing sent yet.
    #[default]
    Idle,
    /// Waiting on the notification sink.
    Loading,
    /// The sink acknowledged the report.
    Success,
    /// The sink failed; the backup is the fallback.
    Error,
}

/// One typed change to the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Legal company name.
    LegalName(String),
    /// DBA name.
    Dba(String),
    /// Contact person.
    ContactPerson(String),
    /// Reported quarter.
    Quarter(Quarter),
    /// Reported year; must be inside the filing window.
    Year(i32),
    /// Amendment flag.
    Amendment(bool),
    /// Select or deselect a service.
    Service {
        /// The service.
        service: ServiceType,
        /// Whether it is offered.
        selected: bool,
    },
    /// One check cashing value.
    CheckCashing {
        /// Month within the quarter.
        month: QuarterMonth,
        /// Field.
        metric: CheckCashingMetric,
        /// Raw text as entered.
        value: String,
    },
    /// One deferred presentment value.
    DeferredPresentment {
        /// Month within the quarter.
        month: QuarterMonth,
        /// Field.
        metric: DeferredPresentmentMetric,
        /// Raw text as entered.
        value: String,
    },
}

/// Result of asking the wizard to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to this step.
    Moved(Step),
    /// The current step is incomplete.
    Blocked,
    /// Already on the last step.
    AtEnd,
}

/// What happened when a report was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// `Success` or `Error`.
    pub state: SubmissionState,
    /// The report as sent.
    pub report: SubmittedReport,
    /// Name of the backup file.
    pub backup_filename: String,
    /// Why delivery failed, if it did.
    pub failure: Option<String>,
}

impl SubmissionReceipt {
    /// Returns true if the reviewers received the report.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == SubmissionState::Success
    }

    /// Manual steps for the operator after a failed delivery.
    #[must_use]
    pub fn fallback_instructions(&self) -> Option<String> {
        self.failure
            .as_ref()
            .map(|_| manual_fallback_instructions(&self.backup_filename))
    }
}
