//! Report data types.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use msb_shared::types::Money;
use msb_shared::types::lenient::format_count;
use serde::{Deserialize, Deserializer, Serialize};

use crate::fiscal::{Quarter, QuarterMonth};

/// Informational status stamped on every submitted report.
pub const SUBMITTED_STATUS: &str = "Submitted - Awaiting ComplyCheck Processing";

/// A reportable MSB activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    /// Cashing checks and other instruments for a fee.
    CheckCashing,
    /// Payday-loan style deferred deposit transactions.
    DeferredPresentment,
}

impl ServiceType {
    /// Both services in canonical order.
    pub const ALL: [Self; 2] = [Self::CheckCashing, Self::DeferredPresentment];

    /// Name shown to operators and reviewers.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CheckCashing => "Check Cashing",
            Self::DeferredPresentment => "Deferred Presentment (Payday Loans)",
        }
    }

    /// Short section heading.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::CheckCashing => "Check Cashing",
            Self::DeferredPresentment => "Deferred Presentment",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a metric is summed and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Whole number of items.
    Count,
    /// Dollar amount.
    Money,
}

/// A tracked column of monthly activity.
pub trait Metric: Copy + Ord + fmt::Debug + 'static {
    /// How the metric aggregates.
    fn kind(self) -> MetricKind;
    /// Label in the review table.
    fn label(self) -> &'static str;
    /// Label used when collecting the value.
    fn prompt(self) -> &'static str;
    /// JSON field name.
    fn key(self) -> &'static str;
}

/// One month of activity for a service, stored as entered.
pub trait MonthlyActivity: Clone + Default {
    /// The metrics this activity tracks.
    type Metric: Metric;

    /// Every metric, in display order.
    const METRICS: &'static [Self::Metric];

    /// Raw text for a metric.
    fn raw(&self, metric: Self::Metric) -> &str;

    /// Mutable raw text for a metric.
    fn raw_mut(&mut self, metric: Self::Metric) -> &mut String;

    /// True when nothing was entered for the month.
    fn is_blank(&self) -> bool {
        Self::METRICS
            .iter()
            .all(|metric| self.raw(*metric).trim().is_empty())
    }
}

/// Check cashing metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckCashingMetric {
    /// Number of instruments cashed.
    Instruments,
    /// Face amount of instruments.
    FaceAmount,
    /// Check cashing fees collected.
    Fees,
    /// Verification fees collected.
    VerificationFees,
}

impl Metric for CheckCashingMetric {
    fn kind(self) -> MetricKind {
        match self {
            Self::Instruments => MetricKind::Count,
            Self::FaceAmount | Self::Fees | Self::VerificationFees => MetricKind::Money,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Instruments => "Instruments Cashed",
            Self::FaceAmount => "Face Amount",
            Self::Fees => "Cashing Fees",
            Self::VerificationFees => "Verification Fees",
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Self::Instruments => "Number of Instruments Cashed",
            Self::FaceAmount => "Face Amount of Instruments ($)",
            Self::Fees => "Check Cashing Fees Collected ($)",
            Self::VerificationFees => "Verification Fees Collected ($)",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Instruments => "instruments",
            Self::FaceAmount => "faceAmount",
            Self::Fees => "fees",
            Self::VerificationFees => "verificationFees",
        }
    }
}

/// Deferred presentment metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeferredPresentmentMetric {
    /// Number of transactions.
    Transactions,
    /// Dollar amount of transactions.
    Amount,
    /// Service fees collected.
    ServiceFees,
    /// Verification fees collected.
    VerificationFees,
}

impl Metric for DeferredPresentmentMetric {
    fn kind(self) -> MetricKind {
        match self {
            Self::Transactions => MetricKind::Count,
            Self::Amount | Self::ServiceFees | Self::VerificationFees => MetricKind::Money,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::Amount => "Transaction Amount",
            Self::ServiceFees => "Service Fees",
            Self::VerificationFees => "Verification Fees",
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Self::Transactions => "Number of Transactions",
            Self::Amount => "Dollar Amount of Transactions ($)",
            Self::ServiceFees => "Service Fees Collected ($)",
            Self::VerificationFees => "Verification Fees Collected ($)",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Amount => "amount",
            Self::ServiceFees => "serviceFees",
            Self::VerificationFees => "verificationFees",
        }
    }
}

/// Check cashing activity for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckCashingMonth {
    /// Number of instruments cashed.
    #[serde(deserialize_with = "lenient_text")]
    pub instruments: String,
    /// Face amount of instruments.
    #[serde(deserialize_with = "lenient_text")]
    pub face_amount: String,
    /// Check cashing fees collected.
    #[serde(deserialize_with = "lenient_text")]
    pub fees: String,
    /// Verification fees collected.
    #[serde(deserialize_with = "lenient_text")]
    pub verification_fees: String,
}

impl MonthlyActivity for CheckCashingMonth {
    type Metric = CheckCashingMetric;

    const METRICS: &'static [CheckCashingMetric] = &[
        CheckCashingMetric::Instruments,
        CheckCashingMetric::FaceAmount,
        CheckCashingMetric::Fees,
        CheckCashingMetric::VerificationFees,
    ];

    fn raw(&self, metric: CheckCashingMetric) -> &str {
        match metric {
            CheckCashingMetric::Instruments => &self.instruments,
            CheckCashingMetric::FaceAmount => &self.face_amount,
            CheckCashingMetric::Fees => &self.fees,
            CheckCashingMetric::VerificationFees => &self.verification_fees,
        }
    }

    fn raw_mut(&mut self, metric: CheckCashingMetric) -> &mut String {
        match metric {
            CheckCashingMetric::Instruments => &mut self.instruments,
            CheckCashingMetric::FaceAmount => &mut self.face_amount,
            CheckCashingMetric::Fees => &mut self.fees,
            CheckCashingMetric::VerificationFees => &mut self.verification_fees,
        }
    }
}

/// Deferred presentment activity for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeferredPresentmentMonth {
    /// Number of transactions.
    #[serde(deserialize_with = "lenient_text")]
    pub transactions: String,
    /// Dollar amount of transactions.
    #[serde(deserialize_with = "lenient_text")]
    pub amount: String,
    /// Service fees collected.
    #[serde(deserialize_with = "lenient_text")]
    pub service_fees: String,
    /// Verification fees collected.
    #[serde(deserialize_with = "lenient_text")]
    pub verification_fees: String,
}

impl MonthlyActivity for DeferredPresentmentMonth {
    type Metric = DeferredPresentmentMetric;

    const METRICS: &'static [DeferredPresentmentMetric] = &[
        DeferredPresentmentMetric::Transactions,
        DeferredPresentmentMetric::Amount,
        DeferredPresentmentMetric::ServiceFees,
        DeferredPresentmentMetric::VerificationFees,
    ];

    fn raw(&self, metric: DeferredPresentmentMetric) -> &str {
        match metric {
            DeferredPresentmentMetric::Transactions => &self.transactions,
            DeferredPresentmentMetric::Amount => &self.amount,
            DeferredPresentmentMetric::ServiceFees => &self.service_fees,
            DeferredPresentmentMetric::VerificationFees => &self.verification_fees,
        }
    }

    fn raw_mut(&mut self, metric: DeferredPresentmentMetric) -> &mut String {
        match metric {
            DeferredPresentmentMetric::Transactions => &mut self.transactions,
            DeferredPresentmentMetric::Amount => &mut self.amount,
            DeferredPresentmentMetric::ServiceFees => &mut self.service_fees,
            DeferredPresentmentMetric::VerificationFees => &mut self.verification_fees,
        }
    }
}

/// Accepts a string, a number, or null; anything else becomes empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Exactly three months of data, keyed `month1`..`month3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct QuarterMonths<T> {
    /// First month of the quarter.
    pub month1: T,
    /// Second month of the quarter.
    pub month2: T,
    /// Third month of the quarter.
    pub month3: T,
}

impl<T> QuarterMonths<T> {
    /// Builds from three months in order.
    pub fn new(month1: T, month2: T, month3: T) -> Self {
        Self {
            month1,
            month2,
            month3,
        }
    }

    /// Month by position.
    pub fn get(&self, month: QuarterMonth) -> &T {
        match month {
            QuarterMonth::First => &self.month1,
            QuarterMonth::Second => &self.month2,
            QuarterMonth::Third => &self.month3,
        }
    }

    /// Mutable month by position.
    pub fn get_mut(&mut self, month: QuarterMonth) -> &mut T {
        match month {
            QuarterMonth::First => &mut self.month1,
            QuarterMonth::Second => &mut self.month2,
            QuarterMonth::Third => &mut self.month3,
        }
    }

    /// Iterates months in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.month1, &self.month2, &self.month3].into_iter()
    }
}

/// In-progress filing owned by one wizard session.
///
/// A month block exists if and only if its service is selected; the
/// setters below are the only way to change the selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    /// Legal company name.
    pub legal_name: String,
    /// Doing-business-as name, may be empty.
    pub dba: String,
    /// Contact person for the filing.
    pub contact_person: String,
    /// Quarter being reported.
    pub quarter: Option<Quarter>,
    /// Year being reported.
    pub year: Option<i32>,
    /// Whether this corrects a previous filing.
    pub is_amendment: bool,
    services: BTreeSet<ServiceType>,
    check_cashing: Option<QuarterMonths<CheckCashingMonth>>,
    deferred_presentment: Option<QuarterMonths<DeferredPresentmentMonth>>,
}

impl ReportDraft {
    /// Selected services in canonical order.
    pub fn services(&self) -> impl Iterator<Item = ServiceType> + '_ {
        self.services.iter().copied()
    }

    /// Returns true if the service is selected.
    #[must_use]
    pub fn has_service(&self, service: ServiceType) -> bool {
        self.services.contains(&service)
    }

    /// Selects or deselects a service, creating or dropping its month block.
    pub fn set_service(&mut self, service: ServiceType, selected: bool) {
        if selected {
            self.services.insert(service);
        } else {
            self.services.remove(&service);
        }

        match service {
            ServiceType::CheckCashing => {
                sync_block(&mut self.check_cashing, selected);
            }
            ServiceType::DeferredPresentment => {
                sync_block(&mut self.deferred_presentment, selected);
            }
        }
    }

    /// Check cashing months, if selected.
    #[must_use]
    pub fn check_cashing(&self) -> Option<&QuarterMonths<CheckCashingMonth>> {
        self.check_cashing.as_ref()
    }

    /// Mutable check cashing months, if selected.
    pub fn check_cashing_mut(&mut self) -> Option<&mut QuarterMonths<CheckCashingMonth>> {
        self.check_cashing.as_mut()
    }

    /// Deferred presentment months, if selected.
    #[must_use]
    pub fn deferred_presentment(&self) -> Option<&QuarterMonths<DeferredPresentmentMonth>> {
        self.deferred_presentment.as_ref()
    }

    /// Mutable deferred presentment months, if selected.
    pub fn deferred_presentment_mut(
        &mut self,
    ) -> Option<&mut QuarterMonths<DeferredPresentmentMonth>> {
        self.deferred_presentment.as_mut()
    }

    /// Freezes the draft into a submitted report.
    ///
    /// Returns `None` while quarter or year is unset.
    #[must_use]
    pub fn snapshot(&self, submitted_at: DateTime<Utc>) -> Option<SubmittedReport> {
        let quarter = self.quarter?;
        let year = self.year?;

        Some(SubmittedReport {
            company_info: CompanyInfo {
                legal_name: self.legal_name.clone(),
                dba: self.dba.clone(),
                contact_person: self.contact_person.clone(),
            },
            report_details: ReportDetails {
                quarter,
                year,
                period: quarter.period_label().to_string(),
                is_amendment: self.is_amendment,
                filing_type: FilingType::from_amendment(self.is_amendment),
            },
            services: self.services().collect(),
            check_cashing_data: self.check_cashing.clone(),
            deferred_presentment_data: self.deferred_presentment.clone(),
            submission_timestamp: submitted_at,
            status: SUBMITTED_STATUS.to_string(),
        })
    }
}

fn sync_block<T: Default>(block: &mut Option<T>, selected: bool) {
    if selected {
        block.get_or_insert_with(T::default);
    } else {
        *block = None;
    }
}

/// Whether a report is new or corrects an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingType {
    /// First filing for the quarter.
    #[serde(rename = "Original Filing")]
    Original,
    /// Correction of a previous filing.
    #[serde(rename = "Amendment")]
    Amendment,
}

impl FilingType {
    /// Filing type for the amendment flag.
    #[must_use]
    pub const fn from_amendment(is_amendment: bool) -> Self {
        if is_amendment {
            Self::Amendment
        } else {
            Self::Original
        }
    }

    /// Returns the display string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "Original Filing",
            Self::Amendment => "Amendment",
        }
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company section of a submitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    /// Legal company name.
    pub legal_name: String,
    /// DBA name, may be empty.
    #[serde(default)]
    pub dba: String,
    /// Contact person.
    pub contact_person: String,
}

/// Period section of a submitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetails {
    /// Reported quarter.
    pub quarter: Quarter,
    /// Reported year.
    pub year: i32,
    /// Period label, e.g. "January through March".
    pub period: String,
    /// Amendment flag.
    #[serde(default)]
    pub is_amendment: bool,
    /// Filing type derived from the amendment flag.
    pub filing_type: FilingType,
}

/// Immutable snapshot of a filing at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedReport {
    /// Company and contact.
    pub company_info: CompanyInfo,
    /// Quarter, year and filing type.
    pub report_details: ReportDetails,
    /// Selected services.
    pub services: Vec<ServiceType>,
    /// Check cashing months, null when not offered.
    pub check_cashing_data: Option<QuarterMonths<CheckCashingMonth>>,
    /// Deferred presentment months, null when not offered.
    pub deferred_presentment_data: Option<QuarterMonths<DeferredPresentmentMonth>>,
    /// When the report was submitted.
    #[serde(with = "iso_millis")]
    pub submission_timestamp: DateTime<Utc>,
    /// Informational processing status.
    pub status: String,
}

impl SubmittedReport {
    /// Returns true if this corrects an earlier filing.
    #[must_use]
    pub fn is_amendment(&self) -> bool {
        self.report_details.is_amendment
    }

    /// Comma-separated service names.
    #[must_use]
    pub fn services_display(&self) -> String {
        self.services
            .iter()
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Formats a timestamp.
    #[must_use]
    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Serializes a timestamp.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    /// Deserializes any RFC 3339 timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// A summed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricValue {
    /// Whole-number total.
    Count(u64),
    /// Dollar total.
    Money(Money),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => f.write_str(&format_count(*n)),
            Self::Money(m) => write!(f, "{m}"),
        }
    }
}
