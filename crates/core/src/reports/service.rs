//! Quarterly aggregation and plain-text report rendering.

use std::collections::BTreeMap;

use msb_shared::types::Money;
use msb_shared::types::lenient::parse_count;

use super::types::{
    Metric, MetricKind, MetricValue, MonthlyActivity, QuarterMonths, SubmittedReport, iso_millis,
};
use crate::fiscal::{Quarter, QuarterMonth};

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 16;

/// Footer line closing every rendered report.
pub const REPORT_FOOTER: &str =
    "This report was automatically submitted via the ComplyCheck MSB Quarterly Reporting Tool.";

/// Service for aggregating and rendering MSB reports.
pub struct ReportService;

impl ReportService {
    /// Parses one raw monthly value for a metric of the given kind.
    #[must_use]
    pub fn metric_value(kind: MetricKind, raw: &str) -> MetricValue {
        match kind {
            MetricKind::Count => MetricValue::Count(parse_count(raw)),
            MetricKind::Money => MetricValue::Money(Money::parse_lenient(raw)),
        }
    }

    /// Sums each requested metric across the three months.
    ///
    /// Counts add as integers, money as exact decimals. Blank or malformed
    /// values contribute zero.
    #[must_use]
    pub fn aggregate_quarter<A: MonthlyActivity>(
        monthly: &QuarterMonths<A>,
        metrics: &[A::Metric],
    ) -> BTreeMap<A::Metric, MetricValue> {
        metrics
            .iter()
            .map(|&metric| {
                let total = match metric.kind() {
                    MetricKind::Count => MetricValue::Count(
                        monthly
                            .iter()
                            .map(|month| parse_count(month.raw(metric)))
                            .fold(0, u64::saturating_add),
                    ),
                    MetricKind::Money => MetricValue::Money(
                        monthly
                            .iter()
                            .map(|month| Money::parse_lenient(month.raw(metric)))
                            .sum(),
                    ),
                };
                (metric, total)
            })
            .collect()
    }

    /// Totals for every metric the activity tracks.
    #[must_use]
    pub fn quarter_totals<A: MonthlyActivity>(
        monthly: &QuarterMonths<A>,
    ) -> BTreeMap<A::Metric, MetricValue> {
        Self::aggregate_quarter(monthly, A::METRICS)
    }

    /// Renders the report as the plain text a reviewer reads.
    ///
    /// The output depends only on the report, so rendering twice yields the
    /// same text. Services without a data block are left out.
    #[must_use]
    pub fn render_summary(report: &SubmittedReport) -> String {
        let details = &report.report_details;
        let company = &report.company_info;
        let mut out = String::new();

        out.push_str("MSB QUARTERLY REPORT SUBMISSION\n");
        out.push_str("===============================\n\n");
        out.push_str(&format!("Company: {}\n", company.legal_name));
        out.push_str(&format!("DBA: {}\n", display_or_none(&company.dba)));
        out.push_str(&format!("Contact Person: {}\n", company.contact_person));
        out.push_str(&format!(
            "Quarter: {} {}{}\n",
            details.quarter,
            details.year,
            if details.is_amendment {
                " (AMENDMENT)"
            } else {
                ""
            }
        ));
        out.push_str(&format!(
            "Reporting Period: {}, {}\n",
            details.quarter.period_label(),
            details.year
        ));
        out.push_str(&format!("Filing Type: {}\n", details.filing_type));
        out.push_str(&format!(
            "Services: {}\n",
            display_or_none(&report.services_display())
        ));

        if let Some(data) = &report.check_cashing_data {
            Self::render_section(&mut out, "CHECK CASHING", details.quarter, details.year, data);
        }
        if let Some(data) = &report.deferred_presentment_data {
            Self::render_section(
                &mut out,
                "DEFERRED PRESENTMENT",
                details.quarter,
                details.year,
                data,
            );
        }

        out.push_str("\n=== SUBMISSION DETAILS ===\n");
        out.push_str(&format!(
            "Submitted: {}\n",
            iso_millis::format(&report.submission_timestamp)
        ));
        out.push_str(&format!("Status: {}\n", report.status));
        out.push_str(&format!(
            "Amendment: {}\n",
            if details.is_amendment { "Yes" } else { "No" }
        ));
        out.push_str("\n---\n");
        out.push_str(REPORT_FOOTER);
        out.push('\n');

        out
    }

    fn render_section<A: MonthlyActivity>(
        out: &mut String,
        heading: &str,
        quarter: Quarter,
        year: i32,
        monthly: &QuarterMonths<A>,
    ) {
        out.push_str(&format!("\n=== {heading} DATA ({quarter} {year}) ===\n"));
        out.push_str(&format!(
            "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}{:>VALUE_WIDTH$}\n",
            "Metric",
            quarter.month_name(QuarterMonth::First),
            quarter.month_name(QuarterMonth::Second),
            quarter.month_name(QuarterMonth::Third),
            "Quarter Total",
        ));
        out.push_str(&"-".repeat(LABEL_WIDTH + VALUE_WIDTH * 4));
        out.push('\n');

        let totals = Self::quarter_totals(monthly);
        for &metric in A::METRICS {
            let monthly_values: Vec<String> = monthly
                .iter()
                .map(|month| Self::metric_value(metric.kind(), month.raw(metric)).to_string())
                .collect();
            let total = totals
                .get(&metric)
                .map(ToString::to_string)
                .unwrap_or_default();

            out.push_str(&format!("{:<LABEL_WIDTH$}", metric.label()));
            for value in &monthly_values {
                out.push_str(&format!("{value:>VALUE_WIDTH$}"));
            }
            out.push_str(&format!("{total:>VALUE_WIDTH$}\n"));
        }

        let blank_months: Vec<&str> = QuarterMonth::ALL
            .iter()
            .filter(|&&month| monthly.get(month).is_blank())
            .map(|&month| quarter.month_name(month))
            .collect();
        if !blank_months.is_empty() {
            out.push_str(&format!(
                "No data entered for: {}\n",
                blank_months.join(", ")
            ));
        }
    }
}

fn display_or_none(value: &str) -> &str {
    if value.trim().is_empty() {
        "None"
    } else {
        value
    }
}
