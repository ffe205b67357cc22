//! Calendar quarters and filing-deadline status.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days after quarter end before a filing is late.
pub const FILING_DEADLINE_DAYS: u64 = 45;

/// Number of selectable report years, current year included.
pub const FILING_WINDOW_YEARS: i32 = 4;

/// A three-month calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
}

/// Position of a month inside its quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuarterMonth {
    /// First month.
    First,
    /// Second month.
    Second,
    /// Third month.
    Third,
}

impl QuarterMonth {
    /// All three months in order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// 1-based month number within the quarter.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Month for a 1-based number.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Returns the string representation of the quarter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// Parses a quarter from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "Q1" | "1" => Some(Self::Q1),
            "Q2" | "2" => Some(Self::Q2),
            "Q3" | "3" => Some(Self::Q3),
            "Q4" | "4" => Some(Self::Q4),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Q1 => 0,
            Self::Q2 => 1,
            Self::Q3 => 2,
            Self::Q4 => 3,
        }
    }

    /// Calendar name of a month in this quarter.
    #[must_use]
    pub const fn month_name(self, month: QuarterMonth) -> &'static str {
        MONTH_NAMES[self.index() * 3 + month.number() as usize - 1]
    }

    /// Reporting period label, e.g. "January through March".
    #[must_use]
    pub const fn period_label(self) -> &'static str {
        match self {
            Self::Q1 => "January through March",
            Self::Q2 => "April through June",
            Self::Q3 => "July through September",
            Self::Q4 => "October through December",
        }
    }

    /// Last calendar day of the quarter.
    ///
    /// Years outside chrono's range clamp to the representable extremes.
    #[must_use]
    pub fn end_date(self, year: i32) -> NaiveDate {
        let (month, day) = match self {
            Self::Q1 => (3, 31),
            Self::Q2 => (6, 30),
            Self::Q3 => (9, 30),
            Self::Q4 => (12, 31),
        };
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if year > 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
    }

    /// Last day a filing for this quarter is on time.
    #[must_use]
    pub fn filing_deadline(self, year: i32) -> NaiveDate {
        self.end_date(year)
            .checked_add_days(Days::new(FILING_DEADLINE_DAYS))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filing status of a quarter relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterStatus {
    /// Quarter has not ended; it cannot be filed yet.
    Future,
    /// Within the 45-day filing window.
    Current,
    /// Past the filing window; still fileable, fines may apply.
    Late,
}

impl QuarterStatus {
    /// Returns true if a report for the quarter may be filed.
    #[must_use]
    pub const fn is_fileable(self) -> bool {
        !matches!(self, Self::Future)
    }

    /// Message shown to the operator for this status.
    #[must_use]
    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Future => "This quarter is not complete yet - cannot file",
            Self::Current => "Ready to file on time",
            Self::Late => "This is a late filing - fines may apply",
        }
    }
}

/// Classifies a quarter against `today`.
///
/// `Future` before the quarter's last day, `Late` once more than
/// [`FILING_DEADLINE_DAYS`] have passed since it, `Current` otherwise.
#[must_use]
pub fn quarter_status(quarter: Quarter, year: i32, today: NaiveDate) -> QuarterStatus {
    if today < quarter.end_date(year) {
        QuarterStatus::Future
    } else if today > quarter.filing_deadline(year) {
        QuarterStatus::Late
    } else {
        QuarterStatus::Current
    }
}

/// Years offered for filing, most recent first.
#[must_use]
pub fn available_years(today: NaiveDate) -> Vec<i32> {
    let current = today.year();
    (0..FILING_WINDOW_YEARS).map(|back| current - back).collect()
}

/// Returns true if `year` is inside the filing window.
#[must_use]
pub fn is_year_available(year: i32, today: NaiveDate) -> bool {
    let current = today.year();
    year <= current && year > current - FILING_WINDOW_YEARS
}

/// Guidance shown next to the quarter selection.
pub const FILING_GUIDANCE: [&str; 4] = [
    "Reports must be filed within 45 days after the quarter ends",
    "Late reports may result in fines but must still be filed",
    "Amendments can be filed anytime to correct previous reports",
    "You need complete 3-month data to file accurately",
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Quarter::Q1, date(2024, 3, 30), QuarterStatus::Future)]
    #[case(Quarter::Q1, date(2024, 3, 31), QuarterStatus::Current)]
    #[case(Quarter::Q1, date(2024, 5, 15), QuarterStatus::Current)]
    #[case(Quarter::Q1, date(2024, 5, 16), QuarterStatus::Late)]
    #[case(Quarter::Q2, date(2024, 6, 29), QuarterStatus::Future)]
    #[case(Quarter::Q2, date(2024, 8, 14), QuarterStatus::Current)]
    #[case(Quarter::Q2, date(2024, 8, 15), QuarterStatus::Late)]
    #[case(Quarter::Q3, date(2024, 11, 14), QuarterStatus::Current)]
    #[case(Quarter::Q4, date(2024, 12, 30), QuarterStatus::Future)]
    #[case(Quarter::Q4, date(2025, 2, 14), QuarterStatus::Current)]
    #[case(Quarter::Q4, date(2025, 2, 15), QuarterStatus::Late)]
    fn test_quarter_status_boundaries(
        #[case] quarter: Quarter,
        #[case] today: NaiveDate,
        #[case] expected: QuarterStatus,
    ) {
        assert_eq!(quarter_status(quarter, 2024, today), expected);
    }

    #[test]
    fn test_quarter_status_extreme_years() {
        let today = date(2024, 1, 1);
        assert_eq!(quarter_status(Quarter::Q1, i32::MAX, today), QuarterStatus::Future);
        assert_eq!(quarter_status(Quarter::Q1, i32::MIN, today), QuarterStatus::Late);
    }

    #[test]
    fn test_period_labels_and_months() {
        assert_eq!(Quarter::Q1.period_label(), "January through March");
        assert_eq!(Quarter::Q4.period_label(), "October through December");
        assert_eq!(Quarter::Q1.month_name(QuarterMonth::First), "January");
        assert_eq!(Quarter::Q2.month_name(QuarterMonth::Third), "June");
        assert_eq!(Quarter::Q4.month_name(QuarterMonth::Third), "December");
    }

    #[test]
    fn test_quarter_parse() {
        assert_eq!(Quarter::parse("q3"), Some(Quarter::Q3));
        assert_eq!(Quarter::parse(" 2 "), Some(Quarter::Q2));
        assert_eq!(Quarter::parse("Q5"), None);
        assert_eq!(Quarter::parse(""), None);
    }

    #[test]
    fn test_available_years() {
        assert_eq!(available_years(date(2024, 7, 1)), vec![2024, 2023, 2022, 2021]);
        assert!(is_year_available(2021, date(2024, 7, 1)));
        assert!(!is_year_available(2020, date(2024, 7, 1)));
        assert!(!is_year_available(2025, date(2024, 7, 1)));
    }

    #[test]
    fn test_quarter_serde() {
        assert_eq!(serde_json::to_string(&Quarter::Q2).unwrap(), "\"Q2\"");
        assert_eq!(
            serde_json::to_string(&QuarterStatus::Late).unwrap(),
            "\"late\""
        );
    }

    fn arb_quarter() -> impl Strategy<Value = Quarter> {
        prop_oneof![
            Just(Quarter::Q1),
            Just(Quarter::Q2),
            Just(Quarter::Q3),
            Just(Quarter::Q4),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Future iff before quarter end, Late iff more than 45 days after, Current otherwise.
        #[test]
        fn prop_quarter_status_partitions_timeline(
            quarter in arb_quarter(),
            year in 2000i32..2100,
            offset in -400i64..400,
        ) {
            let end = quarter.end_date(year);
            let today = end + chrono::Duration::days(offset);
            let status = quarter_status(quarter, year, today);

            prop_assert_eq!(status == QuarterStatus::Future, offset < 0);
            prop_assert_eq!(status == QuarterStatus::Late, offset > 45);
            prop_assert_eq!(status == QuarterStatus::Current, (0..=45).contains(&offset));
            prop_assert_eq!(status.is_fileable(), offset >= 0);
        }
    }
}
