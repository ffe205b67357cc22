//! Time source for the wizard.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Supplies the current instant and the operator's calendar date.
pub trait Clock: Send + Sync {
    /// Current instant, used to stamp submissions.
    fn now(&self) -> DateTime<Utc>;

    /// Today's date, used for quarter status and the year window.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the operator's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Stops the clock at `now`; `today` is its UTC date.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
