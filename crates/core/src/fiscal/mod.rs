//! Filing calendar: quarters, deadlines, and the selectable year window.

pub mod quarter;

pub use quarter::{
    FILING_DEADLINE_DAYS, FILING_GUIDANCE, FILING_WINDOW_YEARS, Quarter, QuarterMonth,
    QuarterStatus, available_years, is_year_available, quarter_status,
};
