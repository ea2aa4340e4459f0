//! Reporting windows and overdue math.
//!
//! `today` is always an explicit argument; nothing in this crate reads the
//! clock, so reports are reproducible for any reference date.

use chrono::{Days, NaiveDate};

/// A dashboard period filter resolved against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Trailing week ending today.
    Last7Days,
    /// Trailing 30 days ending today (the dashboard default).
    Last30Days,
    /// Trailing 60 days ending today.
    Last60Days,
    /// Explicit inclusive range.
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Default for ReportPeriod {
    fn default() -> Self {
        ReportPeriod::Last30Days
    }
}

impl ReportPeriod {
    /// Resolve to an inclusive `(start, end)` window.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let trailing = |days: u64| {
            let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
            (start, today)
        };
        match self {
            ReportPeriod::Last7Days => trailing(7),
            ReportPeriod::Last30Days => trailing(30),
            ReportPeriod::Last60Days => trailing(60),
            ReportPeriod::Custom { start, end } => (*start, *end),
        }
    }
}

/// Whole days `occurrence` lags behind `today`. Positive means overdue,
/// zero means due today, negative means still in the future.
pub fn days_overdue(occurrence: NaiveDate, today: NaiveDate) -> i64 {
    (today - occurrence).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn trailing_windows_end_today() {
        let today = d(2024, 3, 15);
        assert_eq!(ReportPeriod::Last7Days.resolve(today), (d(2024, 3, 8), today));
        assert_eq!(ReportPeriod::Last30Days.resolve(today), (d(2024, 2, 14), today));
        assert_eq!(ReportPeriod::Last60Days.resolve(today), (d(2024, 1, 15), today));
    }

    #[test]
    fn custom_window_passes_through() {
        let period = ReportPeriod::Custom {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        assert_eq!(period.resolve(d(2024, 6, 1)), (d(2024, 1, 1), d(2024, 1, 31)));
    }

    #[test]
    fn default_is_thirty_days() {
        assert_eq!(ReportPeriod::default(), ReportPeriod::Last30Days);
    }

    #[test]
    fn overdue_sign_convention() {
        let today = d(2024, 3, 15);
        assert_eq!(days_overdue(d(2024, 3, 10), today), 5);
        assert_eq!(days_overdue(today, today), 0);
        assert_eq!(days_overdue(d(2024, 3, 20), today), -5);
    }
}
