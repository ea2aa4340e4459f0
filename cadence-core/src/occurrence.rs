//! Occurrence enumeration: which dates a routine is due on.
//!
//! The enumerator walks the clamped window one calendar day at a time and
//! asks a per-type predicate whether the routine is due. The scan is
//! deliberately linear rather than closed-form: the week-interval rules
//! depend on elapsed-week counts from `start_date` and the monthly-weekday
//! rule needs an in-month scan anyway, and dashboard windows are days to
//! months, not decades.

use chrono::{Datelike, Months, NaiveDate};

use crate::routine::{weekday_number, RecurrenceType, Routine};

/// Every date in `[range_start, range_end]` on which `routine` is due,
/// ascending, no duplicates.
///
/// The window is clamped to `[start_date, end_date]` first; an inverted or
/// empty window yields an empty vec. Malformed rule configuration (empty
/// `recurrence_days`, missing `selected_weekday`, unknown type) also yields
/// an empty vec — under-counting beats crashing a report.
pub fn occurrences_in_range(
    routine: &Routine,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<NaiveDate> {
    let effective_start = routine.start_date.max(range_start);
    let effective_end = match routine.end_date {
        Some(end) => end.min(range_end),
        None => range_end,
    };

    let mut out = Vec::new();
    let mut day = effective_start;
    while day <= effective_end {
        if due_on(routine, day) {
            out.push(day);
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    out
}

/// Is `routine` due on `date`? Pure; does not check the start/end window
/// (the enumerator clamps before calling).
pub fn due_on(routine: &Routine, date: NaiveDate) -> bool {
    match routine.recurrence_type {
        RecurrenceType::Daily => {
            let interval = routine.recurrence_interval.max(1);
            let diff_days = (date - routine.start_date).num_days();
            diff_days >= 0 && diff_days % interval == 0
        }
        RecurrenceType::Weekly => routine.recurrence_days.contains(&weekday_number(date)),
        RecurrenceType::Biweekly => week_interval_due(routine, date, 2),
        RecurrenceType::Triweekly => week_interval_due(routine, date, 3),
        RecurrenceType::Quadweekly => week_interval_due(routine, date, 4),
        RecurrenceType::Monthly => date.day() == routine.start_date.day(),
        RecurrenceType::MonthlyWeekday => match (routine.monthly_ordinal, routine.monthly_weekday) {
            (Some(ordinal), Some(weekday)) => is_nth_weekday_of_month(date, ordinal, weekday),
            _ => false,
        },
        RecurrenceType::Unknown => false,
    }
}

/// Every-N-weeks rules: right weekday, and an elapsed-week count from
/// `start_date` that lands on the interval. The anchor is days-since-start
/// divided by 7, not calendar weeks, so the cadence stays pinned to the
/// routine's start date regardless of which weekday that was.
fn week_interval_due(routine: &Routine, date: NaiveDate, interval_weeks: i64) -> bool {
    let Some(selected) = routine.selected_weekday else {
        return false;
    };
    if weekday_number(date) != selected {
        return false;
    }
    let diff_weeks = (date - routine.start_date).num_days().div_euclid(7);
    diff_weeks % interval_weeks == 0
}

/// True iff `date` is the `ordinal`-th occurrence of `weekday` (1=Mon..7=Sun)
/// in its month, where `ordinal = -1` means the last occurrence.
///
/// A month with fewer than `ordinal` such weekdays simply matches nothing
/// (a "5th Monday" rule skips 4-Monday months).
pub fn is_nth_weekday_of_month(date: NaiveDate, ordinal: i32, weekday: u32) -> bool {
    if weekday_number(date) != weekday {
        return false;
    }
    let (Some(first), Some(last)) = (date.with_day(1), last_day_of_month(date)) else {
        return false;
    };

    if ordinal == -1 {
        // Scan backward for the last occurrence of `weekday` in this month.
        let mut day = last;
        while day >= first {
            if weekday_number(day) == weekday {
                return day == date;
            }
            day = match day.pred_opt() {
                Some(prev) => prev,
                None => return false,
            };
        }
        return false;
    }

    if ordinal < 1 {
        return false;
    }

    // Scan forward counting occurrences of `weekday`.
    let mut count = 0;
    let mut day = first;
    while day <= last {
        if weekday_number(day) == weekday {
            count += 1;
            if count == ordinal {
                return day == date;
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => return false,
        };
    }
    false
}

fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn iso(dates: &[NaiveDate]) -> Vec<String> {
        dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }

    #[test]
    fn daily_every_three_days() {
        let routine = Routine::new(1, "water plants", d(2024, 1, 1)).with_interval(3);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 1, 10));
        assert_eq!(
            iso(&dates),
            ["2024-01-01", "2024-01-04", "2024-01-07", "2024-01-10"]
        );
    }

    #[test]
    fn weekly_monday_wednesday() {
        // 2024-01-01 is a Monday.
        let routine = Routine::new(2, "standup notes", d(2024, 1, 1))
            .with_type(RecurrenceType::Weekly)
            .with_days([1, 3]);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 1, 14));
        assert_eq!(
            iso(&dates),
            ["2024-01-01", "2024-01-03", "2024-01-08", "2024-01-10"]
        );
    }

    #[test]
    fn biweekly_skips_alternate_weeks() {
        let routine = Routine::new(3, "1:1", d(2024, 1, 1))
            .with_type(RecurrenceType::Biweekly)
            .with_selected_weekday(1);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 2, 12));
        assert_eq!(
            iso(&dates),
            ["2024-01-01", "2024-01-15", "2024-01-29", "2024-02-12"]
        );
    }

    #[test]
    fn biweekly_cadence_anchored_to_start_date_not_calendar_weeks() {
        // Routine starts mid-week (Thursday 2024-01-04) but fires on Mondays.
        // The first Monday is only 4 days after start (week 0), so it fires;
        // the next firing Monday is 2024-01-22 (week 2), not 2024-01-15.
        let routine = Routine::new(4, "review", d(2024, 1, 4))
            .with_type(RecurrenceType::Biweekly)
            .with_selected_weekday(1);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 1, 31));
        assert_eq!(iso(&dates), ["2024-01-08", "2024-01-22"]);
    }

    #[test]
    fn triweekly_and_quadweekly_intervals() {
        let tri = Routine::new(5, "deep clean", d(2024, 1, 5))
            .with_type(RecurrenceType::Triweekly)
            .with_selected_weekday(5);
        let dates = occurrences_in_range(&tri, d(2024, 1, 1), d(2024, 3, 1));
        assert_eq!(iso(&dates), ["2024-01-05", "2024-01-26", "2024-02-16"]);

        let quad = Routine::new(6, "report", d(2024, 1, 5))
            .with_type(RecurrenceType::Quadweekly)
            .with_selected_weekday(5);
        let dates = occurrences_in_range(&quad, d(2024, 1, 1), d(2024, 3, 1));
        assert_eq!(iso(&dates), ["2024-01-05", "2024-02-02", "2024-03-01"]);
    }

    #[test]
    fn monthly_matches_start_day_of_month() {
        let routine = Routine::new(7, "invoice", d(2024, 1, 15)).with_type(RecurrenceType::Monthly);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 3, 31));
        assert_eq!(iso(&dates), ["2024-01-15", "2024-02-15", "2024-03-15"]);
    }

    #[test]
    fn monthly_on_the_31st_skips_short_months() {
        // Literal day-of-month matching: no occurrence in February or April.
        let routine = Routine::new(8, "rent", d(2024, 1, 31)).with_type(RecurrenceType::Monthly);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 5, 31));
        assert_eq!(iso(&dates), ["2024-01-31", "2024-03-31", "2024-05-31"]);
    }

    #[test]
    fn monthly_weekday_last_friday() {
        let routine = Routine::new(9, "retro", d(2024, 1, 1))
            .with_type(RecurrenceType::MonthlyWeekday)
            .with_monthly_weekday(-1, 5);
        let dates = occurrences_in_range(&routine, d(2024, 2, 1), d(2024, 2, 29));
        assert_eq!(iso(&dates), ["2024-02-23"]);
    }

    #[test]
    fn monthly_weekday_second_tuesday() {
        let routine = Routine::new(10, "patch day", d(2024, 1, 1))
            .with_type(RecurrenceType::MonthlyWeekday)
            .with_monthly_weekday(2, 2);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 3, 31));
        assert_eq!(iso(&dates), ["2024-01-09", "2024-02-13", "2024-03-12"]);
    }

    #[test]
    fn fifth_monday_in_a_four_monday_month_is_empty() {
        // February 2024 has four Mondays.
        let routine = Routine::new(11, "audit", d(2024, 1, 1))
            .with_type(RecurrenceType::MonthlyWeekday)
            .with_monthly_weekday(5, 1);
        let dates = occurrences_in_range(&routine, d(2024, 2, 1), d(2024, 2, 29));
        assert!(dates.is_empty());
        // March 2024 does have a fifth Friday but not a fifth Monday either;
        // January does (the 29th).
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 1, 31));
        assert_eq!(iso(&dates), ["2024-01-29"]);
    }

    #[test]
    fn window_clamps_to_routine_bounds() {
        let routine = Routine::new(12, "sprint task", d(2024, 1, 5))
            .with_end_date(d(2024, 1, 8))
            .with_interval(1);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 1, 31));
        assert_eq!(
            iso(&dates),
            ["2024-01-05", "2024-01-06", "2024-01-07", "2024-01-08"]
        );
    }

    #[test]
    fn inverted_or_disjoint_windows_are_empty() {
        let routine = Routine::new(13, "daily", d(2024, 1, 1));
        assert!(occurrences_in_range(&routine, d(2024, 1, 10), d(2024, 1, 5)).is_empty());
        // Whole window before the routine starts.
        assert!(occurrences_in_range(&routine, d(2023, 1, 1), d(2023, 12, 31)).is_empty());
    }

    #[test]
    fn malformed_rules_degrade_to_never_due() {
        let no_days = Routine::new(14, "weekly, no days", d(2024, 1, 1))
            .with_type(RecurrenceType::Weekly);
        assert!(occurrences_in_range(&no_days, d(2024, 1, 1), d(2024, 1, 31)).is_empty());

        let no_weekday = Routine::new(15, "biweekly, no weekday", d(2024, 1, 1))
            .with_type(RecurrenceType::Biweekly);
        assert!(occurrences_in_range(&no_weekday, d(2024, 1, 1), d(2024, 1, 31)).is_empty());

        let half_monthly = Routine::new(16, "monthly_weekday, no ordinal", d(2024, 1, 1))
            .with_type(RecurrenceType::MonthlyWeekday);
        assert!(occurrences_in_range(&half_monthly, d(2024, 1, 1), d(2024, 1, 31)).is_empty());

        let unknown = Routine::new(17, "yearly", d(2024, 1, 1))
            .with_type(RecurrenceType::Unknown);
        assert!(occurrences_in_range(&unknown, d(2024, 1, 1), d(2024, 12, 31)).is_empty());
    }

    #[test]
    fn zero_interval_clamps_to_every_day() {
        let routine = Routine::new(18, "bad interval", d(2024, 1, 1)).with_interval(0);
        let dates = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 1, 3));
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn output_is_ascending_unique_and_deterministic() {
        let routine = Routine::new(19, "standup", d(2024, 1, 1))
            .with_type(RecurrenceType::Weekly)
            .with_days([1, 2, 3, 4, 5]);
        let a = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 3, 31));
        let b = occurrences_in_range(&routine, d(2024, 1, 1), d(2024, 3, 31));
        assert_eq!(a, b);
        for pair in a.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for date in &a {
            assert!(*date >= d(2024, 1, 1) && *date <= d(2024, 3, 31));
        }
    }

    #[test]
    fn nth_weekday_helper_rejects_wrong_weekday() {
        // 2024-02-23 is a Friday; asking about Monday must be false even
        // though the ordinal would otherwise line up.
        assert!(!is_nth_weekday_of_month(d(2024, 2, 23), -1, 1));
        assert!(is_nth_weekday_of_month(d(2024, 2, 23), -1, 5));
        assert!(!is_nth_weekday_of_month(d(2024, 2, 16), -1, 5));
        assert!(is_nth_weekday_of_month(d(2024, 2, 2), 1, 5));
        assert!(!is_nth_weekday_of_month(d(2024, 2, 2), 0, 5));
    }
}
