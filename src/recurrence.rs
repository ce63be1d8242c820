use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Cadence;

/// Computes the next due date of a recurring task.
///
/// The schedule is always derived from the original due date and the number
/// of completions so far, never from "today" or the previous due date. That
/// keeps the function pure and stops monthly schedules from drifting: a task
/// anchored on Jan 31 lands on Feb 28, then back on Mar 31.
///
/// Day-of-month is clamped to the length of the target month, so Jan 31 plus
/// one month is Feb 29 in a leap year and Feb 28 otherwise; the same clamp
/// handles Feb 29 anchors under yearly cadence. A one-shot cadence returns
/// the original date unchanged.
pub fn next_due_date(
    original: NaiveDate,
    times_completed: u32,
    interval: u32,
    cadence: Cadence,
) -> NaiveDate {
    let steps = interval as i64 * times_completed as i64;
    match cadence {
        Cadence::Daily => original + Duration::days(steps),
        Cadence::Weekly => original + Duration::weeks(steps),
        Cadence::Monthly => {
            let months = original.month0() as i64 + steps;
            let year = original.year() + (months / 12) as i32;
            let month = (months % 12) as u32 + 1;
            let day = original.day().min(days_in_month(year, month));
            NaiveDate::from_ymd_opt(year, month, day).unwrap_or(original)
        }
        Cadence::Yearly => {
            let year = original.year() + steps as i32;
            let day = original.day().min(days_in_month(year, original.month()));
            NaiveDate::from_ymd_opt(year, original.month(), day).unwrap_or(original)
        }
        Cadence::Once => original,
    }
}

/// Number of days in the given month, accounting for leap years.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::days_in_month;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }
}
