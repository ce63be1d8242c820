use chrono::NaiveDate;
use questlog::models::Cadence;
use questlog::recurrence::next_due_date;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn zero_completions_returns_original_for_every_cadence() {
    let original = date(2024, 1, 31);
    for cadence in [
        Cadence::Daily,
        Cadence::Weekly,
        Cadence::Monthly,
        Cadence::Yearly,
        Cadence::Once,
    ] {
        assert_eq!(next_due_date(original, 0, 3, cadence), original);
    }
}

#[test]
fn daily_advances_by_interval_times_completions() {
    let original = date(2026, 8, 1);
    assert_eq!(next_due_date(original, 1, 1, Cadence::Daily), date(2026, 8, 2));
    assert_eq!(next_due_date(original, 3, 2, Cadence::Daily), date(2026, 8, 7));
    // across a month boundary
    assert_eq!(next_due_date(original, 31, 1, Cadence::Daily), date(2026, 9, 1));
}

#[test]
fn weekly_advances_by_whole_weeks() {
    let original = date(2026, 8, 3);
    assert_eq!(next_due_date(original, 1, 1, Cadence::Weekly), date(2026, 8, 10));
    assert_eq!(next_due_date(original, 2, 3, Cadence::Weekly), date(2026, 9, 14));
}

#[test]
fn monthly_clamps_to_end_of_shorter_month() {
    // Leap year February keeps the 29th
    assert_eq!(
        next_due_date(date(2024, 1, 31), 1, 1, Cadence::Monthly),
        date(2024, 2, 29)
    );
    // Non-leap February clamps to the 28th
    assert_eq!(
        next_due_date(date(2025, 1, 31), 1, 1, Cadence::Monthly),
        date(2025, 2, 28)
    );
}

#[test]
fn monthly_snaps_back_to_anchor_day_after_short_month() {
    // The schedule is derived from the anchor, so a Jan 31 task is due
    // Feb 28 and then Mar 31, not Mar 28.
    let original = date(2025, 1, 31);
    assert_eq!(next_due_date(original, 2, 1, Cadence::Monthly), date(2025, 3, 31));
}

#[test]
fn monthly_carries_year_overflow() {
    assert_eq!(
        next_due_date(date(2025, 11, 15), 3, 1, Cadence::Monthly),
        date(2026, 2, 15)
    );
    assert_eq!(
        next_due_date(date(2025, 6, 10), 2, 12, Cadence::Monthly),
        date(2027, 6, 10)
    );
}

#[test]
fn yearly_clamps_leap_day() {
    let original = date(2024, 2, 29);
    assert_eq!(next_due_date(original, 1, 1, Cadence::Yearly), date(2025, 2, 28));
    // A leap target year keeps the 29th
    assert_eq!(next_due_date(original, 4, 1, Cadence::Yearly), date(2028, 2, 29));
}

#[test]
fn once_never_moves() {
    let original = date(2026, 5, 20);
    assert_eq!(next_due_date(original, 7, 4, Cadence::Once), original);
}
