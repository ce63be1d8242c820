use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::level;
use crate::models::{Cadence, Task, User};
use crate::recurrence::next_due_date;

/// What a completion event earned, for caller-facing messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOutcome {
    /// The XP award, already applied to the user.
    pub xp: f64,
    /// Levels gained from this award.
    pub level_ups: u32,
}

/// Applies one completion event to a task and its owner.
///
/// Mutates both entities in place through exclusive references; the caller
/// owns them for the duration of the transaction and persists them after.
/// `active_tasks` is the number of not-yet-completed tasks at the moment of
/// completion and `now` is injected so the calculation stays reproducible.
///
/// For a recurring task this advances the due date, updates the on-time
/// streak, and scores the timing against the new due date. A one-shot task
/// is marked completed with a neutral due multiplier. Either way the user's
/// daily counters and combo are rolled forward, the XP formula is evaluated,
/// and the award is fed through the leveling engine.
pub fn complete(
    task: &mut Task,
    user: &mut User,
    active_tasks: u64,
    now: NaiveDateTime,
) -> CompletionOutcome {
    let today = now.date();

    let due_mult = if task.cadence == Cadence::Once {
        task.completed = true;
        1.0
    } else {
        task.times_completed += 1;
        task.due_date = next_due_date(
            task.original_due_date,
            task.times_completed,
            task.repeat_interval,
            task.cadence,
        );
        let mult = due_multiplier(task, now);
        if today > task.due_date {
            task.streak = 0;
        } else {
            task.streak += 1;
        }
        mult
    };

    let repeat_mult = repeat_multiplier(task.cadence, task.repeat_interval);

    user.tasks_completed += 1;
    let day_difference = (today - user.last_completion_date).num_days();
    if day_difference == 1 {
        user.daily_streak += 1;
        user.daily_tasks_completed = 1;
        user.days_completed += 1;
    } else if day_difference > 1 {
        user.daily_streak = 1;
        user.daily_tasks_completed = 1;
        user.days_completed += 1;
    } else {
        user.daily_tasks_completed += 1;
    }
    user.last_completion_date = today;

    if user.last_task_completed == Some(task.id) {
        user.combo_multiplier += 1;
    } else {
        user.combo_multiplier = 0;
    }
    user.last_task_completed = Some(task.id);

    // Back-to-back completions within five seconds build the rapid counter.
    let seconds_since_last = (now - user.last_completed_at).num_seconds().abs();
    if seconds_since_last < 5 {
        user.time_multiplier += 1;
    } else {
        user.time_multiplier = 1;
    }
    user.last_completed_at = now;

    let xp = (task.priority as f64
        * task.difficulty as f64
        * task.cadence.weight() as f64
        * repeat_mult
        * (1.0 + ln_floored(task.times_completed as u64))
        * (1.0 + ln_floored(user.tasks_completed as u64))
        * (1.0 + ln_floored(active_tasks))
        * (1.0 + user.daily_streak as f64 / 10.0)
        * (1.0 + user.daily_tasks_completed as f64 / 10.0)
        * (1.0 + ln_floored(user.days_completed as u64))
        * (1.0 + task.streak as f64 / 10.0)
        * due_mult
        * (1.0 + user.combo_multiplier as f64 / 10.0))
        .round()
        + user.combo_multiplier as f64;

    let level_ups = level::add_xp(user, xp);
    CompletionOutcome { xp, level_ups }
}

/// Scores how a completion lands relative to the task's due date.
///
/// - Due in the future: `1 + 1/(days + 1)`, trailing off toward 1 as the
///   due date recedes and peaking at 1.5 when due tomorrow.
/// - Overdue: `-2/(days - 1)` with `days` negative, shrinking toward 0 the
///   longer the task sat; both branches clamp their divisor so the value
///   stays finite near the boundary.
/// - Due today: scales from 2 at the stroke of the due day up to 4 just
///   before the next midnight, so last-minute saves earn the most.
///
/// One-shot tasks always score a neutral 1.
pub fn due_multiplier(task: &Task, now: NaiveDateTime) -> f64 {
    if task.cadence == Cadence::Once {
        return 1.0;
    }
    let days_to_due = (task.due_date - now.date()).num_days();
    if days_to_due > 0 {
        1.0 + 1.0 / (days_to_due + 1).max(1) as f64
    } else if days_to_due < 0 {
        -2.0 / (days_to_due - 1).min(-1) as f64
    } else {
        let next_midnight = task
            .due_date
            .succ_opt()
            .map(|d| d.and_time(NaiveTime::MIN))
            .unwrap_or_else(|| now + Duration::days(1));
        let day_fraction_left = (next_midnight - now).num_seconds() as f64 / 86_400.0;
        4.0 / (1.0 + day_fraction_left)
    }
}

/// Effort-scale multiplier for the commitment a schedule represents.
///
/// Interpolates linearly between anchor values: 1x for an every-day task,
/// 2x weekly, 3x monthly, 4x yearly, approaching 5x (the one-shot value) as
/// the interval stretches beyond a year.
pub fn repeat_multiplier(cadence: Cadence, interval: u32) -> f64 {
    let interval = interval.max(1) as f64;
    match cadence {
        Cadence::Daily => {
            if interval < 7.0 {
                1.0 + (interval - 1.0) / 6.0
            } else if interval < 30.0 {
                2.0 + (interval - 7.0) / 23.0
            } else if interval < 365.0 {
                3.0 + (interval - 30.0) / 335.0
            } else {
                5.0 - 365.0 / interval
            }
        }
        Cadence::Weekly => {
            if interval < 4.0 {
                2.0 + (interval - 1.0) / 3.0
            } else if interval < 52.0 {
                3.0 + (interval - 4.0) / 48.0
            } else {
                5.0 - 52.0 / interval
            }
        }
        Cadence::Monthly => {
            if interval < 12.0 {
                3.0 + (interval - 1.0) / 11.0
            } else {
                5.0 - 12.0 / interval
            }
        }
        Cadence::Yearly => 5.0 - 1.0 / interval,
        Cadence::Once => 5.0,
    }
}

/// `ln(count)` with the argument floored at 1, so zero counts contribute a
/// neutral factor instead of a negative or undefined one.
fn ln_floored(count: u64) -> f64 {
    (count.max(1) as f64).ln()
}
