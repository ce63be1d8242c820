use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often a task repeats.
///
/// The ordinal weight (`daily`=1 .. `once`=5) feeds directly into the XP
/// formula: rarer commitments are worth more.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// A one-shot task; completing it marks it done instead of rescheduling.
    Once,
}

impl Cadence {
    /// Ordinal weight used by the reward formula.
    pub fn weight(self) -> u32 {
        match self {
            Cadence::Daily => 1,
            Cadence::Weekly => 2,
            Cadence::Monthly => 3,
            Cadence::Yearly => 4,
            Cadence::Once => 5,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
            Cadence::Yearly => "yearly",
            Cadence::Once => "once",
        };
        write!(f, "{}", s)
    }
}

/// Error returned when a cadence string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cadence '{0}'; expected daily, weekly, monthly, yearly or once")]
pub struct ParseCadenceError(pub String);

impl FromStr for Cadence {
    type Err = ParseCadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            "yearly" => Ok(Cadence::Yearly),
            "once" | "one-time" => Ok(Cadence::Once),
            other => Err(ParseCadenceError(other.to_string())),
        }
    }
}

/// Represents a single task in the quest log.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    /// The name or description of the task.
    pub name: String,
    /// The due date the task was created with. Recurrence math always
    /// starts from this anchor so monthly/yearly schedules never drift.
    pub original_due_date: NaiveDate,
    /// The current due date; advances on each recurring completion.
    pub due_date: NaiveDate,
    /// Task priority (1 = lowest).
    pub priority: u32,
    /// Task difficulty (1 = easiest).
    pub difficulty: u32,
    /// Magnitude of the cadence, e.g. every N days.
    pub repeat_interval: u32,
    /// How often the task repeats.
    pub cadence: Cadence,
    /// Number of times a recurring task has been completed.
    #[serde(default)]
    pub times_completed: u32,
    /// Consecutive on-time completions of a recurring task.
    #[serde(default)]
    pub streak: u32,
    /// Whether the task has been completed. Only one-shot tasks ever set
    /// this through normal completion.
    #[serde(default)]
    pub completed: bool,
    /// Timestamp when the task was created (ISO 8601).
    pub created_at: String,
}

/// The player profile: XP, level and the running counters that feed the
/// reward formula. Exactly one profile exists per database.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    /// Unique identifier for the user.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// XP accumulated within the current level.
    pub xp: f64,
    /// XP threshold for the next level.
    pub xp_required: f64,
    /// Lifetime XP sum; never decreases.
    pub total_xp: f64,
    /// Current level, starting at 1.
    pub level: u32,
    /// Lifetime number of completion events.
    #[serde(default)]
    pub tasks_completed: u32,
    /// Date of the last completion event, used to detect day rollovers.
    pub last_completion_date: NaiveDate,
    /// Consecutive days with at least one completion.
    #[serde(default)]
    pub daily_streak: u32,
    /// Completions counted so far on the current day.
    #[serde(default)]
    pub daily_tasks_completed: u32,
    /// Lifetime number of distinct days with activity.
    #[serde(default)]
    pub days_completed: u32,
    /// Consecutive repeats of completing the same task.
    #[serde(default)]
    pub combo_multiplier: u32,
    /// Id of the most recently completed task, if any.
    #[serde(default)]
    pub last_task_completed: Option<u64>,
    /// Timestamp of the previous completion event.
    pub last_completed_at: NaiveDateTime,
    /// Consecutive completions landing less than five seconds apart.
    #[serde(default = "default_time_multiplier")]
    pub time_multiplier: u32,
}

fn default_time_multiplier() -> u32 {
    1
}

impl User {
    /// Creates a fresh profile with all counters at their defaults.
    pub fn new(name: &str, now: NaiveDateTime) -> User {
        User {
            id: 1,
            name: name.to_string(),
            xp: 0.0,
            xp_required: 1.0,
            total_xp: 0.0,
            level: 1,
            tasks_completed: 0,
            last_completion_date: now.date(),
            daily_streak: 0,
            daily_tasks_completed: 0,
            days_completed: 0,
            combo_multiplier: 0,
            last_task_completed: None,
            last_completed_at: now,
            time_multiplier: 1,
        }
    }
}
