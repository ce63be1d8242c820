//! # Questlog
//!
//! A gamified terminal task manager written in Rust. Every completed task
//! awards experience points from a multi-factor formula, and accumulated XP
//! drives a leveling curve with smoothly increasing requirements.
//!
//! ## Features
//!
//! *   **XP & Levels**: Task priority, difficulty, schedule, streaks and
//!     combos all feed the reward. Large awards can cascade through several
//!     level-ups at once.
//! *   **Recurrence**: Daily, weekly, monthly and yearly schedules with
//!     calendar-correct rollover — a task anchored on Jan 31 lands on
//!     Feb 28/29, then back on Mar 31.
//! *   **Streaks & Combos**: On-time completions build per-task streaks;
//!     daily activity builds a day streak; repeating the same task builds a
//!     combo multiplier.
//! *   **Dual Interface**: Scriptable CLI for quick entry plus an
//!     interactive TUI dashboard with an XP progress gauge.
//! *   **Data Persistence**: Tasks and the player profile are stored in
//!     standard XDG data directories (JSON format).
//!
//! ## Usage
//!
//! ```bash
//! # Add a one-shot task
//! questlog add "Write report" --due 2026-09-01 --priority 2 --difficulty 3
//!
//! # Add a recurring task (every 2 weeks)
//! questlog add "Water plants" --due 2026-08-10 --repeat weekly --every 2
//!
//! # List tasks and XP progress
//! questlog list
//!
//! # Complete a task and earn XP
//! questlog complete 1
//!
//! # Show the player profile
//! questlog stats
//! ```
//!
//! Run `questlog` with no arguments to open the interactive dashboard.
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/questlog/tasks.json`
//! *   macOS: `~/Library/Application Support/questlog/tasks.json`
//! *   Windows: `%APPDATA%\questlog\tasks.json`
//!
//! The player profile lives in `user.json` next to it. Both paths can be
//! redirected by setting the `QUESTLOG_DB` environment variable.

pub mod commands;
pub mod format;
pub mod level;
pub mod models;
pub mod recurrence;
pub mod reward;
pub mod storage;
pub mod tui;
