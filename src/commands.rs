use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::debug;

use crate::format::short_numeric;
use crate::models::{Cadence, Task};
use crate::reward::{self, CompletionOutcome};
use crate::storage::{delete_database, load_or_create_user, load_tasks, save_tasks, save_user};

/// Formats an XP amount for display, falling back to scientific notation
/// when the value is beyond the short-scale table.
fn fmt_xp(value: f64) -> String {
    match short_numeric(value) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            format!("{:.2e}", value)
        }
    }
}

/// Adds a new task to the database.
///
/// The due date and cadence are parsed here at the boundary; priority,
/// difficulty and interval are clamped to at least 1. Both due dates start
/// at the given date and all completion counters start at zero.
pub fn cmd_add(
    name: String,
    due: String,
    priority: u32,
    difficulty: u32,
    interval: u32,
    cadence: String,
    silent: bool,
) {
    let due_date = match NaiveDate::parse_from_str(&due, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => {
            if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", due, e); }
            return;
        }
    };
    let cadence: Cadence = match cadence.parse() {
        Ok(c) => c,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };

    let mut tasks = load_tasks();
    let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let t = Task {
        id: next_id,
        name,
        original_due_date: due_date,
        due_date,
        priority: priority.max(1),
        difficulty: difficulty.max(1),
        repeat_interval: interval.max(1),
        cadence,
        times_completed: 0,
        streak: 0,
        completed: false,
        created_at: Local::now().to_rfc3339(),
    };
    tasks.push(t);
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else {
        if !silent { println!("Task added (id = {})", next_id); }
    }
}

/// Completes a task by ID and awards XP.
///
/// A one-shot task is marked done; a recurring task rolls forward to its
/// next due date. The reward pipeline then updates the user's streaks and
/// combo, applies the XP award and resolves level-ups. Silently a no-op if
/// the task does not exist.
pub fn cmd_complete(id: u64, silent: bool) -> Option<CompletionOutcome> {
    let mut tasks = load_tasks();
    let idx = match tasks.iter().position(|t| t.id == id) {
        Some(i) => i,
        None => {
            if !silent { eprintln!("Task {} not found.", id); }
            return None;
        }
    };

    let now = Local::now().naive_local();
    let mut user = load_or_create_user(now);

    // A one-shot task leaves the active pool before the count is taken.
    if tasks[idx].cadence == Cadence::Once {
        tasks[idx].completed = true;
    }
    let active_tasks = tasks.iter().filter(|t| !t.completed).count() as u64;

    let mut task = tasks[idx].clone();
    let outcome = reward::complete(&mut task, &mut user, active_tasks, now);
    tasks[idx] = task;
    debug!("task {} completed for {} XP ({} active)", id, outcome.xp, active_tasks);

    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
        return None;
    }
    if let Err(e) = save_user(&user) {
        if !silent { eprintln!("Failed to save user: {}", e); }
        return None;
    }

    if !silent {
        println!("Task {} completed! You gained {} XP!", id, fmt_xp(outcome.xp));
        if outcome.level_ups > 0 {
            println!("Level up! You are now level {}.", user.level);
        }
    }
    Some(outcome)
}

/// Removes a task from the database by ID.
pub fn cmd_remove(id: u64, silent: bool) {
    let mut tasks = load_tasks();
    let len_before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == len_before {
        if !silent { eprintln!("Task {} not found.", id); }
    } else {
        if let Err(e) = save_tasks(&tasks) {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        } else {
            if !silent { println!("Task {} removed.", id); }
        }
    }
}

/// Lists tasks in a formatted table, sorted by due date.
///
/// By default, hides completed tasks unless `all` is true. A profile
/// summary line is printed above the table.
pub fn cmd_list(all: bool) {
    let mut tasks = load_tasks();
    if !all {
        tasks.retain(|t| !t.completed);
    }

    let user = load_or_create_user(Local::now().naive_local());
    println!(
        "{} — level {} — {}/{} XP (total {})",
        user.name,
        user.level,
        fmt_xp(user.xp),
        fmt_xp(user.xp_required),
        fmt_xp(user.total_xp)
    );

    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    tasks.sort_by_key(|t| t.due_date);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Time Left").add_attribute(Attribute::Bold),
            Cell::new("Pri").add_attribute(Attribute::Bold),
            Cell::new("Diff").add_attribute(Attribute::Bold),
            Cell::new("Repeats").add_attribute(Attribute::Bold),
            Cell::new("Streak").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let today = Local::now().date_naive();

    for t in tasks {
        let days_left = (t.due_date - today).num_days();
        let time_left_str = if days_left < 0 {
            format!("{}d overdue", days_left.abs())
        } else if days_left == 0 {
            "Today".to_string()
        } else {
            format!("{}d", days_left)
        };

        let due_color = if t.completed {
            Color::Grey
        } else if days_left < 0 {
            Color::Red
        } else if days_left == 0 {
            Color::Yellow
        } else {
            Color::Green
        };

        let repeats = if t.cadence == Cadence::Once {
            "once".to_string()
        } else if t.repeat_interval == 1 {
            t.cadence.to_string()
        } else {
            format!("every {} {}", t.repeat_interval, t.cadence)
        };

        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.name),
            Cell::new(t.due_date),
            Cell::new(time_left_str).fg(due_color),
            Cell::new(t.priority),
            Cell::new(t.difficulty),
            Cell::new(repeats),
            Cell::new(t.streak),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Prints the player profile: level, XP progress and the running counters
/// that feed the reward formula.
pub fn cmd_stats() {
    let user = load_or_create_user(Local::now().naive_local());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Stat").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec!["Name".to_string(), user.name.clone()]);
    table.add_row(vec!["Level".to_string(), user.level.to_string()]);
    table.add_row(vec![
        "XP".to_string(),
        format!("{} / {}", fmt_xp(user.xp), fmt_xp(user.xp_required)),
    ]);
    table.add_row(vec!["Total XP".to_string(), fmt_xp(user.total_xp)]);
    table.add_row(vec![
        "Tasks completed".to_string(),
        user.tasks_completed.to_string(),
    ]);
    table.add_row(vec!["Daily streak".to_string(), user.daily_streak.to_string()]);
    table.add_row(vec![
        "Completed today".to_string(),
        user.daily_tasks_completed.to_string(),
    ]);
    table.add_row(vec!["Days active".to_string(), user.days_completed.to_string()]);
    table.add_row(vec!["Combo".to_string(), user.combo_multiplier.to_string()]);
    table.add_row(vec!["Rapid combo".to_string(), user.time_multiplier.to_string()]);

    println!("{table}");
}

/// Resets the database by deleting all tasks and the player profile.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and your profile? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
