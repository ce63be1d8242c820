use std::env;
use std::sync::Mutex;

use chrono::{Duration, Local};
use questlog::commands::*;
use questlog::models::Cadence;
use questlog::storage::{load_or_create_user, load_task, load_tasks};

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(f: F)
where
    F: FnOnce(),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tasks.json");
    env::set_var("QUESTLOG_DB", db_path.to_str().unwrap());

    f();

    env::remove_var("QUESTLOG_DB");
}

fn due_in(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_add_and_list() {
    with_test_db(|| {
        cmd_add("Test Task".into(), due_in(10), 2, 3, 1, "weekly".into(), true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Test Task");
        assert_eq!(tasks[0].priority, 2);
        assert_eq!(tasks[0].difficulty, 3);
        assert_eq!(tasks[0].cadence, Cadence::Weekly);
        assert_eq!(tasks[0].original_due_date, tasks[0].due_date);
        assert_eq!(tasks[0].times_completed, 0);
        assert_eq!(tasks[0].streak, 0);
        assert!(!tasks[0].completed);
    });
}

#[test]
fn test_add_rejects_bad_input() {
    with_test_db(|| {
        cmd_add("Bad date".into(), "not-a-date".into(), 1, 1, 1, "once".into(), true);
        cmd_add("Bad cadence".into(), due_in(1), 1, 1, 1, "fortnightly".into(), true);
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_add_clamps_numeric_input() {
    with_test_db(|| {
        cmd_add("Clamped".into(), due_in(1), 0, 0, 0, "daily".into(), true);
        let tasks = load_tasks();
        assert_eq!(tasks[0].priority, 1);
        assert_eq!(tasks[0].difficulty, 1);
        assert_eq!(tasks[0].repeat_interval, 1);
    });
}

#[test]
fn test_complete_one_shot_task() {
    with_test_db(|| {
        cmd_add("Ship it".into(), due_in(5), 1, 1, 1, "once".into(), true);
        let id = load_tasks()[0].id;

        let outcome = cmd_complete(id, true).expect("completion should award XP");
        assert!(outcome.xp > 0.0);

        let task = load_task(id).unwrap();
        assert!(task.completed);
        assert_eq!(task.due_date, task.original_due_date);
        assert_eq!(task.times_completed, 0);

        let user = load_or_create_user(Local::now().naive_local());
        assert_eq!(user.tasks_completed, 1);
        assert_eq!(user.last_task_completed, Some(id));
        assert!(user.total_xp > 0.0);
    });
}

#[test]
fn test_complete_recurring_task_reschedules() {
    with_test_db(|| {
        cmd_add("Water plants".into(), due_in(0), 1, 1, 1, "daily".into(), true);
        let id = load_tasks()[0].id;
        let original = load_task(id).unwrap().original_due_date;

        cmd_complete(id, true);
        let task = load_task(id).unwrap();
        assert!(!task.completed);
        assert_eq!(task.times_completed, 1);
        assert_eq!(task.due_date, original + Duration::days(1));

        cmd_complete(id, true);
        let task = load_task(id).unwrap();
        assert_eq!(task.times_completed, 2);
        assert_eq!(task.due_date, original + Duration::days(2));

        let user = load_or_create_user(Local::now().naive_local());
        assert_eq!(user.tasks_completed, 2);
        // same task twice in a row
        assert_eq!(user.combo_multiplier, 1);
    });
}

#[test]
fn test_complete_missing_task_is_a_noop() {
    with_test_db(|| {
        assert!(cmd_complete(42, true).is_none());
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_remove_task() {
    with_test_db(|| {
        cmd_add("Doomed".into(), due_in(3), 1, 1, 1, "once".into(), true);
        let id = load_tasks()[0].id;

        cmd_remove(id, true);
        assert!(load_tasks().is_empty());

        // removing again is a no-op
        cmd_remove(id, true);
        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_level_ups_are_reported() {
    with_test_db(|| {
        // A fresh profile needs 1 XP for the next level, so any award
        // cascades at least once.
        cmd_add("First quest".into(), due_in(1), 1, 1, 1, "once".into(), true);
        let id = load_tasks()[0].id;

        let outcome = cmd_complete(id, true).unwrap();
        assert!(outcome.level_ups >= 1);

        let user = load_or_create_user(Local::now().naive_local());
        assert!(user.level > 1);
        assert!(user.xp < user.xp_required);
    });
}
