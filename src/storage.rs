use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use log::warn;

use crate::models::{Task, User};

/// Display name given to the profile created on first run.
const DEFAULT_USER_NAME: &str = "Player";

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `QUESTLOG_DB` environment variable.
/// 2. `~/.local/share/questlog/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("QUESTLOG_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("questlog");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.json");
        p
    })
}

/// Returns the path to the user profile file (`user.json`).
///
/// Located in the same directory as the tasks database.
fn user_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("user.json");
    p
}

/// Loads a single task by its ID.
///
/// Returns `None` if the task is not found.
pub fn load_task(id: u64) -> Option<Task> {
    load_tasks().into_iter().find(|t| t.id == id)
}

/// Loads all tasks from the storage file.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_tasks() -> Vec<Task> {
    let path = db_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            warn!("could not open {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        warn!("could not read {}", path.display());
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|e| {
        warn!("could not parse {}: {}", path.display(), e);
        Vec::new()
    })
}

/// Saves the given list of tasks to the storage file.
///
/// Overwrites the existing file.
pub fn save_tasks(tasks: &Vec<Task>) -> std::io::Result<()> {
    let path = db_path();
    let s = serde_json::to_string_pretty(tasks).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads the player profile, creating the default one on first run.
///
/// A missing or unreadable profile file materializes a fresh profile seeded
/// at `now`; it is not persisted until the next `save_user`.
pub fn load_or_create_user(now: NaiveDateTime) -> User {
    let path = user_path();
    if !path.exists() {
        return User::new(DEFAULT_USER_NAME, now);
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            warn!("could not open {}: {}", path.display(), e);
            return User::new(DEFAULT_USER_NAME, now);
        }
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        warn!("could not read {}", path.display());
        return User::new(DEFAULT_USER_NAME, now);
    }
    serde_json::from_str(&s).unwrap_or_else(|e| {
        warn!("could not parse {}: {}", path.display(), e);
        User::new(DEFAULT_USER_NAME, now)
    })
}

/// Saves the player profile, overwriting the existing file.
pub fn save_user(user: &User) -> std::io::Result<()> {
    let path = user_path();
    let s = serde_json::to_string_pretty(user).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Deletes the tasks and user profile database files.
pub fn delete_database() -> std::io::Result<()> {
    let t_path = db_path();
    if t_path.exists() {
        fs::remove_file(t_path)?;
    }
    let u_path = user_path();
    if u_path.exists() {
        fs::remove_file(u_path)?;
    }
    Ok(())
}
