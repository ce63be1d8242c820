use chrono::Local;
use ratatui::widgets::TableState;

use crate::commands::{cmd_add, cmd_complete, cmd_remove};
use crate::format::short_numeric;
use crate::models::{Cadence, Task, User};
use crate::storage::{load_or_create_user, load_tasks};

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
}

/// State for the multi-step "Add Task" wizard.
pub struct AddState {
    pub name: String,
    pub due: String,
    pub priority: u32,
    pub difficulty: u32,
    pub cadence: String,
    pub interval: u32,
    pub step: usize, // 0: Name, 1: Due, 2: Priority, 3: Difficulty, 4: Repeat, 5: Interval
}

impl Default for AddState {
    fn default() -> AddState {
        AddState {
            name: String::new(),
            due: String::new(),
            priority: 1,
            difficulty: 1,
            cadence: "once".to_string(),
            interval: 1,
            step: 0,
        }
    }
}

pub struct App {
    pub tasks: Vec<Task>,
    pub user: User,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub add_state: AddState,
    pub show_completed: bool,
    /// Last XP/level-up message, shown in place of the help line.
    pub status: Option<String>,
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new() -> App {
        let mut app = App {
            tasks: Vec::new(),
            user: load_or_create_user(Local::now().naive_local()),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_state: AddState::default(),
            show_completed: false,
            status: None,
        };
        app.reload();
        app
    }

    /// Reloads tasks and the profile from storage.
    pub fn reload(&mut self) {
        let mut tasks = load_tasks();
        if !self.show_completed {
            tasks.retain(|t| !t.completed);
        }
        tasks.sort_by_key(|t| t.due_date);
        self.tasks = tasks;
        self.user = load_or_create_user(Local::now().naive_local());

        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next task in the list.
    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the list.
    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Completes the currently selected task and records the XP message.
    pub fn complete_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if i < self.tasks.len() {
                let id = self.tasks[i].id;
                if let Some(outcome) = cmd_complete(id, true) {
                    let xp = short_numeric(outcome.xp)
                        .unwrap_or_else(|_| format!("{:.2e}", outcome.xp));
                    self.reload();
                    let mut msg = format!("You gained {} XP!", xp);
                    if outcome.level_ups > 0 {
                        msg.push_str(&format!(" Level up! Now level {}.", self.user.level));
                    }
                    self.status = Some(msg);
                    return;
                }
                self.reload();
            }
        }
    }

    /// Deletes the currently selected task.
    pub fn delete_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if i < self.tasks.len() {
                cmd_remove(self.tasks[i].id, true);
                self.reload();
            }
        }
    }

    /// Toggles the visibility of completed tasks.
    pub fn toggle_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.reload();
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
        self.status = None;
    }

    /// Handles a confirmed line of wizard input.
    pub fn handle_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Name
                if !self.input_buffer.is_empty() {
                    self.add_state.name = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Due date; format is validated by cmd_add, but an empty
                // value makes no sense so stay on this step.
                if !self.input_buffer.is_empty() {
                    self.add_state.due = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            2 => {
                // Priority (empty keeps the default)
                if let Ok(p) = self.input_buffer.parse::<u32>() {
                    self.add_state.priority = p.max(1);
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                } else if self.input_buffer.is_empty() {
                    self.add_state.step += 1;
                }
            }
            3 => {
                // Difficulty (empty keeps the default)
                if let Ok(d) = self.input_buffer.parse::<u32>() {
                    self.add_state.difficulty = d.max(1);
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                } else if self.input_buffer.is_empty() {
                    self.add_state.step += 1;
                }
            }
            4 => {
                // Repeat cadence (empty means one-shot)
                if self.input_buffer.is_empty() {
                    self.add_state.step += 1;
                } else if self.input_buffer.parse::<Cadence>().is_ok() {
                    self.add_state.cadence = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            5 => {
                // Interval (empty keeps the default), then create the task
                if let Ok(n) = self.input_buffer.parse::<u32>() {
                    self.add_state.interval = n.max(1);
                } else if !self.input_buffer.is_empty() {
                    return;
                }
                cmd_add(
                    self.add_state.name.clone(),
                    self.add_state.due.clone(),
                    self.add_state.priority,
                    self.add_state.difficulty,
                    self.add_state.interval,
                    self.add_state.cadence.clone(),
                    true,
                );
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.reload();
            }
            _ => {}
        }
    }
}
