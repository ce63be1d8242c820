use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode};
use crate::format::short_numeric;
use crate::models::Cadence;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // XP gauge
                Constraint::Min(0),    // Table
                Constraint::Length(3), // Help / status
            ]
            .as_ref(),
        )
        .split(f.area());

    render_xp_gauge(f, app, chunks[0]);

    let today = Local::now().date_naive();

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|t| {
            let days_left = (t.due_date - today).num_days();
            let time_left_str = if days_left < 0 {
                format!("{}d overdue", days_left.abs())
            } else if days_left == 0 {
                "Today".to_string()
            } else {
                format!("{}d", days_left)
            };

            let style = if t.completed {
                Style::default().fg(Color::DarkGray)
            } else if days_left < 0 {
                Style::default().fg(Color::Red)
            } else if days_left == 0 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };

            let repeats = if t.cadence == Cadence::Once {
                "once".to_string()
            } else if t.repeat_interval == 1 {
                t.cadence.to_string()
            } else {
                format!("every {} {}", t.repeat_interval, t.cadence)
            };

            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(t.name.clone()),
                Cell::from(t.due_date.to_string()),
                Cell::from(time_left_str),
                Cell::from(t.priority.to_string()),
                Cell::from(t.difficulty.to_string()),
                Cell::from(repeats),
                Cell::from(t.streak.to_string()),
                Cell::from(if t.completed { "Done" } else { "Pending" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "ID", "Name", "Due", "Time Left", "Pri", "Diff", "Repeats", "Streak", "Status",
            ])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title("Questlog - Tasks"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[1], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => match &app.status {
            Some(msg) => msg.as_str(),
            None => "q: Quit | a: Add | Space: Complete | d: Del | c: Toggle Done | j/k: Move",
        },
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help_style = if app.status.is_some() && app.input_mode == InputMode::Normal {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let help = Paragraph::new(help_text)
        .style(help_style)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    // Render input box if the add wizard is active
    if app.input_mode == InputMode::Adding {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.add_state.step {
            0 => "Add Task: Enter Name",
            1 => "Add Task: Enter Due Date (YYYY-MM-DD)",
            2 => "Add Task: Enter Priority (default 1)",
            3 => "Add Task: Enter Difficulty (default 1)",
            4 => "Add Task: Enter Repeat (daily/weekly/monthly/yearly, empty = once)",
            5 => "Add Task: Repeat Every N Periods (default 1)",
            _ => "Add Task",
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(input, area);
    }
}

fn render_xp_gauge(f: &mut Frame, app: &App, area: Rect) {
    let user = &app.user;
    let ratio = if user.xp_required > 0.0 {
        (user.xp / user.xp_required).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let fmt = |v: f64| short_numeric(v).unwrap_or_else(|_| format!("{:.2e}", v));
    let label = format!(
        "Level {} — {}/{} XP (total {})",
        user.level,
        fmt(user.xp),
        fmt(user.xp_required),
        fmt(user.total_xp)
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(user.name.clone()))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::DarkGray))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height - height) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height - height) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
