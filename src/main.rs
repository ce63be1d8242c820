use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use questlog::commands::*;
use questlog::tui::run_tui;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Gamified terminal task manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task name (quoted if it has spaces)
        name: String,
        /// Due date in YYYY-MM-DD
        #[arg(short, long)]
        due: String,
        /// Priority, 1 (low) and up
        #[arg(short, long, default_value_t = 1)]
        priority: u32,
        /// Difficulty, 1 (easy) and up
        #[arg(short = 'D', long, default_value_t = 1)]
        difficulty: u32,
        /// Repeat cadence (daily, weekly, monthly, yearly, once)
        #[arg(short, long, default_value = "once")]
        repeat: String,
        /// Repeat every N cadence periods
        #[arg(short, long, default_value_t = 1)]
        every: u32,
    },
    /// List tasks sorted by due date
    List {
        /// Show completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Complete a task and earn XP
    Complete {
        id: u64,
    },
    /// Remove a task
    Remove {
        id: u64,
    },
    /// Show the player profile
    Stats,
    /// Reset the database (delete all tasks and the profile)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    // Diagnostics go to stderr; override the filter with RUST_LOG.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|l| l.start())
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { name, due, priority, difficulty, repeat, every }) => {
            cmd_add(name, due, priority, difficulty, every, repeat, false)
        }
        Some(Commands::List { all }) => cmd_list(all),
        Some(Commands::Complete { id }) => {
            cmd_complete(id, false);
        }
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Stats) => cmd_stats(),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "questlog", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
