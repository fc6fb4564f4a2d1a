//! Command-line frontend for `todo_core`.
//!
//! # Responsibility
//! - Parse one user intent per process run and forward it to the session.
//! - Render the resulting snapshot as plain text.
//!
//! Every run rehydrates state from the storage file.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use todo_core::{
    default_log_level, init_logging, open_storage, AppSession, Category, ContactField, Page,
    Priority, SqliteKeyValueStore, StatusFilter, TodoDraft, TodoId, ViewSnapshot,
};

const ABOUT_TEXT: &str = "A small todo list with add, edit, delete and complete. \
Items are kept in a local SQLite file; nothing leaves this machine.";

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Local todo list manager")]
struct Cli {
    /// Storage file holding todos and preferences.
    #[arg(long, env = "TODO_DB", default_value = "todo.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "TODO_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, env = "TODO_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show todos through the status and search filters.
    List {
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a todo.
    Add {
        text: String,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value = "personal")]
        category: Category,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Replace text and, when given, priority/category/due date of a todo.
    Edit {
        id: TodoId,
        text: String,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        #[arg(long)]
        clear_due: bool,
    },
    /// Flip a todo between active and completed.
    Toggle { id: TodoId },
    Delete { id: TodoId },
    /// Remove every completed todo.
    ClearCompleted,
    Stats,
    /// Flip the persisted dark-mode preference.
    DarkMode,
    About,
    /// Send a message. Acknowledged locally, never transmitted.
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(&cli.log_level, &log_dir.to_string_lossy())
            .context("failed to initialize logging")?;
    }

    let storage = open_storage(&cli.db)
        .with_context(|| format!("failed to open storage `{}`", cli.db.display()))?;
    let mut session = AppSession::open(storage);
    let now = Instant::now();

    let outcome = run(&mut session, cli.command, now)?;
    render(&session.snapshot(now));

    if let Outcome::ContactRejected(missing) = outcome {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        bail!("contact form incomplete: missing {}", names.join(", "));
    }
    Ok(())
}

/// Result of an intent that was handled without a storage error.
enum Outcome {
    Applied,
    ContactRejected(Vec<ContactField>),
}

fn run(
    session: &mut AppSession<SqliteKeyValueStore>,
    command: Command,
    now: Instant,
) -> Result<Outcome> {
    match command {
        Command::List { status, search } => {
            session.set_status_filter(status);
            session.set_search_query(search);
        }
        Command::Add {
            text,
            priority,
            category,
            due,
        } => {
            let draft = TodoDraft::new(text)
                .with_priority(priority)
                .with_category(category)
                .with_due_date(due);
            if let Some(todo) = session.submit_todo(&draft, now)? {
                println!("added {}", todo.id);
            }
        }
        Command::Edit {
            id,
            text,
            priority,
            category,
            due,
            clear_due,
        } => {
            let mut draft = session.start_edit(id)?;
            draft.text = text;
            draft.priority = priority.unwrap_or(draft.priority);
            draft.category = category.unwrap_or(draft.category);
            if clear_due {
                draft.due_date = None;
            } else if due.is_some() {
                draft.due_date = due;
            }
            if session.submit_todo(&draft, now)?.is_none() {
                session.cancel_edit();
            }
        }
        Command::Toggle { id } => {
            session.toggle(id, now)?;
        }
        Command::Delete { id } => session.delete(id, now)?,
        Command::ClearCompleted => {
            session.clear_completed(now)?;
        }
        Command::Stats => {}
        Command::DarkMode => {
            session.toggle_dark_mode()?;
        }
        Command::About => session.navigate(Page::About),
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            session.navigate(Page::Contact);
            let form = session.contact_form_mut();
            form.name = name;
            form.email = email;
            form.subject = subject;
            form.message = message;
            if let Err(missing) = session.submit_contact(now) {
                return Ok(Outcome::ContactRejected(missing));
            }
        }
    }
    Ok(Outcome::Applied)
}

fn render(snapshot: &ViewSnapshot<'_>) {
    if let Some(notification) = snapshot.notification {
        println!("[{}] {}", notification.kind.as_str(), notification.message);
    }

    match snapshot.page {
        Page::Home => render_home(snapshot),
        Page::About => println!("{}\n{}", Page::About.title(), ABOUT_TEXT),
        Page::Contact => {}
    }
}

fn render_home(snapshot: &ViewSnapshot<'_>) {
    for todo in &snapshot.visible {
        let mark = if todo.completed { "x" } else { " " };
        let due = todo
            .due_date
            .map(|date| format!(" due {date}"))
            .unwrap_or_default();
        println!(
            "[{mark}] {} {} ({}, {}){}",
            todo.id,
            todo.text,
            todo.priority.as_str(),
            todo.category.as_str(),
            due
        );
    }

    let stats = snapshot.stats;
    println!(
        "total={} active={} completed={} high_priority_active={} theme={}",
        stats.total,
        stats.active,
        stats.completed,
        stats.high_priority_active,
        if snapshot.dark_mode { "dark" } else { "light" }
    );
}
