use clap::{Parser, Subcommand};

/// Cadence: a small task scheduler with compact repeat rules
///
/// Repeat rules: `d N` every N days (1-400), `w 1,3,5` on ISO weekdays
/// (1 = Monday), `m 1,15,-1 [1,6]` on days of the month (-1 last, -2 second to
/// last) optionally only in some months, `y` every year.
#[derive(Parser, Debug)]
#[command(name = "cadence", author, version)]
pub struct Cli {
    /// Path to the SQLite database (overrides configuration)
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List upcoming tasks
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Mark a task as done (repeating tasks move to their next date)
    Done(DoneCommand),
    /// Calculate the next date of a repeat rule
    NextDate(NextDateCommand),
    /// Check that a repeat rule is well formed
    Check(CheckCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The date of the task (YYYYMMDD, DD.MM.YYYY, today or tomorrow); defaults to today
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[clap(short, long)]
    pub comment: Option<String>,
    /// Repeat rule, e.g. "d 7", "w 1,5", "m -1", "y"
    #[clap(short, long)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Text to look for in titles and comments, or a day as DD.MM.YYYY
    #[clap(short, long)]
    pub search: Option<String>,
    /// Maximum number of tasks to show (defaults to the configured limit)
    #[clap(short, long)]
    pub limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: i64,
    /// Print the task as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    /// New date (YYYYMMDD, DD.MM.YYYY, today or tomorrow)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long, conflicts_with = "comment")]
    pub comment_clear: bool,

    /// New repeat rule
    #[arg(long)]
    pub repeat: Option<String>,
    /// Make the task a one-off
    #[arg(long, conflicts_with = "repeat")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// Start date (YYYYMMDD)
    #[clap(long)]
    pub date: String,
    /// Repeat rule
    #[clap(long)]
    pub repeat: String,
    /// Reference day (YYYYMMDD); defaults to the current moment
    #[clap(long)]
    pub now: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// The repeat rule to check
    pub rule: String,
}
