use clap::{Args, Parser, Subcommand};

use crate::model::activity::{ActivityId, NewActivity};
use crate::model::view::{Filter, SortKey};

#[derive(Parser)]
#[command(name = "tally", about = "Track study activities for one session, in memory", version)]
pub struct Cli {
    /// Read commands from this file instead of stdin
    pub script: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file (default: ./tally.toml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only print on explicit list/stats/show commands
    #[arg(short, long)]
    pub quiet: bool,
}

/// One line of session input
#[derive(Parser, Debug)]
#[command(name = "tally", no_binary_name = true, disable_version_flag = true)]
pub struct IntentLine {
    #[command(subcommand)]
    pub intent: Intent,
}

/// Everything a user can ask of a session
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Intent {
    /// Add an activity
    Add(AddArgs),
    /// Mark an activity completed
    Done(IdArg),
    /// Mark an activity pending again
    Undo(IdArg),
    /// Delete an activity
    #[command(alias = "delete")]
    Rm(IdArg),
    /// Show all, pending or completed activities
    Filter {
        #[arg(value_enum, ignore_case = true)]
        filter: Filter,
    },
    /// Search titles and subjects (no text clears the search)
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Order by date, priority or title
    Sort {
        #[arg(value_enum, ignore_case = true)]
        key: SortKey,
    },
    /// Print the current view
    #[command(alias = "ls")]
    List,
    /// Print totals over every activity
    Stats,
    /// Show one activity in detail
    Show(IdArg),
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct IdArg {
    /// Activity ID, like A-001
    pub id: String,
}

impl IdArg {
    pub fn activity_id(&self) -> ActivityId {
        ActivityId(self.id.trim().to_string())
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddArgs {
    /// Activity title (words are joined with spaces; put a title that starts
    /// with `-` after `--`, as in `add --time 2 -- "-1 revision"`)
    pub title: Vec<String>,
    /// Subject or course
    #[arg(long)]
    pub subject: Option<String>,
    /// Activity type (exam, essay, reading, ...)
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub difficulty: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub priority: Option<String>,
    /// Deadline as YYYY-MM-DD
    #[arg(long, alias = "deadline")]
    pub date: Option<String>,
    /// Estimated hours
    #[arg(long, alias = "estimated-time", allow_hyphen_values = true)]
    pub time: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Flag the activity as important
    #[arg(long)]
    pub important: bool,
}

impl AddArgs {
    pub fn into_candidate(self) -> NewActivity {
        NewActivity {
            title: self.title.join(" "),
            subject: self.subject.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            important: self.important,
        }
    }
}
