//! Command-line argument definitions.
//!
//! Only argument names, defaults and help text live here.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Employee roster backed by a local SQLite file.
#[derive(Debug, Parser)]
#[command(name = "roster", version)]
pub struct Cli {
    /// SQLite database file, created on first use.
    #[arg(long, env = "ROSTER_DB", default_value = "roster.sqlite3", global = true)]
    pub db: PathBuf,

    /// Log level (trace|debug|info|warn|error). Defaults by build mode.
    #[arg(long, env = "ROSTER_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "ROSTER_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print core linkage info.
    Ping,
    /// Create an employee; fails when the email is taken.
    Create(EmployeeFields),
    /// List every employee as a JSON array.
    List,
    /// Print one employee as JSON.
    Get { id: i64 },
    /// Replace every field of an existing employee.
    Update {
        id: i64,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee. Unknown ids are ignored.
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct EmployeeFields {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
}
