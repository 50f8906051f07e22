use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;

use crate::cli::{GenerateArgs, InstanceCommands, PatternCommands};

/// Command-line interface for Cadence recurring tasks
///
/// Cadence keeps recurrence patterns (a task template plus a schedule) and
/// materializes them into dated task instances up to a horizon. Generation is
/// idempotent: running it again only fills in dates that are still missing.
#[derive(Parser)]
#[command(version, about, name = "cad")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Treat this date (YYYY-MM-DD) as today instead of the system date
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<Date>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
///
/// - `pattern`: manage recurrence patterns
/// - `generate`: materialize instances up to a horizon
/// - `instance`: inspect and complete generated instances
#[derive(Subcommand)]
pub enum Commands {
    /// Manage recurrence patterns
    #[command(alias = "p")]
    Pattern {
        #[command(subcommand)]
        command: PatternCommands,
    },
    /// Generate instances for one pattern or all active patterns
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Manage generated task instances
    #[command(alias = "i")]
    Instance {
        #[command(subcommand)]
        command: InstanceCommands,
    },
}
