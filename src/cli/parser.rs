use crate::export::{ExportFormat, ExportView};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rShiftLog
/// CLI application to track per-shift production with SQLite
#[derive(Parser)]
#[command(
    name = "rshiftlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track per-shift machine production, downtime causes and operator notes using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Add missing fields to the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add or list machines
    Machine {
        #[arg(long = "add", value_name = "NAME", help = "Register a new machine")]
        add: Option<String>,

        #[arg(long = "list", help = "List registered machines")]
        list: bool,
    },

    /// Add or list downtime causes
    Cause {
        #[arg(long = "add", value_name = "NAME", help = "Register a new downtime cause")]
        add: Option<String>,

        #[arg(long = "list", help = "List known downtime causes")]
        list: bool,
    },

    /// Record (or update) the production of one machine for one shift
    Record {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long, short = 'm', help = "Machine name")]
        machine: String,

        #[arg(long, short = 's', help = "Shift: morning, afternoon or night")]
        shift: String,

        #[arg(long, short = 't', allow_hyphen_values = true, help = "Planned quantity")]
        target: i64,

        #[arg(long, short = 'a', allow_hyphen_values = true, help = "Produced quantity")]
        actual: i64,

        #[arg(
            long = "downtime",
            short = 'd',
            value_name = "CAUSE=HOURS",
            help = "Downtime hours for a cause (repeatable)"
        )]
        downtime: Vec<String>,

        #[arg(long = "obs", help = "Operator observation")]
        obs: Option<String>,
    },

    /// Delete the record of one machine for one shift
    Del {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long, short = 'm')]
        machine: String,

        #[arg(long, short = 's')]
        shift: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Summary of one shift
    Summary {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long, short = 's')]
        shift: String,

        #[arg(long, short = 'm', help = "Machine name, or 'all'")]
        machine: Option<String>,
    },

    /// Browse recorded shifts
    History {
        #[arg(long, short = 'm', help = "Machine name, or 'all'")]
        machine: Option<String>,

        #[arg(long, short = 's')]
        shift: Option<String>,

        #[arg(long = "date", help = "Single date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Downtime hours per cause over a period
    Breakdown {
        #[arg(long, short = 'r', value_name = "RANGE")]
        range: String,

        #[arg(long, short = 'm')]
        machine: Option<String>,
    },

    /// Production per machine and day over a period, with totals
    Report {
        #[arg(long, short = 'r', value_name = "RANGE")]
        range: String,

        #[arg(long, short = 'm')]
        machine: Option<String>,
    },

    /// Average completion per day
    Trend {
        #[arg(long, short = 'r', value_name = "RANGE")]
        range: String,

        #[arg(long, short = 'm')]
        machine: Option<String>,
    },

    /// Downtime hours per machine and cause
    Matrix {
        #[arg(long, short = 'r', value_name = "RANGE")]
        range: String,

        #[arg(long, short = 'm')]
        machine: Option<String>,
    },

    /// Completion and downtime per shift
    Compare {
        #[arg(long, short = 'r', value_name = "RANGE")]
        range: String,

        #[arg(long, short = 'm')]
        machine: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export a report view
    Export {
        #[arg(long, value_enum, default_value = "history")]
        view: ExportView,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'm')]
        machine: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
