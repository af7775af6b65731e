use crate::core::ingest::InputFormat;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rBillcheck
/// CLI application to verify legal billing entries with SQLite
#[derive(Parser)]
#[command(
    name = "rbillcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "A billing verification CLI: flag anomalies, classify UTBMS codes and audit time entries before invoicing",
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Verify a raw billing export and save the annotated batch
    Check {
        /// Input file (CSV/TSV, JSON or plain text)
        file: String,

        #[arg(long, value_enum, default_value = "auto", help = "Input format")]
        format: InputFormat,

        #[arg(long, help = "Apply a saved settings profile")]
        profile: Option<String>,

        #[arg(long, help = "Override the default hourly rate")]
        rate: Option<f64>,

        #[arg(long, help = "Client name for name-leak detection")]
        client: Option<String>,

        #[arg(long = "from", help = "Drop entries dated before YYYY-MM-DD")]
        date_from: Option<String>,

        #[arg(long = "to", help = "Drop entries dated after YYYY-MM-DD")]
        date_to: Option<String>,

        #[arg(long = "no-save", help = "Print the report without saving a batch")]
        no_save: bool,

        #[arg(long, help = "Print the per-day breakdown")]
        daily: bool,

        #[arg(
            long,
            short = 'v',
            help = "Also print quality issues and split suggestions per entry"
        )]
        verbose: bool,
    },

    /// Re-run the pipeline over a stored batch
    Recheck {
        /// Batch id to re-verify
        batch: i64,

        #[arg(long, help = "Re-run with a saved profile instead of the stored settings")]
        profile: Option<String>,

        #[arg(long, short = 'v', help = "Also print quality issues and split suggestions")]
        verbose: bool,
    },

    /// Approve, write off or confirm a stored entry
    Review {
        #[arg(long, help = "Batch id")]
        batch: i64,

        #[arg(long, help = "Entry id within the batch (e.g. E0003)")]
        entry: String,

        #[arg(long, help = "Mark the entry approved")]
        approve: bool,

        #[arg(long, conflicts_with = "approve", help = "Clear the approved mark")]
        unapprove: bool,

        #[arg(long = "write-off", help = "Mark the entry as a write-off")]
        write_off: bool,

        #[arg(long, conflicts_with = "write_off", help = "Clear the write-off mark")]
        restore: bool,

        #[arg(long, help = "Set review status to confirmed")]
        confirm: bool,

        #[arg(long, help = "Attach a review note")]
        note: Option<String>,
    },

    /// List stored batches, or the entries of one batch
    List {
        #[arg(long, help = "Batch id (omit to list all batches)")]
        batch: Option<i64>,

        #[arg(long, help = "Only flagged entries")]
        flagged: bool,

        #[arg(long, help = "Only entries at this confidence (high/medium/low)")]
        confidence: Option<String>,

        #[arg(long = "summary", help = "Show the batch roll-up instead of entries")]
        summary: bool,

        #[arg(long, help = "Show the per-day breakdown")]
        daily: bool,

        #[arg(long, short = 'v', help = "Also print quality issues and split suggestions")]
        verbose: bool,
    },

    /// Manage saved settings profiles
    Profile {
        #[arg(long, value_name = "NAME", help = "Save current defaults as a profile")]
        save: Option<String>,

        #[arg(long, help = "List saved profiles")]
        list: bool,

        #[arg(long, value_name = "NAME", help = "Print one profile")]
        show: Option<String>,

        #[arg(long, value_name = "NAME", help = "Delete a profile")]
        delete: Option<String>,
    },

    /// Export stored entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Export one batch")]
        batch: Option<i64>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete a stored batch
    Del {
        #[arg(long, help = "Batch id to delete")]
        batch: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
