//! `tabledump` entry point.
//!
//! # Responsibility
//! - Parse arguments and optionally start file logging.
//! - Run the dumper against stdout.
//!
//! Database problems are printed by the dumper and end the process normally;
//! only a failure writing stdout yields a non-zero exit.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tabledump_core::{
    default_log_level, dump_to, init_logging, DumpOptions, DEFAULT_DATABASE_PATH,
};

/// Print every table of a SQLite database as text.
#[derive(Debug, Parser)]
#[command(name = "tabledump", version, about)]
struct Cli {
    /// Database file to inspect
    #[arg(default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Omit tables SQLite maintains itself (sqlite_sequence, sqlite_stat1, ...)
    #[arg(long)]
    skip_internal: bool,

    /// Absolute directory for diagnostic log files; logging is off without it
    #[arg(long, value_name = "ABS_PATH")]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, default_value = default_log_level())]
    log_level: String,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let options = DumpOptions {
        skip_internal_tables: cli.skip_internal,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = dump_to(&cli.database, &options, &mut out)?;
    out.flush()?;

    log::debug!(
        "event=cli_exit module=cli status=ok outcome={:?} tables_dumped={} tables_failed={}",
        report.outcome,
        report.tables_dumped,
        report.tables_failed
    );
    Ok(())
}
