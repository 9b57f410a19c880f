//! Read-only SQLite inspection: prints every table of a database file.
//! This crate owns connection handling, catalog access and output layout.

pub mod catalog;
pub mod db;
pub mod dump;
pub mod logging;
pub mod render;

pub use db::{open_db_read_only, DbError, DbResult};
pub use dump::{dump, dump_to, DumpOptions, DumpOutcome, DumpReport};
pub use logging::{default_log_level, init_logging, logging_status};

/// Database path used when no path is supplied.
pub const DEFAULT_DATABASE_PATH: &str = "VWAP_Alpha.db";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
