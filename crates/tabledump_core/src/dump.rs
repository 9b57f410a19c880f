//! Table dumper: prints every table of a SQLite file as text.
//!
//! # Responsibility
//! - Drive open -> enumerate -> per-table scan -> close in one linear pass.
//! - Report database failures as printed diagnostics instead of errors.
//!
//! # Invariants
//! - The connection is closed exactly once on every path that opened it.
//! - `Database connection closed.` is the last line of every dump, including
//!   dumps whose file was not found.
//! - A failing table only affects its own section; siblings still print.
//! - Only failures writing to the output sink are returned as `Err`.

use crate::catalog::{is_internal_table, list_tables, quote_identifier};
use crate::db::{open_db_read_only, DbError};
use crate::render::{
    column_divider_width, divider, join_fields, render_value, table_divider_width,
    SECTION_DIVIDER_WIDTH,
};
use log::{error, info, warn};
use rusqlite::Connection;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

pub const CONNECTION_CLOSED_MESSAGE: &str = "Database connection closed.";
pub const NO_DATA_MESSAGE: &str = "No data in this table.";

/// Options controlling which tables are dumped.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Omit `sqlite_*` tables such as `sqlite_sequence`.
    pub skip_internal_tables: bool,
}

/// How a dump ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpOutcome {
    Completed,
    NoTables,
    FileNotFound,
    DatabaseError,
}

impl DumpOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NoTables => "no_tables",
            Self::FileNotFound => "file_not_found",
            Self::DatabaseError => "database_error",
        }
    }
}

/// Summary of a finished dump, mirroring what was printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpReport {
    pub outcome: DumpOutcome,
    pub tables_dumped: usize,
    pub tables_failed: usize,
}

/// Dumps `database_path` to standard output with default options.
///
/// Database failures are printed; a broken stdout is only logged.
pub fn dump(database_path: impl AsRef<Path>) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = dump_to(database_path, &DumpOptions::default(), &mut out)
        .and_then(|_| out.flush());
    if let Err(err) = result {
        error!(
            "event=dump_finish module=dump status=error error_code=output_write_failed error={}",
            err
        );
    }
}

/// Dumps every table of `database_path` into `out`.
///
/// # Errors
/// - Returns an I/O error only when writing to `out` fails. The connection is
///   still closed before returning.
pub fn dump_to<W: Write>(
    database_path: impl AsRef<Path>,
    options: &DumpOptions,
    out: &mut W,
) -> io::Result<DumpReport> {
    let path = database_path.as_ref();
    let started_at = Instant::now();
    let mut report = DumpReport {
        outcome: DumpOutcome::Completed,
        tables_dumped: 0,
        tables_failed: 0,
    };

    let body = match open_db_read_only(path) {
        Ok(conn) => {
            let body = dump_tables(&conn, path, options, out, &mut report);
            let closed = close_connection(conn);
            body.and_then(|()| match closed {
                Ok(()) => Ok(()),
                Err(err) => writeln!(out, "Error closing database: {err}"),
            })
        }
        Err(DbError::FileNotFound(_)) => {
            report.outcome = DumpOutcome::FileNotFound;
            writeln!(out, "Database file '{}' not found.", path.display())
        }
        Err(err) => {
            report.outcome = DumpOutcome::DatabaseError;
            writeln!(out, "Database error: {err}")
        }
    };
    let footer = writeln!(out).and_then(|()| writeln!(out, "{CONNECTION_CLOSED_MESSAGE}"));

    info!(
        "event=dump_finish module=dump status=ok outcome={} tables_dumped={} tables_failed={} duration_ms={}",
        report.outcome.as_str(),
        report.tables_dumped,
        report.tables_failed,
        started_at.elapsed().as_millis()
    );

    body?;
    footer?;
    Ok(report)
}

fn dump_tables<W: Write>(
    conn: &Connection,
    path: &Path,
    options: &DumpOptions,
    out: &mut W,
    report: &mut DumpReport,
) -> io::Result<()> {
    let tables = match list_tables(conn) {
        Ok(tables) => tables,
        Err(err) => {
            report.outcome = DumpOutcome::DatabaseError;
            return writeln!(out, "Database error: {err}");
        }
    };
    let tables: Vec<String> = tables
        .into_iter()
        .filter(|name| !(options.skip_internal_tables && is_internal_table(name)))
        .collect();

    if tables.is_empty() {
        report.outcome = DumpOutcome::NoTables;
        return writeln!(out, "No tables found in database '{}'.", path.display());
    }

    writeln!(out, "Contents of database '{}':", path.display())?;
    writeln!(out, "{}", divider('=', SECTION_DIVIDER_WIDTH))?;

    for table in &tables {
        match dump_table(conn, table, out) {
            Ok(rows) => {
                report.tables_dumped += 1;
                info!(
                    "event=table_dump module=dump status=ok rows={} name_len={}",
                    rows,
                    table.chars().count()
                );
            }
            Err(TableError::Query(err)) => {
                report.tables_failed += 1;
                warn!(
                    "event=table_dump module=dump status=error error_code=table_query_failed error={}",
                    err
                );
                writeln!(out, "Error reading table '{table}': {err}")?;
            }
            Err(TableError::Output(err)) => return Err(err),
        }
        writeln!(out, "{}", divider('-', table_divider_width(table)))?;
    }

    writeln!(out, "{}", divider('=', SECTION_DIVIDER_WIDTH))
}

/// Prints one table section body and returns the number of rows printed.
fn dump_table<W: Write>(
    conn: &Connection,
    table: &str,
    out: &mut W,
) -> Result<usize, TableError> {
    writeln!(out)?;
    writeln!(out, "Table: {table}")?;
    writeln!(out, "{}", divider('-', table_divider_width(table)))?;

    let sql = format!("SELECT * FROM {};", quote_identifier(table));
    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    // All rows are fetched before printing so a mid-scan failure leaves no
    // partial row listing behind.
    let mut rendered = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for index in 0..columns.len() {
            values.push(render_value(row.get_ref(index)?));
        }
        rendered.push(join_fields(values));
    }

    if !columns.is_empty() {
        writeln!(out, "{}", join_fields(&columns))?;
        writeln!(out, "{}", divider('-', column_divider_width(&columns)))?;
    }

    if rendered.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
    } else {
        for line in &rendered {
            writeln!(out, "{line}")?;
        }
    }
    Ok(rendered.len())
}

// `Drop` swallows close errors; closing explicitly lets a failure be printed.
fn close_connection(conn: Connection) -> Result<(), rusqlite::Error> {
    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=db status=ok");
            Ok(())
        }
        Err((_conn, err)) => {
            error!(
                "event=db_close module=db status=error error_code=db_close_failed error={}",
                err
            );
            Err(err)
        }
    }
}

#[derive(Debug)]
enum TableError {
    Query(rusqlite::Error),
    Output(io::Error),
}

impl From<rusqlite::Error> for TableError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

impl From<io::Error> for TableError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{dump, dump_table, TableError};
    use rusqlite::Connection;

    // Only checks that the stdout wrapper returns without panicking and
    // creates nothing; the printed text is covered through `dump_to`.
    #[test]
    fn dump_to_stdout_returns_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        dump(dir.path().join("missing.db"));
        assert!(!dir.path().join("missing.db").exists());
    }

    #[test]
    fn dump_table_prints_header_columns_and_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE pairs (id INTEGER, val TEXT);
             INSERT INTO pairs VALUES (1, 'a'), (2, 'b');",
        )
        .unwrap();

        let mut out = Vec::new();
        let rows = dump_table(&conn, "pairs", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            text,
            "\nTable: pairs\n-------------------\nid | val\n------------\n1 | a\n2 | b\n"
        );
    }

    #[test]
    fn dump_table_reports_missing_table_as_query_error() {
        let conn = Connection::open_in_memory().unwrap();
        let mut out = Vec::new();

        let err = dump_table(&conn, "missing", &mut out).unwrap_err();
        assert!(matches!(err, TableError::Query(_)));
        assert!(String::from_utf8(out).unwrap().contains("Table: missing"));
    }
}
