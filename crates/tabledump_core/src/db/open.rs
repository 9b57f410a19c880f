//! Read-only connection bootstrap.
//!
//! # Responsibility
//! - Open an existing SQLite file with read-only flags.
//! - Probe the catalog so invalid files are rejected at open time.
//!
//! # Invariants
//! - Never opens with `SQLITE_OPEN_CREATE`.
//! - Paths are always read literally, never as `file:` URIs.
//! - Emits one `db_open` start event and exactly one terminal event.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::borrow::Cow;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens an existing SQLite database file in read-only mode.
///
/// # Errors
/// - [`DbError::FileNotFound`] when `path` does not exist.
/// - [`DbError::Sqlite`] when the file cannot be opened or is not a database.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_read_only(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=read_only");

    if !path.exists() {
        error!(
            "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_file_not_found",
            started_at.elapsed().as_millis()
        );
        return Err(DbError::FileNotFound(path.to_path_buf()));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = match Connection::open_with_flags(literal_path(path), flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=read_only duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Prefixes relative `file:...` paths with `./`.
///
/// Bundled SQLite may interpret a leading `file:` as a URI even without
/// `SQLITE_OPEN_URI`, which would open a different file than the one checked
/// by `exists()`.
fn literal_path(path: &Path) -> Cow<'_, Path> {
    if path.is_relative() && path.as_os_str().to_string_lossy().starts_with("file:") {
        Cow::Owned(Path::new(".").join(path))
    } else {
        Cow::Borrowed(path)
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    // SQLite reads the header lazily; touching the catalog surfaces
    // "file is not a database" before any output is produced.
    conn.query_row("SELECT count(*) FROM sqlite_master;", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(())
}
