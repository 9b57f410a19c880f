//! SQLite connection bootstrap for read-only inspection.
//!
//! # Responsibility
//! - Open existing database files without ever creating or modifying them.
//! - Classify open failures into missing-file vs database-level errors.
//!
//! # Invariants
//! - A missing path is reported as [`DbError::FileNotFound`] and no file is created.
//! - Returned connections have already read the catalog once, so a file that
//!   is not a SQLite database fails here and not mid-dump.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;

pub use open::open_db_read_only;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    FileNotFound(PathBuf),
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                write!(f, "database file `{}` not found", path.display())
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileNotFound(_) => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
