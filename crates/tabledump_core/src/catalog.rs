//! Table enumeration over the SQLite catalog.
//!
//! # Responsibility
//! - List table names from `sqlite_master` in catalog order.
//! - Produce identifiers safe to splice into a full-scan statement.
//!
//! # Invariants
//! - No explicit ordering is imposed on catalog results.
//! - Views, indexes and triggers are never returned.

use crate::db::DbResult;
use log::{error, info};
use rusqlite::Connection;

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table';";
const INTERNAL_TABLE_PREFIX: &str = "sqlite_";

/// Returns the names of all tables, in the order the catalog yields them.
pub fn list_tables(conn: &Connection) -> DbResult<Vec<String>> {
    let result = query_table_names(conn);
    match &result {
        Ok(names) => info!(
            "event=catalog_list module=catalog status=ok tables={}",
            names.len()
        ),
        Err(err) => error!(
            "event=catalog_list module=catalog status=error error_code=catalog_query_failed error={}",
            err
        ),
    }
    result
}

fn query_table_names(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(LIST_TABLES_SQL)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for name in rows {
        names.push(name?);
    }
    Ok(names)
}

/// Returns whether `name` is a table SQLite maintains itself
/// (`sqlite_sequence`, `sqlite_stat1`, ...).
pub fn is_internal_table(name: &str) -> bool {
    name.get(..INTERNAL_TABLE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(INTERNAL_TABLE_PREFIX))
}

/// Quotes a table name as an SQL identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
