//! Text layout for dump output.
//!
//! # Responsibility
//! - Render SQLite values as display strings.
//! - Compute divider widths for table and column header lines.
//!
//! # Invariants
//! - Widths count characters, not bytes, so non-ASCII names line up.

use rusqlite::types::ValueRef;

/// Separator between column names and between row values.
pub const FIELD_SEPARATOR: &str = " | ";
/// Width of the `=` lines framing the whole dump.
pub const SECTION_DIVIDER_WIDTH: usize = 40;

const TABLE_HEADER_PADDING: usize = 14;
const COLUMN_HEADER_PADDING: usize = 4;

/// Renders one SQLite value for display.
///
/// Uses SQLite spellings rather than Python's `str()`: null is `NULL` (not
/// `None`), blobs are `x'..'` hex literals, and reals use Rust `Debug`
/// formatting (`1e20`, not `1e+20`; `1.0` keeps its fraction).
pub fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format!("{f:?}"),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => {
            let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
            format!("x'{hex}'")
        }
    }
}

pub fn join_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            line.push_str(FIELD_SEPARATOR);
        }
        line.push_str(field.as_ref());
    }
    line
}

pub fn divider(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Width of the `-` line under a `Table: <name>` header.
pub fn table_divider_width(table_name: &str) -> usize {
    table_name.chars().count() + TABLE_HEADER_PADDING
}

/// Width of the `-` line under the joined column names.
///
/// Returns `0` for an empty column list.
pub fn column_divider_width<S: AsRef<str>>(columns: &[S]) -> usize {
    if columns.is_empty() {
        return 0;
    }
    let names: usize = columns
        .iter()
        .map(|column| column.as_ref().chars().count())
        .sum();
    names + (columns.len() - 1) * FIELD_SEPARATOR.len() + COLUMN_HEADER_PADDING
}

#[cfg(test)]
mod tests {
    use super::{
        column_divider_width, divider, join_fields, render_value, table_divider_width,
    };
    use rusqlite::types::ValueRef;

    #[test]
    fn render_value_covers_every_storage_class() {
        assert_eq!(render_value(ValueRef::Null), "NULL");
        assert_eq!(render_value(ValueRef::Integer(-42)), "-42");
        assert_eq!(render_value(ValueRef::Real(1.0)), "1.0");
        assert_eq!(render_value(ValueRef::Real(2.5)), "2.5");
        assert_eq!(render_value(ValueRef::Text(b"hello")), "hello");
        assert_eq!(render_value(ValueRef::Blob(&[0x0a, 0xff])), "x'0aff'");
    }

    #[test]
    fn render_value_replaces_invalid_utf8() {
        assert_eq!(render_value(ValueRef::Text(&[b'a', 0xff])), "a\u{fffd}");
    }

    #[test]
    fn join_fields_uses_pipe_separator() {
        assert_eq!(join_fields(["id", "val"]), "id | val");
        assert_eq!(join_fields(["solo"]), "solo");
        assert_eq!(join_fields(Vec::<String>::new()), "");
    }

    #[test]
    fn divider_widths_follow_name_lengths() {
        assert_eq!(table_divider_width("users"), 19);
        assert_eq!(table_divider_width("ユーザー"), 18);
        assert_eq!(column_divider_width(&["id", "val"]), 2 + 3 + 3 + 4);
        assert_eq!(column_divider_width::<&str>(&[]), 0);
        assert_eq!(divider('-', 3), "---");
    }
}
