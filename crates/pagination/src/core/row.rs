//! Projection of sort-key values out of rows.

use crate::types::{CursorValue, Record, SortKey};

/// A row that cursor values can be read from.
///
/// The default projection looks the sort key's column up by name and treats
/// a missing field as NULL. Row types whose field names differ from column
/// names, or that derive cursor values from several fields, override
/// [`cursor_value`](CursorRow::cursor_value).
pub trait CursorRow {
    /// Returns the value of the named field.
    fn field(&self, column: &str) -> Option<CursorValue>;

    /// Returns the cursor value for one sort key.
    fn cursor_value(&self, key: &SortKey) -> CursorValue {
        self.field(&key.column).unwrap_or(CursorValue::Null)
    }
}

/// SQL rows carry each sort column under its qualified `table.column` name
/// as well, which takes precedence over the bare column name.
impl CursorRow for Record {
    fn field(&self, column: &str) -> Option<CursorValue> {
        self.get(column).cloned()
    }

    fn cursor_value(&self, key: &SortKey) -> CursorValue {
        self.get(&key.qualified_name())
            .or_else(|| self.get(&key.column))
            .cloned()
            .unwrap_or(CursorValue::Null)
    }
}
